//! The NDK clang toolchain, registered on any host that has an NDK.

use crate::builder::{build_arguments, ArgumentPolicy};
use crate::core::descriptor::{CompilerFamily, TargetTools, ToolRole, ToolchainDescriptor};
use crate::core::platform::TargetTriple;
use crate::toolkit::ToolkitLocation;

use super::RegistryError;

pub(super) const NAME: &str = "androidNdk";

pub(super) fn register(ndk: &ToolkitLocation) -> Result<ToolchainDescriptor, RegistryError> {
    let mut descriptor =
        ToolchainDescriptor::new(NAME, CompilerFamily::Clang).search_path(&ndk.bin_dir);

    for target in TargetTriple::ANDROID {
        let args = build_arguments(ArgumentPolicy::CrossSysroot(ndk), target).map_err(
            |source| RegistryError::Arguments {
                toolchain: NAME.to_string(),
                source,
            },
        )?;
        let prefix = target.canonical_prefix().unwrap_or_default();

        let tools = TargetTools::new(target, CompilerFamily::Clang)
            .executable(ToolRole::SymbolExtractor, format!("{}-objcopy", prefix))
            .executable(ToolRole::StaticArchiver, format!("{}-ar", prefix))
            .executable(ToolRole::Stripper, format!("{}-strip", prefix))
            .with_args(ToolRole::CCompiler, &args)
            .with_args(ToolRole::CppCompiler, &args)
            .with_args(ToolRole::Linker, &args);

        descriptor = descriptor.target(tools);
    }

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::toolkit::ToolkitKind;

    fn ndk() -> ToolkitLocation {
        ToolkitLocation {
            kind: ToolkitKind::AndroidNdk,
            root: PathBuf::from("/ndk"),
            bin_dir: PathBuf::from("/ndk/toolchains/llvm/prebuilt/linux-x86_64/bin"),
            extra_includes: Some(PathBuf::from("/ndk/sysroot/usr/include")),
        }
    }

    #[test]
    fn test_services_all_android_targets() {
        let descriptor = register(&ndk()).unwrap();
        assert_eq!(descriptor.name, "androidNdk");
        assert_eq!(
            descriptor.serviced().collect::<Vec<_>>(),
            TargetTriple::ANDROID.to_vec()
        );
        assert_eq!(
            descriptor.search_paths,
            vec![PathBuf::from("/ndk/toolchains/llvm/prebuilt/linux-x86_64/bin")]
        );
    }

    #[test]
    fn test_arch_prefixed_binutils() {
        let descriptor = register(&ndk()).unwrap();
        let tools = descriptor.tools_for(TargetTriple::ANDROID_ARMV7A).unwrap();

        assert_eq!(tools.tool(ToolRole::CCompiler).unwrap().executable, "clang");
        assert_eq!(tools.tool(ToolRole::Linker).unwrap().executable, "clang++");
        assert_eq!(
            tools.tool(ToolRole::StaticArchiver).unwrap().executable,
            "arm-linux-androideabi-ar"
        );
        assert_eq!(
            tools.tool(ToolRole::SymbolExtractor).unwrap().executable,
            "arm-linux-androideabi-objcopy"
        );
        assert_eq!(
            tools.tool(ToolRole::Stripper).unwrap().executable,
            "arm-linux-androideabi-strip"
        );
    }

    #[test]
    fn test_compilers_and_linker_share_arguments() {
        let descriptor = register(&ndk()).unwrap();
        let tools = descriptor.tools_for(TargetTriple::ANDROID_X86_64).unwrap();

        let cc = &tools.tool(ToolRole::CCompiler).unwrap().args;
        assert_eq!(cc, &tools.tool(ToolRole::CppCompiler).unwrap().args);
        assert_eq!(cc, &tools.tool(ToolRole::Linker).unwrap().args);
        assert!(cc.contains(&"x86_64-linux-android21".to_string()));
        assert!(tools.tool(ToolRole::StaticArchiver).unwrap().args.is_empty());
    }
}
