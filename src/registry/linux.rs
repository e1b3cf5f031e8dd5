//! Toolchains registered on a Linux host.
//!
//! Linux builds natively with gcc, cross-compiles Windows targets with
//! MinGW gcc, and macOS targets with osxcross when it can be found.

use crate::builder::{build_arguments, ArgumentPolicy};
use crate::core::descriptor::{CompilerFamily, TargetTools, ToolRole, ToolchainDescriptor};
use crate::core::platform::TargetTriple;
use crate::toolkit::{osxcross, ToolkitLocation, ToolkitLocator};
use crate::util::probe::PathProbe;

use super::RegistryError;

pub(super) fn register<P: PathProbe>(
    locator: &ToolkitLocator<P>,
) -> Result<Vec<ToolchainDescriptor>, RegistryError> {
    let mut descriptors = vec![gcc()?];

    if let Some(location) = locator.locate_osxcross() {
        let sdk = locator.macos_sdk(location);
        if sdk.is_none() {
            tracing::warn!(
                "No SDK under {}; the macOS toolchain will discover its own",
                location.root.join("SDK").display()
            );
        }
        descriptors.push(osxcross_clang(location, sdk)?);
    }

    Ok(descriptors)
}

/// Native gcc for Linux targets plus MinGW gcc for Windows targets.
fn gcc() -> Result<ToolchainDescriptor, RegistryError> {
    let mut descriptor = ToolchainDescriptor::new("gcc", CompilerFamily::Gcc);

    for target in [TargetTriple::LINUX_X86_64, TargetTriple::LINUX_X86] {
        let pic = pic_arguments("gcc", target)?;
        descriptor = descriptor.target(
            TargetTools::new(target, CompilerFamily::Gcc).with_args(ToolRole::CppCompiler, &pic),
        );
    }

    for target in [TargetTriple::WINDOWS_X86_64, TargetTriple::WINDOWS_X86] {
        let pic = pic_arguments("gcc", target)?;
        descriptor = descriptor.target(mingw(target).with_args(ToolRole::CppCompiler, &pic));
    }

    Ok(descriptor)
}

fn mingw(target: TargetTriple) -> TargetTools {
    let prefix = target.canonical_prefix().unwrap_or_default();
    TargetTools::new(target, CompilerFamily::Gcc)
        .executable(ToolRole::CCompiler, format!("{}-gcc", prefix))
        .executable(ToolRole::CppCompiler, format!("{}-g++", prefix))
        .executable(ToolRole::Linker, format!("{}-g++", prefix))
        .executable(ToolRole::StaticArchiver, format!("{}-ar", prefix))
}

/// The osxcross clang wrappers for macOS.
fn osxcross_clang(
    location: &ToolkitLocation,
    sdk: Option<std::path::PathBuf>,
) -> Result<ToolchainDescriptor, RegistryError> {
    let target = TargetTriple::MACOS_X86_64;
    let prefix = target.canonical_prefix().unwrap_or_default();
    let pic = pic_arguments("osxcross", target)?;

    let tools = TargetTools::new(target, CompilerFamily::Clang)
        .executable(ToolRole::CCompiler, "o64-clang")
        .executable(ToolRole::CppCompiler, "o64-clang++")
        .executable(ToolRole::Linker, "o64-clang++")
        .executable(ToolRole::Assembler, "o64-clang")
        .executable(ToolRole::SymbolExtractor, format!("{}-objcopy", prefix))
        .executable(ToolRole::Stripper, format!("{}-strip", prefix))
        .with_args(ToolRole::CppCompiler, &pic);

    Ok(ToolchainDescriptor::new("osxcross", CompilerFamily::Clang)
        .search_path(&location.bin_dir)
        .search_path(osxcross::binutils_dir(location))
        .macos_sdk(sdk)
        .target(tools))
}

fn pic_arguments(toolchain: &str, target: TargetTriple) -> Result<Vec<String>, RegistryError> {
    build_arguments(ArgumentPolicy::PositionIndependent, target).map_err(|source| {
        RegistryError::Arguments {
            toolchain: toolchain.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{osxcross_install, MockProbe};
    use crate::util::diagnostic::CollectingSink;

    #[test]
    fn test_mingw_executables() {
        let gcc = gcc().unwrap();
        let tools = gcc.tools_for(TargetTriple::WINDOWS_X86_64).unwrap();

        assert_eq!(
            tools.tool(ToolRole::CCompiler).unwrap().executable,
            "x86_64-w64-mingw32-gcc"
        );
        assert_eq!(
            tools.tool(ToolRole::Linker).unwrap().executable,
            "x86_64-w64-mingw32-g++"
        );
        assert_eq!(
            tools.tool(ToolRole::StaticArchiver).unwrap().executable,
            "x86_64-w64-mingw32-ar"
        );
        assert_eq!(tools.tool(ToolRole::CppCompiler).unwrap().args, vec!["-fPIC"]);
        assert!(tools.tool(ToolRole::CCompiler).unwrap().args.is_empty());
    }

    #[test]
    fn test_native_gcc_pic_on_cpp_only() {
        let gcc = gcc().unwrap();
        for target in [TargetTriple::LINUX_X86, TargetTriple::LINUX_X86_64] {
            let tools = gcc.tools_for(target).unwrap();
            assert_eq!(tools.tool(ToolRole::CppCompiler).unwrap().executable, "g++");
            assert_eq!(tools.tool(ToolRole::CppCompiler).unwrap().args, vec!["-fPIC"]);
            assert!(tools.tool(ToolRole::Linker).unwrap().args.is_empty());
        }
    }

    #[test]
    fn test_osxcross_descriptor() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &["MacOSX10.15.sdk"]);
        let locator = ToolkitLocator::new(probe, "/work", Arc::new(CollectingSink::new()));

        let descriptors = register(&locator).unwrap();
        let osxcross = descriptors.iter().find(|d| d.name == "osxcross").unwrap();

        assert_eq!(osxcross.family, CompilerFamily::Clang);
        assert_eq!(
            osxcross.search_paths,
            vec![
                PathBuf::from("/work/osxcross/target/bin"),
                PathBuf::from("/work/osxcross/target/binutils/bin"),
            ]
        );
        assert_eq!(
            osxcross.macos_sdk,
            Some(PathBuf::from("/work/osxcross/target/SDK/MacOSX10.15.sdk"))
        );

        let tools = osxcross.tools_for(TargetTriple::MACOS_X86_64).unwrap();
        assert_eq!(tools.tool(ToolRole::Assembler).unwrap().executable, "o64-clang");
        assert_eq!(
            tools.tool(ToolRole::SymbolExtractor).unwrap().executable,
            "x86_64-apple-darwin19-objcopy"
        );
        assert_eq!(
            tools.tool(ToolRole::Stripper).unwrap().executable,
            "x86_64-apple-darwin19-strip"
        );
    }

    #[test]
    fn test_osxcross_without_sdk_still_registers() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &[]);
        let locator = ToolkitLocator::new(probe, "/work", Arc::new(CollectingSink::new()));

        let descriptors = register(&locator).unwrap();
        let osxcross = descriptors.iter().find(|d| d.name == "osxcross").unwrap();
        assert_eq!(osxcross.macos_sdk, None);
        assert!(osxcross.services(TargetTriple::MACOS_X86_64));
    }
}
