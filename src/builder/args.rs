//! Extra compiler/linker arguments per target.
//!
//! Two policies exist:
//!
//! - [`ArgumentPolicy::PositionIndependent`]: a lone `-fPIC`.
//! - [`ArgumentPolicy::CrossSysroot`]: the Android NDK clang setup. The
//!   result is always
//!
//!   ```text
//!   -isystem <sysroot>/usr/include
//!   -isystem <sysroot>/usr/include/<arch prefix>
//!   -isystem <prebuilt>/sysroot/usr/include/c++/v1
//!   -target <arch>-linux-android<api>
//!   -fdeclspec [-fms-extensions] -fPIC
//!   ```
//!
//!   clang resolves `-isystem` directories in the order given, so the
//!   include pairs are placed at fixed indices ahead of the target flag.
//!
//! Building arguments never touches the filesystem; every path comes from
//! an already-resolved [`ToolkitLocation`].

use thiserror::Error;

use crate::core::platform::{Arch, TargetTriple, ANDROID_API_LEVEL};
use crate::toolkit::{ToolkitKind, ToolkitLocation};

/// Flag forcing position-independent code.
pub const PIC_FLAG: &str = "-fPIC";

/// How the extra arguments for a target are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentPolicy<'a> {
    /// `-fPIC` only.
    PositionIndependent,
    /// Android sysroot includes, clang target, and MS extension flags.
    CrossSysroot(&'a ToolkitLocation),
}

/// The policy cannot produce arguments for the target.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("target `{target}` is not an Android target")]
    NotAndroid { target: TargetTriple },

    #[error("{kind} location cannot provide sysroot includes")]
    NoSysroot { kind: ToolkitKind },
}

/// Build the ordered argument list for `target` under `policy`.
pub fn build_arguments(
    policy: ArgumentPolicy<'_>,
    target: TargetTriple,
) -> Result<Vec<String>, ArgumentError> {
    match policy {
        ArgumentPolicy::PositionIndependent => Ok(vec![PIC_FLAG.to_string()]),
        ArgumentPolicy::CrossSysroot(ndk) => cross_sysroot_arguments(ndk, target),
    }
}

fn cross_sysroot_arguments(
    ndk: &ToolkitLocation,
    target: TargetTriple,
) -> Result<Vec<String>, ArgumentError> {
    let clang_target = target
        .android_target(ANDROID_API_LEVEL)
        .ok_or(ArgumentError::NotAndroid { target })?;

    let no_sysroot = || ArgumentError::NoSysroot { kind: ndk.kind };
    let includes = ndk.extra_includes.as_ref().ok_or_else(no_sysroot)?;
    let arch_includes = ndk.arch_includes(target).ok_or_else(no_sysroot)?;
    let stdlib_includes = ndk.cxx_stdlib_includes().ok_or_else(no_sysroot)?;

    let mut args = vec!["-target".to_string(), clang_target];

    // Include pairs go in front of the target flag, each at a fixed index
    args.insert(0, "-isystem".to_string());
    args.insert(1, includes.display().to_string());
    args.insert(2, "-isystem".to_string());
    args.insert(3, arch_includes.display().to_string());
    args.insert(4, "-isystem".to_string());
    args.insert(5, stdlib_includes.display().to_string());

    args.push("-fdeclspec".to_string());
    if target.arch() == Arch::Arm64V8a {
        args.push("-fms-extensions".to_string());
    }
    args.push(PIC_FLAG.to_string());

    Ok(args)
}
