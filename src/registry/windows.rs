//! Toolchains registered on a Windows host.
//!
//! No cross-compilation is attempted from Windows: MSVC covers the host
//! itself and gcc covers both Windows targets.

use crate::core::descriptor::{CompilerFamily, TargetTools, ToolchainDescriptor};
use crate::core::platform::TargetTriple;

pub(super) fn register() -> Vec<ToolchainDescriptor> {
    let visual_cpp = ToolchainDescriptor::new("visualCpp", CompilerFamily::VisualCpp).host_native();

    let gcc = ToolchainDescriptor::new("gcc", CompilerFamily::Gcc)
        .target(TargetTools::new(
            TargetTriple::WINDOWS_X86_64,
            CompilerFamily::Gcc,
        ))
        .target(TargetTools::new(TargetTriple::WINDOWS_X86, CompilerFamily::Gcc));

    vec![visual_cpp, gcc]
}
