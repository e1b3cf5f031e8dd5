//! Core data structures for crossdock.
//!
//! This module contains the foundational types used throughout crossdock:
//! - Host platforms and target triples
//! - Tool roles, compiler families, and toolchain descriptors

pub mod descriptor;
pub mod platform;

pub use descriptor::{CompilerFamily, TargetTools, ToolInvocation, ToolRole, ToolchainDescriptor};
pub use platform::{Arch, HostPlatform, TargetOs, TargetParseError, TargetTriple};
