//! crossdock - Cross-compilation toolchain resolution for native builds
//!
//! This crate decides, for every target of a multi-target C/C++ build,
//! which compiler family services it, where that family's executables
//! live, and which arguments every tool invocation must receive. It
//! discovers Android NDK and osxcross installs on the host and exports the
//! result as a set of toolchain descriptors for a build orchestrator.

pub mod builder;
pub mod core;
pub mod ops;
pub mod registry;
pub mod toolkit;
pub mod util;

/// Test utilities and mocks for crossdock unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory probe and fake toolkit layouts.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{HostPlatform, TargetTriple, ToolRole, ToolchainDescriptor};
pub use registry::{register_all, ToolchainRegistry, ToolchainSet};
pub use toolkit::{ToolkitLocation, ToolkitLocator};
