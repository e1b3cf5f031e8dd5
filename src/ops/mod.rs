//! High-level operations.
//!
//! This module contains the implementation of crossdock commands.

pub mod locate;
pub mod resolve;

pub use locate::{format_locate_report, locate, LocateReport, ToolkitStatus};
pub use resolve::{format_resolution, register_toolchains, resolve, Resolution, ResolveOptions};
