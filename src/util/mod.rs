//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod probe;

pub use config::Config;
pub use diagnostic::Diagnostic;
pub use probe::{PathProbe, SystemProbe};
