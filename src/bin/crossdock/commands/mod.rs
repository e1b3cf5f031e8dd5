//! Command implementations

pub mod args;
pub mod locate;
pub mod targets;
