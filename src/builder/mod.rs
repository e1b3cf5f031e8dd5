//! Argument construction for resolved toolchains.

pub mod args;

pub use args::{build_arguments, ArgumentError, ArgumentPolicy, PIC_FLAG};
