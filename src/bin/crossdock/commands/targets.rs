//! `crossdock targets` command

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::TargetsArgs;
use crossdock::ops::{format_resolution, resolve, ResolveOptions};
use crossdock::util::diagnostic::StderrSink;

pub fn execute(
    args: TargetsArgs,
    options: &ResolveOptions,
    sink: Arc<StderrSink>,
    verbose: bool,
) -> Result<()> {
    let resolution = resolve(options, sink)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&resolution).context("failed to serialize toolchains")?;
        println!("{}", json);
    } else {
        print!("{}", format_resolution(&resolution, verbose));
    }

    Ok(())
}
