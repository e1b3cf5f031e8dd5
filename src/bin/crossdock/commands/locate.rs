//! `crossdock locate` command

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::LocateArgs;
use crossdock::ops::{format_locate_report, locate, ResolveOptions};
use crossdock::util::diagnostic::StderrSink;

pub fn execute(args: LocateArgs, options: &ResolveOptions, sink: Arc<StderrSink>) -> Result<()> {
    let report = locate(options, sink);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_locate_report(&report));
    }

    Ok(())
}
