//! crossdock CLI - Cross-compilation toolchain resolution

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crossdock::util::diagnostic::StderrSink;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("crossdock=debug")
    } else {
        EnvFilter::new("crossdock=info")
    };

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let options = cli.resolve_options()?;
    let sink = Arc::new(StderrSink::new(!cli.no_color));

    // Execute command
    match cli.command {
        Commands::Targets(args) => commands::targets::execute(args, &options, sink, cli.verbose),
        Commands::Args(args) => commands::args::execute(args, &options, sink),
        Commands::Locate(args) => commands::locate::execute(args, &options, sink),
    }
}
