//! CLI definitions using clap.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crossdock::core::{HostPlatform, TargetTriple, ToolRole};
use crossdock::ops::ResolveOptions;

/// crossdock - Cross-compilation toolchain resolution for native builds
#[derive(Parser)]
#[command(name = "crossdock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory scanned for toolkit installs
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Resolve for this host instead of the running one
    #[arg(long, global = true, value_name = "HOST")]
    pub host: Option<HostPlatform>,

    /// Set an override property (e.g., -D androidNdk=/opt/ndk)
    #[arg(short = 'D', global = true, value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register toolchains and show which targets they build
    Targets(TargetsArgs),

    /// Show the tool invocations for one target
    Args(ArgsArgs),

    /// Show where cross-compilation toolkits were found
    Locate(LocateArgs),
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ArgsArgs {
    /// Target to show (e.g., android_arm64-v8a)
    pub target: TargetTriple,

    /// Only show this tool role (e.g., cpp-compiler, linker, ar)
    #[arg(long)]
    pub role: Option<ToolRole>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolution options from the global flags.
    pub fn resolve_options(&self) -> Result<ResolveOptions> {
        let working_dir = match &self.directory {
            Some(dir) => std::path::absolute(dir)
                .with_context(|| format!("invalid directory: {}", dir.display()))?,
            None => std::env::current_dir().context("failed to get current directory")?,
        };

        let mut options = ResolveOptions::new(working_dir);
        if let Some(host) = self.host {
            options.host = host;
        }
        options.properties.extend(self.properties.iter().cloned());
        Ok(options)
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid property '{}'; expected KEY=VALUE", s))?;
    if key.is_empty() {
        return Err(format!("invalid property '{}'; key is empty", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("androidNdk=/opt/ndk"),
            Ok(("androidNdk".to_string(), "/opt/ndk".to_string()))
        );
        assert_eq!(
            parse_property("osxcrossBin="),
            Ok(("osxcrossBin".to_string(), String::new()))
        );
        assert!(parse_property("androidNdk").is_err());
        assert!(parse_property("=x").is_err());
    }

    #[test]
    fn test_cli_parses_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "crossdock",
            "args",
            "android_x86",
            "--role",
            "cxx",
            "--host",
            "linux",
            "-D",
            "androidNdk=/ndk",
        ])
        .unwrap();

        assert_eq!(cli.host, Some(HostPlatform::Linux));
        assert_eq!(cli.properties, vec![("androidNdk".to_string(), "/ndk".to_string())]);
        match cli.command {
            Commands::Args(args) => {
                assert_eq!(args.target, TargetTriple::ANDROID_X86);
                assert_eq!(args.role, Some(ToolRole::CppCompiler));
            }
            _ => panic!("expected args command"),
        }
    }

    #[test]
    fn test_relative_directory_is_made_absolute() {
        let cli = Cli::try_parse_from(["crossdock", "-C", "proj", "locate"]).unwrap();
        let options = cli.resolve_options().unwrap();

        assert!(options.working_dir.is_absolute());
        assert_eq!(options.working_dir, std::env::current_dir().unwrap().join("proj"));
    }
}
