//! `crossdock args` command

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::ArgsArgs;
use crossdock::core::ToolRole;
use crossdock::ops::{register_toolchains, ResolveOptions};
use crossdock::util::diagnostic::StderrSink;

pub fn execute(args: ArgsArgs, options: &ResolveOptions, sink: Arc<StderrSink>) -> Result<()> {
    let config = options.config();
    let toolchains = register_toolchains(options, &config, sink)?;

    let descriptor = toolchains.descriptor_for(args.target).ok_or_else(|| {
        anyhow::anyhow!(
            "no toolchain services target `{}` on a {} host\n\
             help: Run `crossdock locate` to see which toolkits were found",
            args.target,
            options.host
        )
    })?;
    let tools = descriptor
        .tools_for(args.target)
        .context("descriptor lists target without tools")?;

    if let Some(role) = args.role {
        let invocation = tools
            .tool(role)
            .ok_or_else(|| anyhow::anyhow!("no `{}` tool for `{}`", role, args.target))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(invocation)?);
        } else {
            println!("{}", invocation);
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(tools)?);
        return Ok(());
    }

    println!("# `{}` via {} ({})", args.target, descriptor.name, descriptor.family);
    for dir in &descriptor.search_paths {
        println!("# search path: {}", dir.display());
    }
    for role in ToolRole::ALL {
        if let Some(invocation) = tools.tool(role) {
            println!("{:<17} {}", role.as_str(), invocation);
        }
    }

    Ok(())
}
