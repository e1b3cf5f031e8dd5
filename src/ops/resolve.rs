//! Toolchain resolution for a working directory.
//!
//! Loads the global and project config, turns toolkit settings and
//! command-line properties into discovery overrides, runs the registration
//! pass, and assigns every declared target to its toolchain family.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::platform::{HostPlatform, TargetTriple};
use crate::registry::{Assignment, RegistryError, ToolchainRegistry, ToolchainSet};
use crate::toolkit::ToolkitLocator;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::diagnostic::DiagnosticSink;
use crate::util::probe::SystemProbe;

/// Options for resolving toolchains.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory scanned for `android-ndk*` / `osxcross*` installs
    pub working_dir: PathBuf,

    /// Host to resolve for
    pub host: HostPlatform,

    /// Override properties (`-D key=value`), taking precedence over config
    pub properties: BTreeMap<String, String>,

    /// Global config file; None skips it
    pub global_config: Option<PathBuf>,
}

impl ResolveOptions {
    /// Options for the running host with the user's global config.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        ResolveOptions {
            working_dir: working_dir.into(),
            host: HostPlatform::current(),
            properties: BTreeMap::new(),
            global_config: global_config_path(),
        }
    }

    /// Load the merged global + project config.
    pub fn config(&self) -> Config {
        load_config(
            self.global_config.as_deref(),
            &project_config_path(&self.working_dir),
        )
    }

    /// Build the locator for these options.
    pub fn locator(
        &self,
        config: &Config,
        sink: Arc<dyn DiagnosticSink + Send + Sync>,
    ) -> ToolkitLocator<SystemProbe> {
        let mut properties = config.properties();
        properties.extend(self.properties.clone());

        let probe = SystemProbe::with_properties(properties);
        ToolkitLocator::new(probe, &self.working_dir, sink)
    }
}

/// The outcome of a resolution run.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Every registered toolchain family
    pub toolchains: ToolchainSet,

    /// Declared targets and the family that builds each
    pub assignments: Vec<Assignment>,

    /// Declared targets with no toolchain
    pub dropped: Vec<TargetTriple>,
}

/// Resolve toolchains for the declared targets.
pub fn resolve(
    options: &ResolveOptions,
    sink: Arc<dyn DiagnosticSink + Send + Sync>,
) -> Result<Resolution> {
    let config = options.config();
    let declared = config
        .declared_targets()
        .context("invalid `build.targets` in config")?;

    let toolchains = register_toolchains(options, &config, sink.clone())?;
    let assignments = toolchains.assign(&declared, sink.as_ref());
    let dropped = declared
        .iter()
        .copied()
        .filter(|t| !assignments.iter().any(|a| a.target == *t))
        .collect();

    Ok(Resolution {
        toolchains,
        assignments,
        dropped,
    })
}

/// Run the registration pass for `options.host`.
///
/// A registration error is reported to `sink` in full; the returned error
/// only names the failed host.
pub fn register_toolchains(
    options: &ResolveOptions,
    config: &Config,
    sink: Arc<dyn DiagnosticSink + Send + Sync>,
) -> Result<ToolchainSet> {
    let registry = ToolchainRegistry::new(options.locator(config, sink.clone()));
    registry
        .register_all(options.host)
        .map_err(|e| registration_failed(&e, options.host, sink.as_ref()))
}

fn registration_failed(
    err: &RegistryError,
    host: HostPlatform,
    sink: &dyn DiagnosticSink,
) -> anyhow::Error {
    sink.emit(err.to_diagnostic());
    anyhow::anyhow!("failed to register toolchains for {} host", host)
}

/// Format a resolution for display.
pub fn format_resolution(resolution: &Resolution, verbose: bool) -> String {
    let mut output = String::new();

    writeln!(output, "Host: {}", resolution.toolchains.host).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "Toolchains:").unwrap();
    if resolution.toolchains.descriptors.is_empty() {
        writeln!(output, "  (none)").unwrap();
    }
    for descriptor in &resolution.toolchains.descriptors {
        write!(output, "  {} ({})", descriptor.name, descriptor.family).unwrap();
        if descriptor.host_native {
            write!(output, " [host native]").unwrap();
        }
        writeln!(output).unwrap();

        if verbose {
            for dir in &descriptor.search_paths {
                writeln!(output, "      Search path: {}", dir.display()).unwrap();
            }
            if let Some(sdk) = &descriptor.macos_sdk {
                writeln!(output, "      SDK: {}", sdk.display()).unwrap();
            }
        }
        for target in descriptor.serviced() {
            writeln!(output, "    - {}", target).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "Targets:").unwrap();
    for assignment in &resolution.assignments {
        writeln!(output, "  {:<20} {}", assignment.target, assignment.toolchain).unwrap();
    }
    for target in &resolution.dropped {
        writeln!(output, "  {:<20} (unavailable)", target).unwrap();
    }

    output
}
