//! The registration pass.
//!
//! [`ToolchainRegistry::register_all`] runs once per build. It dispatches on
//! the host platform to collect the host's toolchain families, adds the NDK
//! toolchain when an NDK is available on any host, and checks that no
//! target is serviced by two families. The resulting [`ToolchainSet`] is
//! immutable.

mod android;
mod errors;
mod linux;
mod windows;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::core::descriptor::{ToolRole, ToolInvocation, ToolchainDescriptor};
use crate::core::platform::{HostPlatform, TargetOs, TargetTriple};
use crate::toolkit::ToolkitLocator;
use crate::util::diagnostic::{Diagnostic, DiagnosticSink};
use crate::util::probe::PathProbe;

pub use errors::RegistryError;

/// Builds the toolchain set for a host from located toolkits.
pub struct ToolchainRegistry<P> {
    locator: ToolkitLocator<P>,
}

impl<P: PathProbe> ToolchainRegistry<P> {
    pub fn new(locator: ToolkitLocator<P>) -> Self {
        ToolchainRegistry { locator }
    }

    pub fn locator(&self) -> &ToolkitLocator<P> {
        &self.locator
    }

    /// Register every toolchain family available on `host`.
    ///
    /// Missing toolkits are reported through the locator's diagnostic sink
    /// and their targets are left out. Calling this again returns an equal
    /// set, since toolkit lookups are cached by the locator.
    pub fn register_all(&self, host: HostPlatform) -> Result<ToolchainSet, RegistryError> {
        let mut descriptors = match host {
            HostPlatform::Linux => linux::register(&self.locator)?,
            HostPlatform::Windows => windows::register(),
            HostPlatform::MacOS | HostPlatform::Other => {
                tracing::debug!("No host toolchains registered for {} hosts", host);
                Vec::new()
            }
        };

        if let Some(ndk) = self.locator.locate_android_ndk() {
            descriptors.push(android::register(ndk)?);
        }

        let set = ToolchainSet::new(host, descriptors)?;
        tracing::debug!(
            "Registered {} toolchain(s) servicing {} target(s)",
            set.descriptors.len(),
            set.targets().len()
        );
        Ok(set)
    }
}

/// One-shot registration for `host`, scanning `working_dir` for fallback
/// toolkit installs.
pub fn register_all<P: PathProbe>(
    host: HostPlatform,
    working_dir: impl AsRef<Path>,
    probe: P,
    sink: Arc<dyn DiagnosticSink + Send + Sync>,
) -> Result<ToolchainSet, RegistryError> {
    let locator = ToolkitLocator::new(probe, working_dir, sink);
    ToolchainRegistry::new(locator).register_all(host)
}

/// The descriptors produced by one registration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainSet {
    pub host: HostPlatform,
    pub descriptors: Vec<ToolchainDescriptor>,
}

/// A declared target and the toolchain family that builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub target: TargetTriple,
    pub toolchain: String,
}

impl ToolchainSet {
    /// Validate that every target is serviced by at most one descriptor.
    pub fn new(
        host: HostPlatform,
        descriptors: Vec<ToolchainDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut owners: BTreeMap<TargetTriple, &str> = BTreeMap::new();
        for descriptor in &descriptors {
            for target in descriptor.serviced() {
                if let Some(first) = owners.insert(target, &descriptor.name) {
                    return Err(RegistryError::ConfigurationConflict {
                        target,
                        first: first.to_string(),
                        second: descriptor.name.clone(),
                    });
                }
            }
        }

        Ok(ToolchainSet { host, descriptors })
    }

    pub fn get(&self, name: &str) -> Option<&ToolchainDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// The descriptor servicing `target`.
    pub fn descriptor_for(&self, target: TargetTriple) -> Option<&ToolchainDescriptor> {
        self.descriptors.iter().find(|d| d.services(target))
    }

    /// The invocation for a (target, role) pair.
    pub fn invocation(&self, target: TargetTriple, role: ToolRole) -> Option<&ToolInvocation> {
        self.descriptor_for(target)
            .and_then(|d| d.invocation(target, role))
    }

    /// Every serviced target.
    pub fn targets(&self) -> BTreeSet<TargetTriple> {
        self.descriptors.iter().flat_map(|d| d.serviced()).collect()
    }

    /// Map declared targets to their toolchain families.
    ///
    /// Targets nobody services are dropped with a warning. Duplicate
    /// declarations are assigned once.
    pub fn assign(&self, declared: &[TargetTriple], sink: &dyn DiagnosticSink) -> Vec<Assignment> {
        let mut seen = BTreeSet::new();
        let mut assignments = Vec::new();

        for &target in declared {
            if !seen.insert(target) {
                continue;
            }

            match self.descriptor_for(target) {
                Some(descriptor) => assignments.push(Assignment {
                    target,
                    toolchain: descriptor.name.clone(),
                }),
                None => {
                    tracing::warn!("Dropping target {}: no toolchain services it", target);
                    sink.emit(
                        Diagnostic::warning(format!("no toolchain for target `{}`", target))
                            .with_context(self.unserviced_reason(target))
                            .with_context("the target will not be built"),
                    );
                }
            }
        }

        assignments
    }

    fn unserviced_reason(&self, target: TargetTriple) -> String {
        match (self.host, target.os()) {
            (_, TargetOs::Android) => "no Android NDK was located".to_string(),
            (HostPlatform::Linux, TargetOs::MacOS) => "osxcross was not located".to_string(),
            (host, os) => format!("{} hosts cannot build {} targets", host, os.as_str()),
        }
    }
}
