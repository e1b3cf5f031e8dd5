//! Toolkit discovery report.

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::toolkit::{LocateError, ToolkitLocation};
use crate::util::diagnostic::DiagnosticSink;

use super::resolve::ResolveOptions;

/// Where each toolkit was found, or why it was not.
#[derive(Debug, Clone, Serialize)]
pub struct LocateReport {
    pub android_ndk: ToolkitStatus,
    pub osxcross: ToolkitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos_sdk: Option<PathBuf>,
}

/// Outcome for one toolkit.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ToolkitStatus {
    Found(ToolkitLocation),
    Unavailable { reason: String },
}

impl From<&Result<ToolkitLocation, LocateError>> for ToolkitStatus {
    fn from(result: &Result<ToolkitLocation, LocateError>) -> Self {
        match result {
            Ok(location) => ToolkitStatus::Found(location.clone()),
            Err(e) => ToolkitStatus::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

/// Locate every toolkit regardless of host.
pub fn locate(
    options: &ResolveOptions,
    sink: Arc<dyn DiagnosticSink + Send + Sync>,
) -> LocateReport {
    let config = options.config();
    let locator = options.locator(&config, sink);

    let macos_sdk = locator
        .locate_osxcross()
        .and_then(|location| locator.macos_sdk(location));

    LocateReport {
        android_ndk: locator.android_ndk_result().into(),
        osxcross: locator.osxcross_result().into(),
        macos_sdk,
    }
}

/// Format a locate report for display.
pub fn format_locate_report(report: &LocateReport) -> String {
    let mut output = String::new();

    let toolkits = [
        ("Android NDK", &report.android_ndk),
        ("osxcross", &report.osxcross),
    ];
    for (name, status) in toolkits {
        match status {
            ToolkitStatus::Found(location) => {
                writeln!(output, "[OK] {}: {}", name, location.bin_dir.display()).unwrap()
            }
            ToolkitStatus::Unavailable { reason } => {
                writeln!(output, "[!!] {}: {}", name, reason).unwrap()
            }
        }
    }

    if let ToolkitStatus::Found(_) = report.osxcross {
        match &report.macos_sdk {
            Some(sdk) => writeln!(output, "     macOS SDK: {}", sdk.display()).unwrap(),
            None => writeln!(output, "     macOS SDK: (none)").unwrap(),
        }
    }

    output
}
