//! Cross-compilation toolkit discovery.
//!
//! Each toolkit kind is resolved at most once per [`ToolkitLocator`]: the
//! first candidate source that names a location wins, the result (found or
//! not) is cached, and every later call returns the cached value without
//! touching the filesystem again.
//!
//! Search order:
//! - Android NDK: `androidNdk` property, `ANDROID_NDK_ROOT`,
//!   `ANDROID_NDK_HOME`, then an `android-ndk*` directory in the working
//!   directory.
//! - osxcross: `osxcrossBin` property, an `osxcross*` directory in the
//!   working directory, then the directory containing `xcrun` on `PATH`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use thiserror::Error;

use crate::core::platform::TargetTriple;
use crate::util::diagnostic::{suggestions, Diagnostic, DiagnosticSink};
use crate::util::probe::{PathProbe, ProbeError};

pub mod ndk;
pub mod osxcross;

/// The kinds of toolkit crossdock knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolkitKind {
    AndroidNdk,
    Osxcross,
}

impl ToolkitKind {
    /// Human-readable toolkit name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolkitKind::AndroidNdk => "Android NDK",
            ToolkitKind::Osxcross => "osxcross",
        }
    }

    /// The builds that disappear when this toolkit is missing.
    fn affected_builds(&self) -> &'static str {
        match self {
            ToolkitKind::AndroidNdk => "android",
            ToolkitKind::Osxcross => "macOS",
        }
    }

    fn suggestions(&self) -> [&'static str; 3] {
        match self {
            ToolkitKind::AndroidNdk => [
                suggestions::NDK_ENV,
                suggestions::NDK_PROPERTY,
                suggestions::NDK_SYMLINK,
            ],
            ToolkitKind::Osxcross => [
                suggestions::OSXCROSS_PATH,
                suggestions::OSXCROSS_PROPERTY,
                suggestions::OSXCROSS_SYMLINK,
            ],
        }
    }
}

impl fmt::Display for ToolkitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A discovered toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolkitLocation {
    pub kind: ToolkitKind,
    /// Toolkit root (NDK install root, osxcross `target` directory)
    pub root: PathBuf,
    /// Directory containing the toolkit's executables
    pub bin_dir: PathBuf,
    /// Generic sysroot include directory (NDK only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_includes: Option<PathBuf>,
}

impl ToolkitLocation {
    /// Architecture-specific sysroot includes (NDK only).
    pub fn arch_includes(&self, target: TargetTriple) -> Option<PathBuf> {
        let prefix = target.canonical_prefix()?;
        self.extra_includes.as_ref().map(|dir| dir.join(prefix))
    }

    /// libc++ headers bundled with the prebuilt LLVM toolchain (NDK only).
    pub fn cxx_stdlib_includes(&self) -> Option<PathBuf> {
        if self.kind != ToolkitKind::AndroidNdk {
            return None;
        }
        self.bin_dir.parent().map(|prebuilt| {
            prebuilt
                .join("sysroot")
                .join("usr")
                .join("include")
                .join("c++")
                .join("v1")
        })
    }
}

/// Why a toolkit could not be used.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no {kind} found")]
    ToolkitUnavailable { kind: ToolkitKind },

    #[error("{kind} at {} has no usable toolchain: {reason}", root.display())]
    MalformedToolkitLayout {
        kind: ToolkitKind,
        root: PathBuf,
        reason: String,
        #[source]
        source: Option<ProbeError>,
    },
}

impl LocateError {
    pub fn kind(&self) -> ToolkitKind {
        match self {
            LocateError::ToolkitUnavailable { kind } => *kind,
            LocateError::MalformedToolkitLayout { kind, .. } => *kind,
        }
    }

    /// Convert to a user-friendly diagnostic naming every override mechanism.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let kind = self.kind();
        let mut diag = Diagnostic::warning(self.to_string()).with_context(format!(
            "{} builds will be unavailable",
            kind.affected_builds()
        ));

        if let LocateError::MalformedToolkitLayout { root, .. } = self {
            diag = diag.with_location(root.clone());
        }

        for suggestion in kind.suggestions() {
            diag = diag.with_suggestion(suggestion);
        }
        diag
    }
}

/// Finds toolkits through a [`PathProbe`], caching each result.
pub struct ToolkitLocator<P> {
    probe: P,
    working_dir: PathBuf,
    sink: Arc<dyn DiagnosticSink + Send + Sync>,
    android_ndk: OnceLock<Result<ToolkitLocation, LocateError>>,
    osxcross: OnceLock<Result<ToolkitLocation, LocateError>>,
}

impl<P: PathProbe> ToolkitLocator<P> {
    /// Create a locator that scans `working_dir` for fallback installs and
    /// reports missing toolkits to `sink`. A relative `working_dir` is
    /// resolved against the current directory.
    pub fn new(
        probe: P,
        working_dir: impl AsRef<Path>,
        sink: Arc<dyn DiagnosticSink + Send + Sync>,
    ) -> Self {
        let working_dir = probe.absolute(working_dir.as_ref());
        ToolkitLocator {
            probe,
            working_dir,
            sink,
            android_ndk: OnceLock::new(),
            osxcross: OnceLock::new(),
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// The Android NDK, if one can be used.
    pub fn locate_android_ndk(&self) -> Option<&ToolkitLocation> {
        self.android_ndk_result().as_ref().ok()
    }

    /// The osxcross toolkit, if one can be used.
    pub fn locate_osxcross(&self) -> Option<&ToolkitLocation> {
        self.osxcross_result().as_ref().ok()
    }

    /// Full NDK resolution outcome, including why it failed.
    pub fn android_ndk_result(&self) -> &Result<ToolkitLocation, LocateError> {
        self.android_ndk.get_or_init(|| {
            let result = ndk::locate(&self.probe, &self.working_dir);
            self.report(&result);
            result
        })
    }

    /// Full osxcross resolution outcome, including why it failed.
    pub fn osxcross_result(&self) -> &Result<ToolkitLocation, LocateError> {
        self.osxcross.get_or_init(|| {
            let result = osxcross::locate(&self.probe, &self.working_dir);
            self.report(&result);
            result
        })
    }

    /// The macOS SDK shipped with an osxcross install.
    pub fn macos_sdk(&self, osxcross: &ToolkitLocation) -> Option<PathBuf> {
        osxcross::find_sdk(&self.probe, osxcross)
    }

    fn report(&self, result: &Result<ToolkitLocation, LocateError>) {
        match result {
            Ok(location) => tracing::info!(
                "Located {} at {}",
                location.kind,
                location.bin_dir.display()
            ),
            Err(e) => {
                tracing::debug!("{}", e);
                self.sink.emit(e.to_diagnostic());
            }
        }
    }
}

/// First directory in `dir` whose name starts with `prefix`, in name order.
fn find_prefixed_dir<P: PathProbe>(probe: &P, dir: &Path, prefix: &str) -> Option<PathBuf> {
    let children = match probe.list_children(dir) {
        Ok(children) => children,
        Err(e) => {
            tracing::debug!("Cannot scan {} for `{}*`: {}", dir.display(), prefix, e);
            return None;
        }
    };

    children.into_iter().find(|child| {
        child
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(prefix))
            && probe.is_dir(child)
    })
}
