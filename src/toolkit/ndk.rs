//! Android NDK discovery.

use std::path::{Path, PathBuf};

use super::{find_prefixed_dir, LocateError, ToolkitKind, ToolkitLocation};
use crate::util::probe::PathProbe;

/// Property naming the NDK root.
pub const PROPERTY: &str = "androidNdk";

/// Primary environment variable naming the NDK root.
pub const ROOT_ENV: &str = "ANDROID_NDK_ROOT";

/// Alias for [`ROOT_ENV`].
pub const HOME_ENV: &str = "ANDROID_NDK_HOME";

/// Prefix of NDK directories picked up from the working directory.
pub const DIR_PREFIX: &str = "android-ndk";

/// Where an NDK root candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Property,
    Env(&'static str),
    WorkingDirectory,
}

/// Pick the NDK root from the first source that names one.
///
/// Relative roots are resolved against the current directory.
pub fn find_root<P: PathProbe>(probe: &P, working_dir: &Path) -> Option<(PathBuf, RootSource)> {
    if let Some(path) = probe.read_property(PROPERTY) {
        return Some((probe.absolute(Path::new(&path)), RootSource::Property));
    }

    for var in [ROOT_ENV, HOME_ENV] {
        if let Some(path) = probe.read_env(var) {
            return Some((probe.absolute(Path::new(&path)), RootSource::Env(var)));
        }
    }

    let working_dir = probe.absolute(working_dir);
    find_prefixed_dir(probe, &working_dir, DIR_PREFIX)
        .map(|dir| (dir, RootSource::WorkingDirectory))
}

/// Resolve the NDK's prebuilt LLVM `bin` directory.
///
/// The chosen root is final: a root that does not exist, or whose
/// `toolchains/llvm/prebuilt` directory is missing or holds no host
/// toolchain directory, makes the NDK unavailable rather than falling
/// through to later sources. Stray files in `prebuilt` are skipped.
pub fn locate<P: PathProbe>(probe: &P, working_dir: &Path) -> Result<ToolkitLocation, LocateError> {
    let Some((root, source)) = find_root(probe, working_dir) else {
        return Err(LocateError::ToolkitUnavailable {
            kind: ToolkitKind::AndroidNdk,
        });
    };
    tracing::debug!("Android NDK root {} (from {:?})", root.display(), source);

    if !probe.is_dir(&root) {
        tracing::debug!("Android NDK root {} does not exist", root.display());
        return Err(LocateError::ToolkitUnavailable {
            kind: ToolkitKind::AndroidNdk,
        });
    }

    let prebuilt = root.join("toolchains").join("llvm").join("prebuilt");
    let children = probe
        .list_children(&prebuilt)
        .map_err(|e| LocateError::MalformedToolkitLayout {
            kind: ToolkitKind::AndroidNdk,
            root: root.clone(),
            reason: format!("cannot read {}", prebuilt.display()),
            source: Some(e),
        })?;

    let Some(host_toolchain) = children.into_iter().find(|child| probe.is_dir(child)) else {
        return Err(LocateError::MalformedToolkitLayout {
            kind: ToolkitKind::AndroidNdk,
            root,
            reason: format!("{} has no host toolchain directory", prebuilt.display()),
            source: None,
        });
    };

    let extra_includes = root.join("sysroot").join("usr").join("include");

    Ok(ToolkitLocation {
        kind: ToolkitKind::AndroidNdk,
        bin_dir: host_toolchain.join("bin"),
        extra_includes: Some(extra_includes),
        root,
    })
}
