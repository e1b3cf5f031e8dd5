//! osxcross discovery.

use std::path::{Path, PathBuf};

use super::{find_prefixed_dir, LocateError, ToolkitKind, ToolkitLocation};
use crate::util::probe::PathProbe;

/// Property naming the osxcross `bin` directory.
pub const PROPERTY: &str = "osxcrossBin";

/// Prefix of osxcross checkouts picked up from the working directory.
pub const DIR_PREFIX: &str = "osxcross";

/// Tool whose presence on `PATH` marks an osxcross `bin` directory.
pub const XCRUN: &str = "xcrun";

/// Resolve the osxcross `bin` directory.
pub fn locate<P: PathProbe>(probe: &P, working_dir: &Path) -> Result<ToolkitLocation, LocateError> {
    let bin_dir = find_bin_dir(probe, working_dir).ok_or(LocateError::ToolkitUnavailable {
        kind: ToolkitKind::Osxcross,
    })?;

    let root = bin_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| bin_dir.clone());

    Ok(ToolkitLocation {
        kind: ToolkitKind::Osxcross,
        root,
        bin_dir,
        extra_includes: None,
    })
}

fn find_bin_dir<P: PathProbe>(probe: &P, working_dir: &Path) -> Option<PathBuf> {
    if let Some(bin) = probe.read_property(PROPERTY) {
        tracing::debug!("osxcross bin from property `{}`", PROPERTY);
        return Some(probe.absolute(Path::new(&bin)));
    }

    let working_dir = probe.absolute(working_dir);
    if let Some(checkout) = find_prefixed_dir(probe, &working_dir, DIR_PREFIX) {
        tracing::debug!("osxcross checkout in working directory: {}", checkout.display());
        return Some(checkout.join("target").join("bin"));
    }

    let xcrun = probe.find_on_search_path(XCRUN)?;
    tracing::debug!("osxcross bin from `{}` on PATH", xcrun.display());
    xcrun.parent().map(|dir| probe.absolute(dir))
}

/// `binutils/bin` next to the osxcross `bin` directory.
pub fn binutils_dir(location: &ToolkitLocation) -> PathBuf {
    location.root.join("binutils").join("bin")
}

/// First SDK directory under `<root>/SDK`, if any.
pub fn find_sdk<P: PathProbe>(probe: &P, location: &ToolkitLocation) -> Option<PathBuf> {
    let sdk_root = location.root.join("SDK");
    match probe.list_children(&sdk_root) {
        Ok(children) => children.into_iter().find(|child| probe.is_dir(child)),
        Err(e) => {
            tracing::debug!("No macOS SDK: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{osxcross_install, MockProbe};

    #[test]
    fn test_property_bin_dir() {
        let mut probe = MockProbe::new();
        probe.set_property(PROPERTY, "/opt/osxcross/target/bin");

        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/opt/osxcross/target/bin"));
        assert_eq!(location.root, PathBuf::from("/opt/osxcross/target"));
        assert_eq!(
            binutils_dir(&location),
            PathBuf::from("/opt/osxcross/target/binutils/bin")
        );
    }

    #[test]
    fn test_working_directory_checkout() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &[]);

        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/work/osxcross/target/bin"));
    }

    #[test]
    fn test_property_beats_working_directory() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &[]);
        probe.set_property(PROPERTY, "/elsewhere/bin");

        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/elsewhere/bin"));
    }

    #[test]
    fn test_xcrun_on_path_is_last_resort() {
        let mut probe = MockProbe::new();
        probe.add_on_path("/usr/local/osxcross/bin/xcrun");

        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/usr/local/osxcross/bin"));

        osxcross_install(&mut probe, "/work/osxcross", &[]);
        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/work/osxcross/target/bin"));
    }

    #[test]
    fn test_unavailable() {
        let err = locate(&MockProbe::new(), Path::new("/work")).unwrap_err();
        assert_eq!(err.kind(), ToolkitKind::Osxcross);
    }

    #[test]
    fn test_find_sdk_first_entry() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &["MacOSX10.15.sdk", "MacOSX10.14.sdk"]);
        let location = locate(&probe, Path::new("/work")).unwrap();

        assert_eq!(
            find_sdk(&probe, &location),
            Some(PathBuf::from("/work/osxcross/target/SDK/MacOSX10.14.sdk"))
        );
    }

    #[test]
    fn test_find_sdk_skips_files() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &["MacOSX10.15.sdk"]);
        probe.add_file("/work/osxcross/target/SDK/.DS_Store");
        probe.add_file("/work/osxcross/target/SDK/MacOSX10.14.sdk.tar.xz");
        let location = locate(&probe, Path::new("/work")).unwrap();

        assert_eq!(
            find_sdk(&probe, &location),
            Some(PathBuf::from("/work/osxcross/target/SDK/MacOSX10.15.sdk"))
        );
    }

    #[test]
    fn test_relative_bin_dir_is_made_absolute() {
        let mut probe = MockProbe::new();
        probe.set_current_dir("/home/dev");
        probe.set_property(PROPERTY, "osxcross/target/bin");

        let location = locate(&probe, Path::new("/work")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/home/dev/osxcross/target/bin"));
        assert_eq!(location.root, PathBuf::from("/home/dev/osxcross/target"));

        let mut probe = MockProbe::new();
        probe.set_current_dir("/home/dev");
        osxcross_install(&mut probe, "/home/dev/proj/osxcross", &[]);

        let location = locate(&probe, Path::new("proj")).unwrap();
        assert_eq!(location.bin_dir, PathBuf::from("/home/dev/proj/osxcross/target/bin"));
    }

    #[test]
    fn test_find_sdk_missing() {
        let mut probe = MockProbe::new();
        osxcross_install(&mut probe, "/work/osxcross", &[]);
        let location = locate(&probe, Path::new("/work")).unwrap();

        assert_eq!(find_sdk(&probe, &location), None);
    }
}
