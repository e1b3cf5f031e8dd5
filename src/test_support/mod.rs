//! Test utilities and mocks for crossdock unit tests.
//!
//! [`MockProbe`] is an in-memory [`PathProbe`]: directories, files,
//! environment variables, properties, and `PATH` executables are all
//! declared up front, so discovery can be tested without touching the
//! real filesystem or process environment.
//!
//! # Example
//!
//! ```rust,ignore
//! use crossdock::test_support::{ndk_install, MockProbe};
//!
//! let mut probe = MockProbe::new();
//! ndk_install(&mut probe, "/work/android-ndk-r21", "linux-x86_64");
//! probe.set_env("ANDROID_NDK_ROOT", "/work/android-ndk-r21");
//! ```

pub mod fixtures;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::util::probe::{PathProbe, ProbeError};

pub use fixtures::*;

/// In-memory probe for testing discovery without real I/O.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
    env: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
    search_path: BTreeMap<String, PathBuf>,
    current_dir: Option<PathBuf>,
}

/// Current directory of a [`MockProbe`] unless one is set.
pub const MOCK_CURRENT_DIR: &str = "/cwd";

impl MockProbe {
    /// Create a new empty mock probe.
    pub fn new() -> Self {
        MockProbe::default()
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let mut current = Some(path.as_ref());
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    /// Add an empty file, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf());
    }

    /// Set an environment variable.
    pub fn set_env(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env.insert(name.into(), value.into());
    }

    /// Set an override property.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Set the directory relative paths resolve against.
    pub fn set_current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.current_dir = Some(dir.into());
    }

    /// Place an executable on the mock `PATH`.
    pub fn add_on_path(&mut self, executable: impl AsRef<Path>) {
        let executable = executable.as_ref();
        self.add_file(executable);
        if let Some(name) = executable.file_name().and_then(|n| n.to_str()) {
            self.search_path
                .entry(name.to_string())
                .or_insert_with(|| executable.to_path_buf());
        }
    }
}

impl PathProbe for MockProbe {
    fn read_env(&self, name: &str) -> Option<String> {
        self.env.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn read_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        if !self.dirs.contains(dir) {
            return Err(ProbeError::NotFound(dir.to_path_buf()));
        }

        let mut children: Vec<PathBuf> = self
            .dirs
            .iter()
            .chain(self.files.iter())
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn find_on_search_path(&self, executable: &str) -> Option<PathBuf> {
        self.search_path.get(executable).cloned()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match &self.current_dir {
            Some(dir) => dir.join(path),
            None => Path::new(MOCK_CURRENT_DIR).join(path),
        }
    }
}

/// Wraps a probe and counts directory listings.
#[derive(Debug, Default)]
pub struct CountingProbe<P> {
    inner: P,
    list_calls: AtomicUsize,
}

impl<P> CountingProbe<P> {
    pub fn new(inner: P) -> Self {
        CountingProbe {
            inner,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `list_children` calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl<P: PathProbe> PathProbe for CountingProbe<P> {
    fn read_env(&self, name: &str) -> Option<String> {
        self.inner.read_env(name)
    }

    fn read_property(&self, name: &str) -> Option<String> {
        self.inner.read_property(name)
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_children(dir)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn find_on_search_path(&self, executable: &str) -> Option<PathBuf> {
        self.inner.find_on_search_path(executable)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.inner.absolute(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_probe_lists_direct_children_only() {
        let mut probe = MockProbe::new();
        probe.add_dir("/a/b/c");
        probe.add_file("/a/z.txt");

        let children = probe.list_children(Path::new("/a")).unwrap();
        assert_eq!(children, vec![PathBuf::from("/a/b"), PathBuf::from("/a/z.txt")]);
        assert!(probe.is_dir(Path::new("/a/b")));
        assert!(!probe.is_dir(Path::new("/a/z.txt")));
    }

    #[test]
    fn test_mock_probe_missing_dir() {
        let probe = MockProbe::new();
        assert!(matches!(
            probe.list_children(Path::new("/nope")),
            Err(ProbeError::NotFound(_))
        ));
    }

    #[test]
    fn test_mock_probe_absolute() {
        let mut probe = MockProbe::new();
        assert_eq!(probe.absolute(Path::new("ndk")), PathBuf::from("/cwd/ndk"));

        probe.set_current_dir("/home/dev");
        assert_eq!(probe.absolute(Path::new("ndk")), PathBuf::from("/home/dev/ndk"));
        assert_eq!(probe.absolute(Path::new("/opt/ndk")), PathBuf::from("/opt/ndk"));
    }

    #[test]
    fn test_mock_probe_search_path() {
        let mut probe = MockProbe::new();
        probe.add_on_path("/opt/bin/xcrun");
        assert_eq!(
            probe.find_on_search_path("xcrun"),
            Some(PathBuf::from("/opt/bin/xcrun"))
        );
        assert_eq!(probe.find_on_search_path("clang"), None);
    }
}
