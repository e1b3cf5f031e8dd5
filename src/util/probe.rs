//! Read-only filesystem and environment queries.
//!
//! Everything toolkit discovery needs from the outside world goes through
//! [`PathProbe`], so discovery can be exercised against an in-memory probe.
//! Absence is never fatal: missing variables, properties, or executables
//! come back as `None`, and a missing directory as [`ProbeError::NotFound`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error listing a directory.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view of the host environment.
pub trait PathProbe {
    /// Read an environment variable. Empty values count as unset.
    fn read_env(&self, name: &str) -> Option<String>;

    /// Read an override property (`-D name=value` or config file).
    fn read_property(&self, name: &str) -> Option<String>;

    /// List the entries of a directory, sorted by file name.
    fn list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, ProbeError>;

    /// Whether the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Search the executable search path for a program.
    fn find_on_search_path(&self, executable: &str) -> Option<PathBuf>;

    /// Resolve a relative path against the current directory.
    fn absolute(&self, path: &Path) -> PathBuf;
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn read_env(&self, name: &str) -> Option<String> {
        (**self).read_env(name)
    }

    fn read_property(&self, name: &str) -> Option<String> {
        (**self).read_property(name)
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        (**self).list_children(dir)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn find_on_search_path(&self, executable: &str) -> Option<PathBuf> {
        (**self).find_on_search_path(executable)
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        (**self).absolute(path)
    }
}

/// Probe backed by the real process environment and filesystem.
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    properties: BTreeMap<String, String>,
}

impl SystemProbe {
    pub fn new() -> Self {
        SystemProbe::default()
    }

    /// Use the given override properties.
    pub fn with_properties(properties: BTreeMap<String, String>) -> Self {
        SystemProbe { properties }
    }

    /// Set a single property, replacing any previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }
}

impl PathProbe for SystemProbe {
    fn read_env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    fn read_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
        let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProbeError::NotFound(dir.to_path_buf()),
            _ => ProbeError::Io {
                path: dir.to_path_buf(),
                source: e,
            },
        })?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ProbeError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
            children.push(entry.path());
        }
        children.sort();
        Ok(children)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn find_on_search_path(&self, executable: &str) -> Option<PathBuf> {
        which::which(executable).ok()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
