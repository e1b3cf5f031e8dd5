//! Configuration file support for crossdock.
//!
//! crossdock supports two configuration file locations:
//! - Global: `~/.crossdock/config.toml` - User-wide defaults
//! - Project: `.crossdock/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! Toolkit paths set here are handed to discovery as override properties,
//! so they rank above environment variables. Properties given on the
//! command line (`-D androidNdk=...`) rank above both files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::platform::{TargetParseError, TargetTriple};
use crate::toolkit::{ndk, osxcross};

/// crossdock configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Toolkit locations
    pub toolkits: ToolkitsConfig,

    /// Build settings
    pub build: BuildConfig,
}

/// Explicit toolkit locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ToolkitsConfig {
    /// Android NDK install root (e.g., /opt/android-ndk-r21)
    pub android_ndk: Option<PathBuf>,

    /// osxcross `bin` directory (e.g., /opt/osxcross/target/bin)
    pub osxcross_bin: Option<PathBuf>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Declared build targets (e.g., "linux_x86-64"). None = all targets.
    pub targets: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.toolkits.android_ndk.is_some() {
            self.toolkits.android_ndk = other.toolkits.android_ndk;
        }
        if other.toolkits.osxcross_bin.is_some() {
            self.toolkits.osxcross_bin = other.toolkits.osxcross_bin;
        }

        // Target lists replace rather than extend
        if other.build.targets.is_some() {
            self.build.targets = other.build.targets;
        }
    }

    /// Toolkit locations as discovery override properties.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut properties = BTreeMap::new();
        if let Some(ndk) = &self.toolkits.android_ndk {
            properties.insert(ndk::PROPERTY.to_string(), ndk.display().to_string());
        }
        if let Some(bin) = &self.toolkits.osxcross_bin {
            properties.insert(osxcross::PROPERTY.to_string(), bin.display().to_string());
        }
        properties
    }

    /// Declared targets, defaulting to every known target.
    pub fn declared_targets(&self) -> Result<Vec<TargetTriple>, TargetParseError> {
        match &self.build.targets {
            Some(targets) => targets.iter().map(|t| t.parse()).collect(),
            None => Ok(TargetTriple::ALL.to_vec()),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.crossdock/config.toml)
/// 2. Global config (~/.crossdock/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    // Project config overrides global
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global crossdock config directory (~/.crossdock).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".crossdock"))
}

/// Get the global config path (~/.crossdock/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.crossdock/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".crossdock").join("config.toml")
}
