//! Host and target platform identities.
//!
//! The host platform is detected once per process. Target triples come
//! from a fixed, closed set of (operating system, architecture) pairs;
//! anything outside that set cannot be constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Android API level embedded in every clang `-target` string.
pub const ANDROID_API_LEVEL: u32 = 21;

/// The operating system running the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Linux,
    Windows,
    #[serde(rename = "macos")]
    MacOS,
    Other,
}

impl HostPlatform {
    /// Detect the host platform of the running process.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => HostPlatform::Linux,
            "windows" => HostPlatform::Windows,
            "macos" => HostPlatform::MacOS,
            _ => HostPlatform::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostPlatform::Linux => "linux",
            HostPlatform::Windows => "windows",
            HostPlatform::MacOS => "macos",
            HostPlatform::Other => "other",
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(HostPlatform::Linux),
            "windows" => Ok(HostPlatform::Windows),
            "macos" | "osx" | "darwin" => Ok(HostPlatform::MacOS),
            "other" => Ok(HostPlatform::Other),
            _ => Err(format!(
                "invalid host '{}'; expected 'linux', 'windows', 'macos', or 'other'",
                s
            )),
        }
    }
}

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetOs {
    Linux,
    Windows,
    MacOS,
    Android,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Windows => "windows",
            TargetOs::MacOS => "macos",
            TargetOs::Android => "android",
        }
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    X86,
    X86_64,
    Armv7a,
    Arm64V8a,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86-64",
            Arch::Armv7a => "armv7a",
            Arch::Arm64V8a => "arm64-v8a",
        }
    }
}

/// Error parsing a target triple string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("malformed target `{0}`: expected `<os>_<arch>`")]
    Malformed(String),

    #[error("unknown target `{0}`")]
    UnknownTarget(String),
}

/// A compilation target: an (operating system, architecture) pair.
///
/// Only the combinations in [`TargetTriple::ALL`] exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetTriple {
    os: TargetOs,
    arch: Arch,
}

impl TargetTriple {
    pub const LINUX_X86: TargetTriple = TargetTriple::raw(TargetOs::Linux, Arch::X86);
    pub const LINUX_X86_64: TargetTriple = TargetTriple::raw(TargetOs::Linux, Arch::X86_64);
    pub const WINDOWS_X86: TargetTriple = TargetTriple::raw(TargetOs::Windows, Arch::X86);
    pub const WINDOWS_X86_64: TargetTriple = TargetTriple::raw(TargetOs::Windows, Arch::X86_64);
    pub const MACOS_X86_64: TargetTriple = TargetTriple::raw(TargetOs::MacOS, Arch::X86_64);
    pub const ANDROID_ARMV7A: TargetTriple = TargetTriple::raw(TargetOs::Android, Arch::Armv7a);
    pub const ANDROID_ARM64_V8A: TargetTriple =
        TargetTriple::raw(TargetOs::Android, Arch::Arm64V8a);
    pub const ANDROID_X86: TargetTriple = TargetTriple::raw(TargetOs::Android, Arch::X86);
    pub const ANDROID_X86_64: TargetTriple = TargetTriple::raw(TargetOs::Android, Arch::X86_64);

    /// Every supported target, in declaration order.
    pub const ALL: [TargetTriple; 9] = [
        TargetTriple::WINDOWS_X86,
        TargetTriple::WINDOWS_X86_64,
        TargetTriple::MACOS_X86_64,
        TargetTriple::LINUX_X86,
        TargetTriple::LINUX_X86_64,
        TargetTriple::ANDROID_ARMV7A,
        TargetTriple::ANDROID_ARM64_V8A,
        TargetTriple::ANDROID_X86,
        TargetTriple::ANDROID_X86_64,
    ];

    /// The four Android targets.
    pub const ANDROID: [TargetTriple; 4] = [
        TargetTriple::ANDROID_ARMV7A,
        TargetTriple::ANDROID_ARM64_V8A,
        TargetTriple::ANDROID_X86,
        TargetTriple::ANDROID_X86_64,
    ];

    const fn raw(os: TargetOs, arch: Arch) -> Self {
        TargetTriple { os, arch }
    }

    /// Construct a triple, returning `None` for unsupported combinations.
    pub fn new(os: TargetOs, arch: Arch) -> Option<Self> {
        let triple = TargetTriple::raw(os, arch);
        TargetTriple::ALL.contains(&triple).then_some(triple)
    }

    pub fn os(&self) -> TargetOs {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// The GNU-style prefix used for binutils of this target
    /// (`arm-linux-androideabi`, `x86_64-w64-mingw32`, ...).
    ///
    /// Native Linux targets have no prefix.
    pub fn canonical_prefix(&self) -> Option<&'static str> {
        match (self.os, self.arch) {
            (TargetOs::Windows, Arch::X86) => Some("i686-w64-mingw32"),
            (TargetOs::Windows, Arch::X86_64) => Some("x86_64-w64-mingw32"),
            (TargetOs::MacOS, Arch::X86_64) => Some("x86_64-apple-darwin19"),
            (TargetOs::Android, Arch::Armv7a) => Some("arm-linux-androideabi"),
            (TargetOs::Android, Arch::Arm64V8a) => Some("aarch64-linux-android"),
            (TargetOs::Android, Arch::X86) => Some("i686-linux-android"),
            (TargetOs::Android, Arch::X86_64) => Some("x86_64-linux-android"),
            _ => None,
        }
    }

    /// The clang `-target` value for an Android triple at the given API level.
    pub fn android_target(&self, api_level: u32) -> Option<String> {
        let base = match (self.os, self.arch) {
            (TargetOs::Android, Arch::Armv7a) => "armv7a-linux-androideabi",
            (TargetOs::Android, Arch::Arm64V8a) => "aarch64-linux-android",
            (TargetOs::Android, Arch::X86) => "i686-linux-android",
            (TargetOs::Android, Arch::X86_64) => "x86_64-linux-android",
            _ => return None,
        };
        Some(format!("{}{}", base, api_level))
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os.as_str(), self.arch.as_str())
    }
}

impl FromStr for TargetTriple {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, arch) = s
            .split_once('_')
            .ok_or_else(|| TargetParseError::Malformed(s.to_string()))?;

        let os = match os {
            "linux" => TargetOs::Linux,
            "windows" => TargetOs::Windows,
            "macos" => TargetOs::MacOS,
            "android" => TargetOs::Android,
            _ => return Err(TargetParseError::UnknownTarget(s.to_string())),
        };

        // Accept the underscore spelling of x86-64 as well
        let arch = match arch {
            "x86" => Arch::X86,
            "x86-64" | "x86_64" => Arch::X86_64,
            "armv7a" => Arch::Armv7a,
            "arm64-v8a" => Arch::Arm64V8a,
            _ => return Err(TargetParseError::UnknownTarget(s.to_string())),
        };

        TargetTriple::new(os, arch).ok_or_else(|| TargetParseError::UnknownTarget(s.to_string()))
    }
}

impl Serialize for TargetTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
