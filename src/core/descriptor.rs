//! Toolchain descriptors.
//!
//! A descriptor is the declarative result of toolchain resolution: a named
//! compiler family, the targets it services, and for every serviced
//! (target, role) pair the executable to run and the extra arguments to
//! pass it. Descriptors carry data only; invoking the tools is the
//! orchestrator's job.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::core::platform::TargetTriple;

/// The role a tool plays in a native build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolRole {
    CCompiler,
    CppCompiler,
    Linker,
    StaticArchiver,
    Assembler,
    SymbolExtractor,
    Stripper,
}

impl ToolRole {
    /// All roles, in the order they are reported.
    pub const ALL: [ToolRole; 7] = [
        ToolRole::CCompiler,
        ToolRole::CppCompiler,
        ToolRole::Linker,
        ToolRole::StaticArchiver,
        ToolRole::Assembler,
        ToolRole::SymbolExtractor,
        ToolRole::Stripper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolRole::CCompiler => "c-compiler",
            ToolRole::CppCompiler => "cpp-compiler",
            ToolRole::Linker => "linker",
            ToolRole::StaticArchiver => "static-archiver",
            ToolRole::Assembler => "assembler",
            ToolRole::SymbolExtractor => "symbol-extractor",
            ToolRole::Stripper => "stripper",
        }
    }
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c-compiler" | "cc" => Ok(ToolRole::CCompiler),
            "cpp-compiler" | "cxx" => Ok(ToolRole::CppCompiler),
            "linker" | "ld" => Ok(ToolRole::Linker),
            "static-archiver" | "ar" => Ok(ToolRole::StaticArchiver),
            "assembler" | "as" => Ok(ToolRole::Assembler),
            "symbol-extractor" | "objcopy" => Ok(ToolRole::SymbolExtractor),
            "stripper" | "strip" => Ok(ToolRole::Stripper),
            _ => Err(format!("unknown tool role '{}'", s)),
        }
    }
}

/// The compiler family a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection), including MinGW cross compilers
    Gcc,
    /// Clang/LLVM, including the NDK and osxcross drivers
    Clang,
    /// Microsoft Visual C++
    VisualCpp,
}

impl CompilerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::VisualCpp => "visual-cpp",
        }
    }

    /// Default executable for a role before any per-target override.
    pub fn default_executable(&self, role: ToolRole) -> &'static str {
        match (self, role) {
            (CompilerFamily::Gcc, ToolRole::CCompiler) => "gcc",
            (CompilerFamily::Gcc, ToolRole::CppCompiler | ToolRole::Linker) => "g++",
            (CompilerFamily::Clang, ToolRole::CCompiler) => "clang",
            (CompilerFamily::Clang, ToolRole::CppCompiler | ToolRole::Linker) => "clang++",
            (CompilerFamily::Gcc | CompilerFamily::Clang, ToolRole::StaticArchiver) => "ar",
            (CompilerFamily::Gcc | CompilerFamily::Clang, ToolRole::Assembler) => "as",
            (CompilerFamily::Gcc | CompilerFamily::Clang, ToolRole::SymbolExtractor) => "objcopy",
            (CompilerFamily::Gcc | CompilerFamily::Clang, ToolRole::Stripper) => "strip",
            (CompilerFamily::VisualCpp, ToolRole::CCompiler | ToolRole::CppCompiler) => "cl.exe",
            (CompilerFamily::VisualCpp, ToolRole::Linker) => "link.exe",
            (CompilerFamily::VisualCpp, ToolRole::StaticArchiver) => "lib.exe",
            (CompilerFamily::VisualCpp, ToolRole::Assembler) => "ml.exe",
            (CompilerFamily::VisualCpp, ToolRole::SymbolExtractor | ToolRole::Stripper) => "",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An executable name plus the ordered arguments it must always receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInvocation {
    /// The program to run (e.g., "clang++", "x86_64-w64-mingw32-gcc")
    pub executable: String,
    /// Arguments injected ahead of any per-compile arguments
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(executable: impl Into<String>) -> Self {
        ToolInvocation {
            executable: executable.into(),
            args: Vec::new(),
        }
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The complete tool set for one serviced target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetTools {
    pub target: TargetTriple,
    pub tools: BTreeMap<ToolRole, ToolInvocation>,
}

impl TargetTools {
    /// Start from the family defaults for every role.
    pub fn new(target: TargetTriple, family: CompilerFamily) -> Self {
        let tools = ToolRole::ALL
            .iter()
            .map(|&role| (role, ToolInvocation::new(family.default_executable(role))))
            .collect();
        TargetTools { target, tools }
    }

    /// Replace the executable used for a role, keeping its arguments.
    pub fn executable(mut self, role: ToolRole, executable: impl Into<String>) -> Self {
        let executable = executable.into();
        self.tools
            .entry(role)
            .and_modify(|t| t.executable = executable.clone())
            .or_insert_with(|| ToolInvocation::new(executable));
        self
    }

    /// Append arguments to a role's invocation.
    pub fn with_args(mut self, role: ToolRole, args: &[String]) -> Self {
        if let Some(tool) = self.tools.get_mut(&role) {
            tool.args.extend(args.iter().cloned());
        }
        self
    }

    pub fn tool(&self, role: ToolRole) -> Option<&ToolInvocation> {
        self.tools.get(&role)
    }
}

/// A registered toolchain family and everything it services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainDescriptor {
    /// Registration name ("gcc", "osxcross", "androidNdk", "visualCpp")
    pub name: String,
    /// Compiler family
    pub family: CompilerFamily,
    /// Serviced targets with their per-role tools
    pub targets: Vec<TargetTools>,
    /// Directories searched for the executables, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_paths: Vec<PathBuf>,
    /// Pre-resolved macOS SDK directory handed to the downstream toolchain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos_sdk: Option<PathBuf>,
    /// Services the host natively without explicit targets
    pub host_native: bool,
}

impl ToolchainDescriptor {
    pub fn new(name: impl Into<String>, family: CompilerFamily) -> Self {
        ToolchainDescriptor {
            name: name.into(),
            family,
            targets: Vec::new(),
            search_paths: Vec::new(),
            macos_sdk: None,
            host_native: false,
        }
    }

    pub fn target(mut self, tools: TargetTools) -> Self {
        self.targets.push(tools);
        self
    }

    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn macos_sdk(mut self, sdk: Option<PathBuf>) -> Self {
        self.macos_sdk = sdk;
        self
    }

    pub fn host_native(mut self) -> Self {
        self.host_native = true;
        self
    }

    /// Targets this descriptor services.
    pub fn serviced(&self) -> impl Iterator<Item = TargetTriple> + '_ {
        self.targets.iter().map(|t| t.target)
    }

    pub fn services(&self, target: TargetTriple) -> bool {
        self.serviced().any(|t| t == target)
    }

    /// Tools for a serviced target.
    pub fn tools_for(&self, target: TargetTriple) -> Option<&TargetTools> {
        self.targets.iter().find(|t| t.target == target)
    }

    /// The invocation for a (target, role) pair.
    pub fn invocation(&self, target: TargetTriple, role: ToolRole) -> Option<&ToolInvocation> {
        self.tools_for(target).and_then(|t| t.tool(role))
    }
}
