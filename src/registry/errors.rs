//! Registration errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::builder::ArgumentError;
use crate::core::platform::TargetTriple;
use crate::util::diagnostic::Diagnostic;

/// Error during the registration pass. Unlike a missing toolkit, these are
/// configuration bugs and abort registration.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RegistryError {
    #[error("target `{target}` is claimed by both `{first}` and `{second}`")]
    #[diagnostic(
        code(crossdock::registry::conflict),
        help("each target must be serviced by exactly one toolchain family")
    )]
    ConfigurationConflict {
        target: TargetTriple,
        first: String,
        second: String,
    },

    #[error("cannot build arguments for `{toolchain}`: {source}")]
    #[diagnostic(code(crossdock::registry::arguments))]
    Arguments {
        toolchain: String,
        #[source]
        source: ArgumentError,
    },
}

impl RegistryError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryError::ConfigurationConflict {
                target,
                first,
                second,
            } => Diagnostic::error(self.to_string())
                .with_context(format!("`{}` registered `{}` first", first, target))
                .with_context(format!("`{}` registered it again", second))
                .with_suggestion("Remove the target from one of the toolchain families"),

            RegistryError::Arguments { toolchain, source } => {
                Diagnostic::error(format!("toolchain `{}` is misconfigured", toolchain))
                    .with_context(source.to_string())
            }
        }
    }
}
