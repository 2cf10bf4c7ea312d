//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::{ApplicationError, ErrorDescriptor};
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exitcode;

        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::InvalidUrl(_)) => exitcode::USAGE,
                ApplicationError::TokenMissing | ApplicationError::Config { .. } => {
                    exitcode::CONFIG
                }
                ApplicationError::Api { status: 401 | 403, .. } => exitcode::NOPERM,
                ApplicationError::InvalidResponse { .. } => exitcode::DATAERR,
                ApplicationError::Domain(DomainError::UnresolvedShortLink { .. })
                | ApplicationError::ShortLink { .. }
                | ApplicationError::Api { .. }
                | ApplicationError::Transport { .. }
                | ApplicationError::DocsUnavailable { .. } => exitcode::UNAVAILABLE,
                ApplicationError::OperationFailed { .. } => exitcode::SOFTWARE,
            },
        }
    }

    /// User-facing descriptor printed as JSON.
    pub fn descriptor(&self) -> ErrorDescriptor {
        match self {
            CliError::Infra(InfraError::Application(e)) => e.descriptor(),
            CliError::Infra(InfraError::Io { source, .. }) => ErrorDescriptor::new(
                "IO_ERROR",
                format!("{self}: {source}"),
                "Check that the file exists and is readable",
            ),
            CliError::InvalidArgs(_) | CliError::Usage(_) => ErrorDescriptor::new(
                "MISSING_ARGS",
                self.to_string(),
                "Provide a url, or both --file-id and --layer-id",
            ),
        }
    }
}
