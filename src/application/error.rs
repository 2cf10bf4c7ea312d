//! Application-level errors (wraps domain errors)

use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add request-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("MASTERGO_TOKEN is not set")]
    TokenMissing,

    #[error("API request failed: HTTP {status}")]
    Api { status: u16, body: String },

    #[error("request failed: {context}")]
    Transport {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid response: {context}")]
    InvalidResponse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to resolve short link {url}: {message}")]
    ShortLink { url: String, message: String },

    #[error("no component documentation could be fetched ({failed} failed)")]
    DocsUnavailable { failed: usize },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Machine-readable error report printed for failed commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    pub error: bool,
    pub code: String,
    pub message: String,
    pub suggestion: String,
}

impl ErrorDescriptor {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Map a non-200 API status to a descriptor; unknown statuses keep the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        const TIMEOUT_SUGGESTION: &str = "Check your network connection and retry later";
        match status {
            401 => Self::new(
                "TOKEN_INVALID",
                "Token is invalid or expired",
                "Generate a new token under MasterGo settings → Security",
            ),
            403 => Self::new(
                "PERMISSION_DENIED",
                "No permission to access this file",
                "Check that 1) the account is on a team plan or above 2) the file lives in a team project (not drafts)",
            ),
            404 => Self::new(
                "NOT_FOUND",
                "File or layer does not exist",
                "Check that the link is correct",
            ),
            408 | 504 => Self::new("TIMEOUT", "Request timed out", TIMEOUT_SUGGESTION),
            _ => {
                let message = if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                };
                Self::new(
                    "UNKNOWN_ERROR",
                    message,
                    "Retry later or contact support",
                )
            }
        }
    }
}

impl ApplicationError {
    /// User-facing descriptor for this error.
    pub fn descriptor(&self) -> ErrorDescriptor {
        const FULL_URL_FORMAT: &str =
            "Use the format https://mastergo.com/file/{fileId}?layer_id={layerId}";
        match self {
            ApplicationError::Domain(DomainError::InvalidUrl(_)) => ErrorDescriptor::new(
                "INVALID_URL",
                self.to_string(),
                FULL_URL_FORMAT,
            ),
            ApplicationError::Domain(DomainError::UnresolvedShortLink { .. })
            | ApplicationError::ShortLink { .. } => ErrorDescriptor::new(
                "SHORT_LINK_FAILED",
                self.to_string(),
                format!("Use a full link instead. {FULL_URL_FORMAT}"),
            ),
            ApplicationError::TokenMissing => ErrorDescriptor::new(
                "TOKEN_MISSING",
                "MASTERGO_TOKEN environment variable is not set",
                "Set it with: export MASTERGO_TOKEN=\"your_token\"",
            ),
            ApplicationError::Api { status, body } => ErrorDescriptor::from_status(*status, body),
            ApplicationError::Transport { source, .. } => ErrorDescriptor::new(
                "REQUEST_FAILED",
                format!("{self}: {source}"),
                "Check your network connection and the API endpoint",
            ),
            ApplicationError::InvalidResponse { source, .. } => ErrorDescriptor::new(
                "INVALID_RESPONSE",
                format!("{self}: {source}"),
                "Check that the endpoint or input file serves MasterGo JSON",
            ),
            ApplicationError::DocsUnavailable { .. } => ErrorDescriptor::new(
                "FETCH_FAILED",
                self.to_string(),
                "Check that the documentation URLs are correct and reachable",
            ),
            ApplicationError::Config { .. } => ErrorDescriptor::new(
                "CONFIG_ERROR",
                self.to_string(),
                "Run `mgdsl config template` for a valid configuration",
            ),
            ApplicationError::OperationFailed { source, .. } => ErrorDescriptor::new(
                "OPERATION_FAILED",
                format!("{self}: {source}"),
                "Run again with -vv for details",
            ),
        }
    }
}
