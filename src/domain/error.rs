//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent identifier and link violations.
/// The pure extractors never fail; these are raised by callers that need a value.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid MasterGo URL: {0}")]
    InvalidUrl(String),

    #[error("could not extract fileId and layerId from {target} (resolved from {url})")]
    UnresolvedShortLink { url: String, target: String },
}
