//! Error conversion helpers for HTTP round trips
//!
//! Provides extension traits for cleaner error handling with request context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting transport `io::Result` to `ApplicationResult` with context.
pub trait TransportResultExt<T> {
    /// Add request context to a transport error.
    ///
    /// # Example
    /// ```ignore
    /// self.http.get(&request)
    ///     .with_request_context("fetch DSL", &url)?;
    /// ```
    fn with_request_context(self, action: &str, url: &str) -> ApplicationResult<T>;
}

impl<T> TransportResultExt<T> for io::Result<T> {
    fn with_request_context(self, action: &str, url: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Transport {
            context: format!("{}: {}", action, url),
            source: e,
        })
    }
}
