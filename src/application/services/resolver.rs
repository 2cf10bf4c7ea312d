//! Share link resolution
//!
//! Turns a user-supplied target (full URL, short link or explicit ids)
//! into a file/layer locator.

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{is_short_link, parse_file_url, DomainError, FileLocator, Target};
use crate::infrastructure::traits::{HttpClient, HttpRequest};

/// Service resolving share links to locators.
pub struct LinkResolver {
    http: Arc<dyn HttpClient>,
}

impl LinkResolver {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Resolve a target to `(fileId, layerId)`.
    ///
    /// Short links cost one request; full URLs and ids are resolved locally.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, target: &Target) -> ApplicationResult<FileLocator> {
        match target {
            Target::Ids(locator) => Ok(locator.clone()),
            Target::Url(url) if is_short_link(url) => {
                let full = self.expand_short_link(url)?;
                debug!("resolve: {} -> {}", url, full);
                parse_file_url(&full).ok_or_else(|| {
                    DomainError::UnresolvedShortLink {
                        url: url.clone(),
                        target: full,
                    }
                    .into()
                })
            }
            Target::Url(url) => {
                parse_file_url(url).ok_or_else(|| DomainError::InvalidUrl(url.clone()).into())
            }
        }
    }

    /// Follow one redirect hop of a short link and return its `Location`.
    ///
    /// Relative locations are resolved against the short link.
    pub fn expand_short_link(&self, url: &str) -> ApplicationResult<String> {
        let short_link_error = |message: String| ApplicationError::ShortLink {
            url: url.to_string(),
            message,
        };

        let response = self
            .http
            .get(&HttpRequest::get(url).no_redirects())
            .map_err(|e| short_link_error(e.to_string()))?;

        if !response.is_redirect() {
            return Err(short_link_error(format!(
                "expected a redirect, got HTTP {}",
                response.status
            )));
        }

        let location = response
            .location
            .filter(|l| !l.is_empty())
            .ok_or_else(|| short_link_error("redirect without Location header".to_string()))?;

        Ok(Url::parse(url)
            .and_then(|base| base.join(&location))
            .map(String::from)
            .unwrap_or(location))
    }
}
