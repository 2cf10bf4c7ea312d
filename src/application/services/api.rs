//! Authenticated JSON requests against the MasterGo API.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, TransportResultExt};
use crate::config::Settings;
use crate::domain::{parse_json, FileLocator};
use crate::infrastructure::traits::{HttpClient, HttpRequest};

/// Header carrying the personal access token.
pub const TOKEN_HEADER: &str = "X-MG-UserAccessToken";

/// Shared request plumbing for the DSL and meta endpoints.
pub(crate) struct ApiClient {
    http: Arc<dyn HttpClient>,
    settings: Arc<Settings>,
}

impl ApiClient {
    pub(crate) fn new(http: Arc<dyn HttpClient>, settings: Arc<Settings>) -> Self {
        Self { http, settings }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    /// GET `{endpoint}{path}?fileId=..&layerId=..` and parse the body as JSON.
    ///
    /// Any status other than 200 becomes `ApplicationError::Api` with the raw body.
    pub(crate) fn get_json(&self, path: &str, locator: &FileLocator) -> ApplicationResult<Value> {
        let token = self.settings.require_token()?;
        let url = self.settings.api_url(path, locator)?;
        debug!("get_json: url={}", url);

        let request = HttpRequest::get(&url)
            .header(TOKEN_HEADER, token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        let response = self
            .http
            .get(&request)
            .with_request_context("GET", &url)?;
        debug!("get_json: status={} bytes={}", response.status, response.body.len());

        if !response.is_ok() {
            return Err(ApplicationError::Api {
                status: response.status,
                body: response.body,
            });
        }

        parse_json(&response.body).map_err(|e| ApplicationError::InvalidResponse {
            context: format!("parse JSON from {url}"),
            source: e,
        })
    }
}
