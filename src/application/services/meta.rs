//! Site metadata service
//!
//! The meta endpoint returns an XML-like page list used to crawl multi-page sites.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::services::api::ApiClient;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{parse_actions, FileLocator, MetaAction};
use crate::infrastructure::traits::HttpClient;

const META_PATH: &str = "/mcp/meta";

/// Rules used when the response does not carry its own.
pub const META_RULES: [&str; 3] = [
    "Iterate over the layerId of every action to fetch the DSL of each page",
    "Parse the interactive field to discover navigation between pages",
    "Recursively fetch target pages until no further navigation remains",
];

/// Page list of a site plus the actions parsed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub actions: Vec<MetaAction>,
    pub rules: Vec<String>,
}

/// Service fetching site metadata from the API.
pub struct MetaService {
    api: ApiClient,
}

impl MetaService {
    pub fn new(http: Arc<dyn HttpClient>, settings: Arc<Settings>) -> Self {
        Self {
            api: ApiClient::new(http, settings),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn fetch(&self, locator: &FileLocator) -> ApplicationResult<MetaResponse> {
        let body = self.api.get_json(META_PATH, locator)?;

        let result = body.get("result").and_then(Value::as_str).map(str::to_string);
        let actions = parse_actions(result.as_deref().unwrap_or_default());
        debug!("fetch: {} actions", actions.len());

        let rules = body
            .get("rules")
            .and_then(|r| serde_json::from_value::<Vec<String>>(r.clone()).ok())
            .unwrap_or_else(|| META_RULES.iter().map(|r| r.to_string()).collect());

        Ok(MetaResponse {
            result,
            actions,
            rules,
        })
    }
}
