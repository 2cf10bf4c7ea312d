//! DSL fetching service

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::services::api::ApiClient;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{extract_component_links, FileLocator};
use crate::infrastructure::traits::HttpClient;

const DSL_PATH: &str = "/mcp/dsl";

/// Rules shipped with every DSL response, ahead of configured extras.
pub const DSL_RULES: [&str; 2] = [
    "token field must be generated as a variable (colors, shadows, fonts, etc.) \
     and the token field must be displayed in the comment",
    "componentDocumentLinks is a list of frontend component documentation links used in the DSL layer, \
     designed to help you understand how to use the components. \
     When it exists and is not empty, you need to fetch all component documentation content, \
     understand component usage, and generate code using the components.",
];

/// DSL of one layer, enriched with its component documentation links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DslResponse {
    pub dsl: Value,
    pub component_document_links: Vec<String>,
    pub rules: Vec<String>,
}

/// Service fetching layer DSL from the API.
pub struct DslService {
    api: ApiClient,
}

impl DslService {
    pub fn new(http: Arc<dyn HttpClient>, settings: Arc<Settings>) -> Self {
        Self {
            api: ApiClient::new(http, settings),
        }
    }

    /// Fetch the DSL of a layer.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch(&self, locator: &FileLocator) -> ApplicationResult<DslResponse> {
        let dsl = self.api.get_json(DSL_PATH, locator)?;
        let component_document_links = extract_component_links(&dsl);
        debug!(
            "fetch: {} component document links",
            component_document_links.len()
        );

        let rules = DSL_RULES
            .iter()
            .map(|r| r.to_string())
            .chain(self.api.settings().rules.iter().cloned())
            .collect();

        Ok(DslResponse {
            dsl,
            component_document_links,
            rules,
        })
    }
}
