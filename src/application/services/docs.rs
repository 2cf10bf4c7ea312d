//! Component documentation fetching
//!
//! Documentation links come from the DSL; each points at a Markdown/MDX page.
//! Fetches run in parallel and one failure never aborts the others.

use std::collections::BTreeMap;
use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::extract_component_links;
use crate::infrastructure::traits::{HttpClient, HttpRequest};

const DOC_ACCEPT: &str = "text/markdown, text/plain, */*";

/// Outcome of fetching one documentation URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFetch {
    pub url: String,
    pub outcome: Result<String, String>,
}

/// Outcomes in input order, one per unique URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsReport {
    pub fetches: Vec<DocFetch>,
}

#[derive(Serialize)]
struct DocsJson<'a> {
    docs: BTreeMap<&'a str, &'a str>,
    errors: Option<Vec<&'a str>>,
}

impl DocsReport {
    /// Successfully fetched `(url, content)` pairs.
    pub fn docs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fetches
            .iter()
            .filter_map(|f| f.outcome.as_deref().ok().map(|c| (f.url.as_str(), c)))
    }

    /// Error messages of failed fetches.
    pub fn errors(&self) -> Vec<&str> {
        self.fetches
            .iter()
            .filter_map(|f| f.outcome.as_ref().err().map(String::as_str))
            .collect()
    }

    /// True if there was something to fetch and nothing succeeded.
    pub fn is_total_failure(&self) -> bool {
        !self.fetches.is_empty() && self.docs().next().is_none()
    }

    /// `{"docs": {url: content}, "errors": [...] | null}`; empty documents are left out.
    pub fn to_json(&self) -> Value {
        let errors = self.errors();
        let report = DocsJson {
            docs: self.docs().filter(|(_, c)| !c.is_empty()).collect(),
            errors: if errors.is_empty() { None } else { Some(errors) },
        };
        serde_json::to_value(report).unwrap_or(Value::Null)
    }
}

/// Documentation links from a `dsl` command output or a raw DSL document.
///
/// A pre-extracted `componentDocumentLinks` array wins over walking the tree.
pub fn links_from_dsl_output(value: &Value) -> Vec<String> {
    match value.get("componentDocumentLinks").and_then(Value::as_array) {
        Some(links) => links
            .iter()
            .filter_map(Value::as_str)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        None => extract_component_links(value),
    }
}

/// Service fetching component documentation pages.
pub struct DocsService {
    http: Arc<dyn HttpClient>,
}

impl DocsService {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch every unique URL, keeping first-seen order.
    #[instrument(level = "debug", skip_all, fields(count = urls.len()))]
    pub fn fetch_all(&self, urls: &[String]) -> DocsReport {
        let unique: Vec<&String> = urls.iter().unique().collect();
        debug!("fetch_all: {} unique urls", unique.len());

        let fetches = unique
            .par_iter()
            .map(|url| DocFetch {
                url: url.to_string(),
                outcome: self.fetch_one(url),
            })
            .collect();

        DocsReport { fetches }
    }

    fn fetch_one(&self, url: &str) -> Result<String, String> {
        let request = HttpRequest::get(url).header("Accept", DOC_ACCEPT);
        match self.http.get(&request) {
            Ok(response) if response.is_ok() => Ok(response.body),
            Ok(response) => {
                warn!("fetch_one: HTTP {} for {}", response.status, url);
                Err(format!("HTTP {} fetching {}", response.status, url))
            }
            Err(e) => {
                warn!("fetch_one: {} for {}", e, url);
                Err(format!("Network error fetching {url}: {e}"))
            }
        }
    }
}
