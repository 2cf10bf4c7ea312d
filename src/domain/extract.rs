//! Tree extractors: component documentation links, navigation edges, texts and tokens.
//!
//! All extractors share the traversal in [`DslDocument::walk`] and never fail:
//! missing or malformed fields simply contribute nothing.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde_json::Value;
use tracing::{instrument, trace};

use crate::domain::document::DslDocument;
use crate::domain::entities::{DesignToken, NavigationEdge, TextEntry};

/// Layer type carrying text content.
const TEXT_NODE: &str = "TEXT";

/// Unique component documentation URLs, in first-seen order.
#[instrument(level = "debug", skip_all)]
pub fn extract_component_links(dsl: &Value) -> Vec<String> {
    let mut links = Vec::new();
    DslDocument::new(dsl).walk(|node| {
        if let Some(link) = node.component_doc_link() {
            links.push(link);
        }
    });
    let links: Vec<String> = links.into_iter().unique().map(str::to_string).collect();
    trace!("extract_component_links: {} unique links", links.len());
    links
}

/// Navigation edges in traversal order, not deduplicated.
#[instrument(level = "debug", skip_all)]
pub fn extract_navigations(dsl: &Value) -> Vec<NavigationEdge> {
    let mut edges = Vec::new();
    DslDocument::new(dsl).walk(|node| {
        for target in node.navigation_targets() {
            edges.push(NavigationEdge {
                source_id: node.id().map(str::to_string),
                target_layer_id: target.to_string(),
            });
        }
    });
    trace!("extract_navigations: {} edges", edges.len());
    edges
}

/// Text content of every `TEXT` node with non-empty characters.
pub fn extract_texts(dsl: &Value) -> Vec<TextEntry> {
    let mut texts = Vec::new();
    DslDocument::new(dsl).walk(|node| {
        if node.kind() != Some(TEXT_NODE) {
            return;
        }
        if let Some(text) = node.characters() {
            texts.push(TextEntry {
                id: node.id().map(str::to_string),
                name: node.name().map(str::to_string),
                text: text.to_string(),
            });
        }
    });
    texts
}

/// Design tokens from `localStyleMap`, keyed by CSS variable name.
///
/// The variable defaults to `--{tokenId}` when the entry does not declare one.
pub fn extract_tokens(dsl: &Value) -> BTreeMap<String, DesignToken> {
    let doc = DslDocument::new(dsl);
    let Some(style_map) = doc.local_style_map() else {
        return BTreeMap::new();
    };

    style_map
        .iter()
        .map(|(token_id, token)| {
            let text = |key: &str| {
                token
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let variable = token
                .get("variable")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("--{token_id}"));
            let entry = DesignToken {
                id: token_id.clone(),
                name: text("name"),
                kind: text("type"),
                value: token.get("value").cloned().unwrap_or(Value::Null),
            };
            (variable, entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_link_on_root_and_in_nodes_when_extracting_then_both_found() {
        let dsl = json!({
            "componentInfo": { "componentSetDocumentLink": ["https://docs/root.mdx"] },
            "nodes": [
                { "componentInfo": { "componentSetDocumentLink": ["https://docs/button.mdx", "https://docs/ignored.mdx"] } }
            ]
        });
        assert_eq!(
            extract_component_links(&dsl),
            vec!["https://docs/button.mdx", "https://docs/root.mdx"]
        );
    }

    #[test]
    fn given_empty_first_link_when_extracting_then_skipped() {
        let dsl = json!({
            "nodes": [{ "componentInfo": { "componentSetDocumentLink": ["", "https://docs/x.mdx"] } }]
        });
        assert!(extract_component_links(&dsl).is_empty());
    }

    #[test]
    fn given_navigation_without_target_when_extracting_then_skipped() {
        let dsl = json!({
            "nodes": [{ "id": "1:1", "interactive": [
                { "type": "navigation" },
                { "type": "navigation", "targetLayerId": "" },
                { "type": "navigation", "targetLayerId": "0:9" }
            ]}]
        });
        assert_eq!(
            extract_navigations(&dsl),
            vec![NavigationEdge {
                source_id: Some("1:1".into()),
                target_layer_id: "0:9".into()
            }]
        );
    }

    #[test]
    fn given_text_nodes_when_extracting_texts_then_only_non_empty_text_kept() {
        let dsl = json!({
            "nodes": [{ "id": "1", "type": "FRAME", "children": [
                { "id": "2", "type": "TEXT", "name": "Title", "characters": "Hello" },
                { "id": "3", "type": "TEXT", "characters": "" },
                { "id": "4", "type": "RECT", "characters": "not text" }
            ]}]
        });
        let texts = extract_texts(&dsl);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].id.as_deref(), Some("2"));
        assert_eq!(texts[0].name.as_deref(), Some("Title"));
        assert_eq!(texts[0].text, "Hello");
    }

    #[test]
    fn given_style_map_when_extracting_tokens_then_keyed_by_variable() {
        let dsl = json!({ "dsl": { "localStyleMap": {
            "s1": { "variable": "--brand-primary", "name": "brand-primary", "type": "color", "value": "#1890ff" },
            "s2": { "name": "shadow" }
        }}});
        let tokens = extract_tokens(&dsl);
        assert_eq!(tokens.len(), 2);
        let brand = &tokens["--brand-primary"];
        assert_eq!(brand.id, "s1");
        assert_eq!(brand.kind, "color");
        assert_eq!(brand.value, json!("#1890ff"));
        let shadow = &tokens["--s2"];
        assert_eq!(shadow.name, "shadow");
        assert_eq!(shadow.kind, "");
        assert_eq!(shadow.value, Value::Null);
    }

    #[test]
    fn given_no_style_map_when_extracting_tokens_then_empty() {
        assert!(extract_tokens(&json!({ "nodes": [] })).is_empty());
    }
}
