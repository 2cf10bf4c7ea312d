//! Component tree summaries and whole-document analysis.

use serde::Serialize;
use serde_json::Value;
use termtree::Tree;

use crate::domain::document::{DslDocument, NodeRef};
use crate::domain::entities::TextEntry;
use crate::domain::extract::{extract_component_links, extract_texts};

const DEFAULT_TAG: &str = "div";
const UNKNOWN: &str = "unknown";
const MAX_LISTED_TEXTS: usize = 20;

/// Simplified view of one layer and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_doc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSummary>,
}

impl NodeSummary {
    fn from_node(node: NodeRef<'_>) -> Self {
        let value = node.value();
        let tag = value
            .get("style")
            .and_then(|s| s.get("tag"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TAG)
            .to_string();

        Self {
            id: node.id().map(str::to_string),
            kind: node.kind().map(str::to_string),
            name: node.name().map(str::to_string),
            tag,
            size: layout_size(value),
            text: node.characters().map(str::to_string),
            component_doc: node.component_doc_link().map(str::to_string),
            navigate_to: node.navigation_targets().last().map(str::to_string),
            children: node.children().map(Self::from_node).collect(),
        }
    }

    fn label(&self) -> String {
        let mut label = format!(
            "[{}] {}",
            self.kind.as_deref().unwrap_or("?"),
            self.name.as_deref().unwrap_or("unnamed")
        );
        if let Some(size) = &self.size {
            label.push_str(&format!(" ({size})"));
        }
        if let Some(text) = &self.text {
            label.push_str(&format!(" \"{}\"", truncate(text, 50)));
        }
        label.push_str(&format!(" <{}>", self.tag));
        if let Some(target) = &self.navigate_to {
            label.push_str(&format!(" → {target}"));
        }
        label
    }

    fn to_tree(&self) -> Tree<String> {
        Tree::new(self.label()).with_leaves(self.children.iter().map(Self::to_tree))
    }

    fn flatten_into(&self, parent_path: &str, lines: &mut Vec<String>) {
        let name = self.name.as_deref().unwrap_or("unnamed");
        let path = if parent_path.is_empty() {
            name.to_string()
        } else {
            format!("{parent_path}/{name}")
        };

        let mut line = format!("[{}] {}", self.kind.as_deref().unwrap_or("?"), path);
        if let Some(size) = &self.size {
            line.push_str(&format!(" | {size}"));
        }
        if let Some(text) = &self.text {
            line.push_str(&format!(" | \"{}\"", truncate(text, 50)));
        }
        lines.push(line);

        for child in &self.children {
            child.flatten_into(&path, lines);
        }
    }
}

/// `"{w}x{h}"` from `layout.width.value` / `layout.height.value`.
fn layout_size(node: &Value) -> Option<String> {
    let layout = node.get("layout")?;
    let width = layout.get("width").filter(|w| is_non_empty_object(w))?;
    let height = layout.get("height").filter(|h| is_non_empty_object(h))?;
    Some(format!("{}x{}", dimension(width), dimension(height)))
}

fn is_non_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|o| !o.is_empty())
}

fn dimension(extent: &Value) -> String {
    match extent.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "?".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// The root takes part in summaries only when it looks like a layer itself.
fn root_is_layer(doc: &DslDocument<'_>) -> bool {
    let root = doc.root();
    root.id().is_some() || root.has_children()
}

/// Summaries of the top-level layers: the `nodes` list, then the root if it is a layer.
pub fn build_component_tree(dsl: &Value) -> Vec<NodeSummary> {
    let doc = DslDocument::new(dsl);
    let mut trees: Vec<NodeSummary> = doc.nodes().map(NodeSummary::from_node).collect();
    if root_is_layer(&doc) {
        trees.push(NodeSummary::from_node(doc.root()));
    }
    trees
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_nodes: usize,
    pub text_nodes: usize,
    pub component_instances: usize,
    pub navigations: usize,
}

/// Navigation edge with the source layer's name, for human-readable reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSummary {
    pub source_id: Option<String>,
    pub source_name: Option<String>,
    pub target_layer_id: String,
}

/// Structured overview of a DSL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DslAnalysis {
    pub version: String,
    pub framework: String,
    pub stats: AnalysisStats,
    pub component_docs: Vec<String>,
    pub texts: Vec<TextEntry>,
    pub navigations: Vec<NavigationSummary>,
    pub structure: Vec<NodeSummary>,
}

/// Analyze a DSL document (bare or wrapped).
pub fn analyze(dsl: &Value) -> DslAnalysis {
    let doc = DslDocument::new(dsl);

    let mut visited = 0;
    let mut navigations = Vec::new();
    doc.walk(|node| {
        visited += 1;
        for target in node.navigation_targets() {
            navigations.push(NavigationSummary {
                source_id: node.id().map(str::to_string),
                source_name: node.name().map(str::to_string),
                target_layer_id: target.to_string(),
            });
        }
    });
    let total_nodes = if root_is_layer(&doc) {
        visited
    } else {
        visited - 1
    };

    let component_docs = extract_component_links(dsl);
    let texts = extract_texts(dsl);

    DslAnalysis {
        version: doc.field_str("version").unwrap_or(UNKNOWN).to_string(),
        framework: doc.field_str("framework").unwrap_or(UNKNOWN).to_string(),
        stats: AnalysisStats {
            total_nodes,
            text_nodes: texts.len(),
            component_instances: component_docs.len(),
            navigations: navigations.len(),
        },
        component_docs,
        texts,
        navigations,
        structure: build_component_tree(dsl),
    }
}

impl DslAnalysis {
    /// Human-readable report with the structure drawn as a tree.
    pub fn render_tree(&self) -> String {
        let mut lines = vec![
            format!("DSL Analysis (v{}, {})", self.version, self.framework),
            format!(
                "Stats: {} nodes, {} texts, {} components, {} navigations",
                self.stats.total_nodes,
                self.stats.text_nodes,
                self.stats.component_instances,
                self.stats.navigations
            ),
            String::new(),
        ];

        if !self.component_docs.is_empty() {
            lines.push("Component Docs:".to_string());
            lines.extend(self.component_docs.iter().map(|doc| format!("  - {doc}")));
            lines.push(String::new());
        }

        lines.push("Structure:".to_string());
        for node in &self.structure {
            lines.push(node.to_tree().to_string().trim_end().to_string());
        }

        if !self.texts.is_empty() {
            lines.push(String::new());
            lines.push("Text Contents:".to_string());
            for text in self.texts.iter().take(MAX_LISTED_TEXTS) {
                lines.push(format!(
                    "  [{}] {}: \"{}\"",
                    text.id.as_deref().unwrap_or("?"),
                    text.name.as_deref().unwrap_or("unnamed"),
                    truncate(&text.text, 80)
                ));
            }
            if self.texts.len() > MAX_LISTED_TEXTS {
                lines.push(format!(
                    "  ... and {} more",
                    self.texts.len() - MAX_LISTED_TEXTS
                ));
            }
        }

        if !self.navigations.is_empty() {
            lines.push(String::new());
            lines.push("Navigations:".to_string());
            for nav in &self.navigations {
                lines.push(format!(
                    "  {} ({}) → {}",
                    nav.source_name.as_deref().unwrap_or("unnamed"),
                    nav.source_id.as_deref().unwrap_or("?"),
                    nav.target_layer_id
                ));
            }
        }

        lines.join("\n")
    }

    /// One line per layer with its slash-separated name path.
    pub fn render_flat(&self) -> String {
        let mut lines = Vec::new();
        for node in &self.structure {
            node.flatten_into("", &mut lines);
        }
        lines.join("\n")
    }
}
