//! Read-only view over a DSL document.
//!
//! The DSL arrives as free-form JSON whose shape varies between producers.
//! Every optional field is an explicit accessor returning `Option`; a field
//! holding the wrong JSON type counts as absent. Nothing here mutates or
//! copies the underlying value.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Field holding the actual tree when the document comes wrapped.
const WRAPPER_FIELD: &str = "dsl";

/// Interaction type that declares a screen-to-screen navigation.
pub const NAVIGATION: &str = "navigation";

/// Parse JSON text without a nesting limit.
///
/// Layers nest as object + `children` array, so serde_json's default limit of
/// 128 would cap documents at about 64 layers. The stack grows on demand instead.
pub fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// A DSL document, unwrapped to its tree root.
#[derive(Debug, Clone, Copy)]
pub struct DslDocument<'a> {
    root: &'a Value,
}

impl<'a> DslDocument<'a> {
    /// Accept either the bare tree root or a wrapper holding it under `dsl`.
    pub fn new(value: &'a Value) -> Self {
        let root = match value.get(WRAPPER_FIELD) {
            Some(inner) if inner.is_object() => inner,
            _ => value,
        };
        Self { root }
    }

    /// The root object, viewed as a node.
    pub fn root(&self) -> NodeRef<'a> {
        NodeRef(self.root)
    }

    /// Declared top-level nodes (`nodes`), skipping null entries.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        node_list(self.root.get("nodes"))
    }

    /// String field of the root object, e.g. `version` or `framework`.
    pub fn field_str(&self, key: &str) -> Option<&'a str> {
        self.root.get(key).and_then(Value::as_str)
    }

    /// The root's `localStyleMap` object, if any.
    pub fn local_style_map(&self) -> Option<&'a Map<String, Value>> {
        self.root.get("localStyleMap").and_then(Value::as_object)
    }

    /// Visit every node depth-first, pre-order.
    ///
    /// Two passes: the declared `nodes` list first, then the root object itself,
    /// so fields attached directly to the root are seen even when a separate
    /// top-level list exists. Uses an explicit stack; depth is unbounded.
    pub fn walk(&self, mut visit: impl FnMut(NodeRef<'a>)) {
        for node in self.nodes() {
            walk_from(node, &mut visit);
        }
        walk_from(self.root(), &mut visit);
    }
}

fn walk_from<'a>(start: NodeRef<'a>, visit: &mut impl FnMut(NodeRef<'a>)) {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        visit(node);
        // reversed so the first child is popped next
        stack.extend(node.children().rev());
    }
}

fn node_list<'a>(field: Option<&'a Value>) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
    field
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(NodeRef::from_value)
}

/// One node (design layer) of the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a>(&'a Value);

impl<'a> NodeRef<'a> {
    /// `None` for null; anything else is a node, possibly without fields.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        if value.is_null() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Underlying JSON value.
    pub fn value(&self) -> &'a Value {
        self.0
    }

    pub fn id(&self) -> Option<&'a str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&'a str> {
        self.str_field("name")
    }

    /// Layer type, e.g. `FRAME` or `TEXT`.
    pub fn kind(&self) -> Option<&'a str> {
        self.str_field("type")
    }

    pub fn characters(&self) -> Option<&'a str> {
        self.str_field("characters").filter(|s| !s.is_empty())
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        node_list(self.0.get("children"))
    }

    pub fn has_children(&self) -> bool {
        self.children().next().is_some()
    }

    /// First entry of `componentInfo.componentSetDocumentLink`, when it is a non-empty string.
    pub fn component_doc_link(&self) -> Option<&'a str> {
        self.0
            .get("componentInfo")?
            .get("componentSetDocumentLink")?
            .as_array()?
            .first()?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// Entries of `interactive`, in declaration order.
    pub fn interactions(&self) -> impl Iterator<Item = Interaction<'a>> + 'a {
        self.0
            .get("interactive")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Interaction)
    }

    /// Targets of the qualifying navigation interactions, in declaration order.
    pub fn navigation_targets(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.interactions()
            .filter(Interaction::is_navigation)
            .filter_map(|i| i.target_layer_id())
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// A declared behavior on a node.
#[derive(Debug, Clone, Copy)]
pub struct Interaction<'a>(&'a Value);

impl<'a> Interaction<'a> {
    pub fn kind(&self) -> Option<&'a str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// `targetLayerId`, when it is a non-empty string.
    pub fn target_layer_id(&self) -> Option<&'a str> {
        self.0
            .get("targetLayerId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn is_navigation(&self) -> bool {
        self.kind() == Some(NAVIGATION)
    }
}
