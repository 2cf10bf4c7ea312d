//! Meta document parsing: page actions declared as self-closing tags.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::MetaAction;

/// `<action title="..." layerId="..."/>`, attributes in that order.
/// No entity unescaping, no quote escaping inside values.
static ACTION_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<action\s+title="([^"]+)"\s+layerId="([^"]+)"\s*/>"#)
        .expect("action tag pattern is valid")
});

/// All well-formed action tags in textual order.
///
/// Malformed tags are skipped; no tags yields an empty list.
pub fn parse_actions(text: &str) -> Vec<MetaAction> {
    ACTION_TAG
        .captures_iter(text)
        .map(|caps| MetaAction {
            title: caps[1].to_string(),
            layer_id: caps[2].to_string(),
        })
        .collect()
}
