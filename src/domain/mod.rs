//! Domain layer: entities and DSL logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod document;
pub mod entities;
pub mod error;
pub mod extract;
pub mod meta;
pub mod summary;
pub mod url;

pub use document::{parse_json, DslDocument, Interaction, NodeRef};
pub use entities::*;
pub use error::DomainError;
pub use extract::{extract_component_links, extract_navigations, extract_texts, extract_tokens};
pub use meta::parse_actions;
pub use summary::{analyze, build_component_tree, DslAnalysis, NodeSummary};
pub use self::url::{is_short_link, is_valid_url, parse_file_url};
