//! mgdsl: MasterGo design DSL toolkit
//!
//! Resolves share links to file/layer ids, fetches layer DSL and site metadata,
//! and extracts component documentation links, navigation edges, texts and tokens.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
