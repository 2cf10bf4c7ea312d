//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `HttpClient` boundary trait
//! but are themselves concrete structs, not traits.

mod api;
mod docs;
mod dsl;
mod meta;
mod resolver;

pub use api::TOKEN_HEADER;
pub use docs::{links_from_dsl_output, DocFetch, DocsReport, DocsService};
pub use dsl::{DslResponse, DslService, DSL_RULES};
pub use meta::{MetaResponse, MetaService, META_RULES};
pub use resolver::LinkResolver;
