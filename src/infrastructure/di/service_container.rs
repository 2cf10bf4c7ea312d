//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DocsService, DslService, LinkResolver, MetaService};
use crate::config::Settings;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{HttpClient, ReqwestHttpClient};

/// Container holding the settings and the shared HTTP client.
///
/// Services are cheap to build and created on demand.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// HTTP abstraction
    pub http: Arc<dyn HttpClient>,
}

impl ServiceContainer {
    /// Create a new service container with a real HTTP client.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let http = ReqwestHttpClient::new(
            settings.timeout(),
            &settings.user_agent,
            settings.insecure,
        )
        .map_err(|e| InfraError::io("build HTTP client", e))?;
        Ok(Self::with_deps(settings, Arc::new(http)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, http: Arc<dyn HttpClient>) -> Self {
        Self {
            settings: Arc::new(settings),
            http,
        }
    }

    pub fn resolver(&self) -> LinkResolver {
        LinkResolver::new(Arc::clone(&self.http))
    }

    pub fn dsl_service(&self) -> DslService {
        DslService::new(Arc::clone(&self.http), Arc::clone(&self.settings))
    }

    pub fn meta_service(&self) -> MetaService {
        MetaService::new(Arc::clone(&self.http), Arc::clone(&self.settings))
    }

    pub fn docs_service(&self) -> DocsService {
        DocsService::new(Arc::clone(&self.http))
    }
}
