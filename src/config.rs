//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mgdsl/mgdsl.toml`
//! 3. Environment variables: `MASTERGO_*` prefix (plus legacy `RULES`)
//! 4. Command-line flags (`--token`, `--endpoint`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::application::ApplicationError;
use crate::domain::FileLocator;

pub const DEFAULT_ENDPOINT: &str = "https://mastergo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "MASTERGO";
/// Unprefixed rules variable understood by earlier tooling.
const LEGACY_RULES_VAR: &str = "RULES";
const MASKED_TOKEN: &str = "********";

/// Unified configuration for mgdsl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Personal access token, sent as `X-MG-UserAccessToken`
    pub token: Option<String>,
    /// API origin (scheme + host + port)
    pub endpoint: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header for all requests
    pub user_agent: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Extra rules appended to DSL responses
    pub rules: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("mgdsl/{}", env!("CARGO_PKG_VERSION")),
            insecure: false,
            rules: Vec::new(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub insecure: Option<bool>,
    pub rules: Option<Vec<String>>,
}

/// Get the XDG config directory for mgdsl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mgdsl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mgdsl.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Keep only scheme, host and port; `None` when there is no host.
pub fn normalize_endpoint(endpoint: &str) -> Option<String> {
    let url = Url::parse(endpoint).ok()?;
    let host = url.host_str()?;
    let mut origin = format!("{}://{}", url.scheme(), host);
    if let Some(port) = url.port() {
        origin.push_str(&format!(":{port}"));
    }
    Some(origin)
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// Scalars: overlay wins if Some. Rules: overlay replaces if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            token: overlay.token.clone().or_else(|| self.token.clone()),
            endpoint: overlay
                .endpoint
                .clone()
                .unwrap_or_else(|| self.endpoint.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            user_agent: overlay
                .user_agent
                .clone()
                .unwrap_or_else(|| self.user_agent.clone()),
            insecure: overlay.insecure.unwrap_or(self.insecure),
            rules: overlay.rules.clone().unwrap_or_else(|| self.rules.clone()),
        }
    }

    /// Load settings from the global config file and the process environment.
    pub fn load() -> Result<Self, ApplicationError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(global_config_path().as_deref(), env)
    }

    /// Load settings from an explicit config file and environment map.
    ///
    /// A missing config file is skipped; an unreadable one is an error.
    pub fn load_from(
        config_file: Option<&Path>,
        env: HashMap<String, String>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.normalize();
        Ok(current)
    }

    /// Apply MASTERGO_* environment variables as explicit overrides.
    ///
    /// `MASTERGO_RULES` / `RULES` hold a JSON array of strings that is appended
    /// to the configured rules; anything else in them is ignored.
    fn apply_env_overrides(
        mut settings: Self,
        env: HashMap<String, String>,
    ) -> Result<Self, ApplicationError> {
        let legacy_rules = env.get(LEGACY_RULES_VAR).cloned();

        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(Some(env)),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("token") {
            settings.token = Some(val);
        }
        if let Ok(val) = config.get_string("api_url") {
            settings.endpoint = val;
        }
        // MASTERGO_ENDPOINT wins over the MASTERGO_API_URL alias
        if let Ok(val) = config.get_string("endpoint") {
            settings.endpoint = val;
        }
        if let Ok(val) = config.get_string("timeout_secs") {
            settings.timeout_secs = val.trim().parse().map_err(|e| ApplicationError::Config {
                message: format!("MASTERGO_TIMEOUT_SECS: {e}"),
            })?;
        }
        if let Ok(val) = config.get_bool("insecure") {
            settings.insecure = val;
        }
        if let Ok(user_agent) = config.get_string("user_agent") {
            settings.user_agent = user_agent;
        }

        let extra_rules = config.get_string("rules").ok().or(legacy_rules);
        if let Some(raw) = extra_rules {
            if let Ok(rules) = serde_json::from_str::<Vec<String>>(&raw) {
                settings.rules.extend(rules);
            }
        }

        Ok(settings)
    }

    /// Apply command-line overrides (highest precedence).
    pub fn with_overrides(mut self, token: Option<String>, endpoint: Option<String>) -> Self {
        if token.is_some() {
            self.token = token;
        }
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        self.endpoint =
            normalize_endpoint(&self.endpoint).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.token = None;
        }
    }

    /// The access token, or `TokenMissing`.
    pub fn require_token(&self) -> Result<&str, ApplicationError> {
        self.token.as_deref().ok_or(ApplicationError::TokenMissing)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{endpoint}{path}?fileId=..&layerId=..` with both ids percent-encoded.
    pub fn api_url(&self, path: &str, locator: &FileLocator) -> Result<String, ApplicationError> {
        let mut url = Url::parse(&self.endpoint)
            .and_then(|base| base.join(path))
            .map_err(|e| ApplicationError::Config {
                message: format!("endpoint {}: {}", self.endpoint, e),
            })?;
        url.query_pairs_mut()
            .append_pair("fileId", &locator.file_id)
            .append_pair("layerId", &locator.layer_id);
        Ok(url.into())
    }

    /// Show the effective configuration as TOML, token masked.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        let mut shown = self.clone();
        if shown.token.is_some() {
            shown.token = Some(MASKED_TOKEN.to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mgdsl configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/mgdsl/mgdsl.toml
#   Env:    MASTERGO_* environment variables
#   Flags:  --token, --endpoint

# Personal access token (prefer MASTERGO_TOKEN)
# token = "..."

# API origin; path and query are dropped
# endpoint = "https://mastergo.com"

# Per-request timeout in seconds
# timeout_secs = 30

# User-Agent header
# user_agent = "mgdsl"

# Skip TLS certificate verification (self-hosted deployments)
# insecure = false

# Extra rules appended to every DSL response
# (MASTERGO_RULES='["..."]' appends more)
# rules = []
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
