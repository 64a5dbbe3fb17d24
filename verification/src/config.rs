//! Gate configuration with TOML file support.

use gate_index::client::DEFAULT_INDEX_URL;
use gate_types::DEFAULT_REQUIRED_COUNT;
use gate_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::WorkflowError;

/// Configuration for a verification gate.
///
/// Can be loaded from a TOML file via [`GateConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Nothing is read from process-wide
/// environment state here; the daemon layers flags and env vars on top.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateConfig {
    /// Base URL of the DAS ownership index.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// API key for the ownership index. Required.
    #[serde(default)]
    pub index_api_key: String,

    /// Target collection identifier. Required.
    #[serde(default)]
    pub collection: String,

    /// Minimum number of matching assets.
    #[serde(default = "default_required_count")]
    pub required_count: u32,

    /// Base URL of the verification backend.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Shared secret sent as `X-Verification-Secret`.
    #[serde(default)]
    pub backend_secret: Option<String>,

    /// Marketplace link offered when a wallet holds too few assets.
    #[serde(default)]
    pub marketplace_url: Option<String>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_required_count() -> u32 {
    DEFAULT_REQUIRED_COUNT
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GateConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WorkflowError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WorkflowError> {
        toml::from_str(s).map_err(|e| WorkflowError::Configuration(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WorkflowError> {
        toml::to_string_pretty(self).map_err(|e| WorkflowError::Configuration(e.to_string()))
    }

    /// Check that every field the workflow cannot run without is present.
    ///
    /// A missing backend URL is not an error here: the ownership check still
    /// runs and each notification ends in `backend_error`.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let mut missing = Vec::new();
        if self.index_url.trim().is_empty() {
            missing.push("index_url");
        }
        if self.index_api_key.trim().is_empty() {
            missing.push("index_api_key");
        }
        if self.collection.trim().is_empty() {
            missing.push("collection");
        }
        if !missing.is_empty() {
            return Err(WorkflowError::Configuration(format!(
                "missing required setting(s): {}",
                missing.join(", ")
            )));
        }
        if self.required_count == 0 {
            return Err(WorkflowError::Configuration(
                "required_count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn has_backend(&self) -> bool {
        self.backend_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            index_api_key: String::new(),
            collection: String::new(),
            required_count: default_required_count(),
            backend_url: None,
            backend_secret: None,
            marketplace_url: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("index_url", &self.index_url)
            .field("index_api_key", &"<redacted>")
            .field("collection", &self.collection)
            .field("required_count", &self.required_count)
            .field("backend_url", &self.backend_url)
            .field("backend_secret", &self.backend_secret.as_ref().map(|_| "<redacted>"))
            .field("marketplace_url", &self.marketplace_url)
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}
