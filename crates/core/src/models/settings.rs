use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Number of entries shown in the dashboard's recent-activity list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Table holding transaction rows in the hosted store.
pub const DEFAULT_TABLE: &str = "transactions";

/// Request timeout for the hosted store, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-configurable settings for a tracker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How many entries the dashboard's recent-activity list keeps.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Connection details for the hosted store. `None` when the caller
    /// supplies its own `TransactionStore`.
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            store: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Configuration(format!("Invalid settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings for the host application to persist.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.recent_limit == 0 {
            return Err(CoreError::Configuration(
                "recent_limit must be at least 1".into(),
            ));
        }
        if let Some(store) = &self.store {
            store.validate()?;
        }
        Ok(())
    }
}

/// Where and how to reach the hosted PostgREST-style store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.example.co` (no trailing `/rest/v1`)
    pub base_url: String,

    /// Public API key sent as the `apikey` header
    pub api_key: String,

    /// Session token for the signed-in user. Falls back to `api_key`.
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.base_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CoreError::Configuration(format!(
                "Store base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(CoreError::Configuration("Store api_key must not be empty".into()));
        }
        if self.table.trim().is_empty() {
            return Err(CoreError::Configuration("Store table must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::Configuration(
                "Store timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
