use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.eflow.team/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ENTITIES: usize = 100;

/// Tag identifying the Provider family a mapping belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Everflow,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Everflow => "everflow",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration record handed to the integration service. The core reads no
/// process-wide settings; everything it needs arrives through this value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub sweep: SweepDefaults,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Without a key the provider-facing operations fail with `ProviderDisabled`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Swap the HTTP client for the in-process stub.
    #[serde(default)]
    pub mock_mode: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub provider_type: ProviderType,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            mock_mode: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            provider_type: ProviderType::Everflow,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when the key is present and non-blank, or mock mode is on.
    pub fn is_enabled(&self) -> bool {
        self.mock_mode
            || self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

// The API key must never reach logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("mock_mode", &self.mock_mode)
            .field("timeout_secs", &self.timeout_secs)
            .field("provider_type", &self.provider_type)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepDefaults {
    #[serde(default = "default_max_entities")]
    pub default_max_entities: usize,
    #[serde(default = "default_true")]
    pub default_include_unsynced: bool,
    #[serde(default = "default_true")]
    pub default_include_failed: bool,
    #[serde(default = "default_true")]
    pub default_include_pending: bool,
}

impl Default for SweepDefaults {
    fn default() -> Self {
        Self {
            default_max_entities: DEFAULT_MAX_ENTITIES,
            default_include_unsynced: true,
            default_include_failed: true,
            default_include_pending: true,
        }
    }
}

impl CoreConfig {
    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.provider.base_url,
            api_key_set = self.provider.api_key.is_some(),
            mock_mode = self.provider.mock_mode,
            timeout_secs = self.provider.timeout_secs,
            default_max_entities = self.sweep.default_max_entities,
            "[CONFIG] Loaded core config"
        );
        debug!(?self, "[CONFIG] Core config loaded (full debug)");
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_entities() -> usize {
    DEFAULT_MAX_ENTITIES
}

fn default_true() -> bool {
    true
}
