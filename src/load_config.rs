use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use everflow_sync_core::config::{CoreConfig, ProviderConfig, SweepDefaults};
use serde::Deserialize;
use tracing::{error, info, warn};

pub const ENV_API_KEY: &str = "EVERFLOW_API_KEY";
pub const ENV_BASE_URL: &str = "EVERFLOW_BASE_URL";
pub const ENV_MOCK_MODE: &str = "EVERFLOW_MOCK_MODE";

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// JSON snapshot backing the mapping store. Relative paths resolve
    /// against the config file's directory.
    pub path: PathBuf,
}

/// Everything the `sync` command needs: the core config plus the store location.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub sweep: SweepDefaults,
    pub store: StoreSection,
}

impl AppConfig {
    pub fn core(&self) -> CoreConfig {
        CoreConfig {
            provider: self.provider.clone(),
            sweep: self.sweep.clone(),
        }
    }
}

/// Loads a static YAML config file (no secrets) and applies the `EVERFLOW_*`
/// environment overrides on top.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let mut config: AppConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.store.path.is_relative() {
        if let Some(dir) = path_ref.parent() {
            config.store.path = dir.join(&config.store.path);
        }
    }

    apply_env_overrides(&mut config.provider)?;

    info!(
        base_url = %config.provider.base_url,
        mock_mode = config.provider.mock_mode,
        api_key_set = config.provider.api_key.is_some(),
        store_path = %config.store.path.display(),
        "Config loaded and merged successfully"
    );
    Ok(config)
}

fn apply_env_overrides(provider: &mut ProviderConfig) -> Result<()> {
    if let Ok(key) = std::env::var(ENV_API_KEY) {
        info!("{ENV_API_KEY} found in env");
        provider.api_key = Some(key);
    }
    if let Ok(url) = std::env::var(ENV_BASE_URL) {
        info!(base_url = %url, "{ENV_BASE_URL} found in env");
        provider.base_url = url;
    }
    if let Ok(raw) = std::env::var(ENV_MOCK_MODE) {
        provider.mock_mode = match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                warn!(value = %other, "{ENV_MOCK_MODE} is not a boolean");
                anyhow::bail!("{ENV_MOCK_MODE} must be one of true|1|false|0, got {other:?}");
            }
        };
    }
    Ok(())
}
