use crate::core::asset::Asset;
use crate::core::credential::{ApiCredential, DEFAULT_TOKEN_ENV};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

fn default_base_url() -> String {
    DEFAULT_FINNHUB_BASE_URL.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FinnhubProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Request timeout. Unset leaves the HTTP client's own default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for FinnhubProviderConfig {
    fn default() -> Self {
        FinnhubProviderConfig {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_secs: None,
        }
    }
}

impl FinnhubProviderConfig {
    pub fn credential(&self) -> ApiCredential {
        ApiCredential::from_env(&self.token_env)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub finnhub: FinnhubProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub holdings: Vec<Asset>,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "dashfolio", "dashfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(holdings = config.holdings.len(), "Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::AssetType;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
holdings:
  - id: "1"
    name: "Apple Inc."
    symbol: "AAPL"
    quantity: 10
    purchase_price: 150.0
    current_value: 175.0
    type: stock
  - id: "2"
    name: "Vanguard Total Stock Market"
    symbol: "VTI"
    quantity: 4.5
    purchase_price: 210.0
    current_value: 240.5
    type: fund
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.holdings.len(), 2);
        assert_eq!(config.holdings[0].symbol, "AAPL");
        assert_eq!(config.holdings[0].quantity, 10.0);
        assert_eq!(config.holdings[1].asset_type, AssetType::Fund);
        assert_eq!(config.holdings[1].current_value, 240.5);

        assert_eq!(config.providers.finnhub.base_url, DEFAULT_FINNHUB_BASE_URL);
        assert_eq!(config.providers.finnhub.token_env, "FINNHUB_API_KEY");
        assert!(config.providers.finnhub.timeout().is_none());

        let yaml_str_with_providers = r#"
holdings: []
providers:
  finnhub:
    base_url: "http://example.com/finnhub"
    token_env: "MY_TOKEN"
    timeout_secs: 5
"#;
        let config_with_providers: AppConfig =
            serde_yaml::from_str(yaml_str_with_providers).unwrap();
        let finnhub = &config_with_providers.providers.finnhub;
        assert!(config_with_providers.holdings.is_empty());
        assert_eq!(finnhub.base_url, "http://example.com/finnhub");
        assert_eq!(finnhub.token_env, "MY_TOKEN");
        assert_eq!(finnhub.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_provider_config_uses_defaults() {
        let yaml_str = r#"
holdings: []
providers:
  finnhub:
    timeout_secs: 3
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.providers.finnhub.base_url, DEFAULT_FINNHUB_BASE_URL);
        assert_eq!(config.providers.finnhub.token_env, DEFAULT_TOKEN_ENV);
    }

    #[test]
    fn test_load_from_missing_path_has_context() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
