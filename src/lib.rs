pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::{AppConfig, FinnhubProviderConfig};
use crate::providers::FinnhubProfileResolver;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

pub enum AppCommand {
    Summary { json: bool },
    Names { symbols: Vec<String> },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Provider settings for commands that need no holdings. Only an absent
/// default config falls back to built-in settings; an explicit path must exist
/// and any file that exists must parse.
fn load_provider_config(path: &Path, explicit: bool) -> Result<FinnhubProviderConfig> {
    if !explicit && !path.exists() {
        debug!(
            path = %path.display(),
            "No config file, using default provider settings"
        );
        return Ok(FinnhubProviderConfig::default());
    }
    Ok(AppConfig::load_from_path(path)?.providers.finnhub)
}

/// Builds the resolver once; the credential is read from the environment here
/// and nowhere else.
pub fn build_resolver(config: &FinnhubProviderConfig) -> Result<FinnhubProfileResolver> {
    let resolver = FinnhubProfileResolver::new(&config.base_url, config.credential())?;
    match config.timeout() {
        Some(timeout) => resolver.with_timeout(timeout),
        None => Ok(resolver),
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Dashfolio starting...");

    match command {
        AppCommand::Summary { json } => {
            let config = load_config(config_path)?;
            let resolver = build_resolver(&config.providers.finnhub)?;
            cli::summary::run(&config.holdings, &resolver, json).await
        }
        AppCommand::Names { symbols } => {
            let providers = match config_path {
                Some(path) => load_provider_config(Path::new(path), true)?,
                None => load_provider_config(&AppConfig::default_config_path()?, false)?,
            };
            let resolver = build_resolver(&providers)?;
            cli::names::run(&symbols, &resolver).await
        }
    }
}
