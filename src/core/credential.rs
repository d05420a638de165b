//! Market-data API credential, resolved once at startup.
use std::fmt;
use tracing::debug;

pub const DEFAULT_TOKEN_ENV: &str = "FINNHUB_API_KEY";

/// Whether a provider token is available. Absence is a valid state: it turns
/// name enrichment off without failing anything else.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiCredential {
    Configured(String),
    NotConfigured,
}

impl ApiCredential {
    /// Reads `var` from the environment. Unset, empty and blank values are all
    /// treated as not configured.
    pub fn from_env(var: &str) -> Self {
        let credential = Self::from_value(std::env::var(var).ok());
        debug!(
            env = var,
            configured = credential.is_configured(),
            "Resolved API credential"
        );
        credential
    }

    pub fn from_value(value: Option<String>) -> Self {
        match value {
            Some(token) if !token.trim().is_empty() => {
                ApiCredential::Configured(token.trim().to_string())
            }
            _ => ApiCredential::NotConfigured,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            ApiCredential::Configured(token) => Some(token),
            ApiCredential::NotConfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, ApiCredential::Configured(_))
    }
}

// Keeps the token out of logs.
impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiCredential::Configured(_) => f.write_str("Configured(***)"),
            ApiCredential::NotConfigured => f.write_str("NotConfigured"),
        }
    }
}
