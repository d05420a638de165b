use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::core::credential::ApiCredential;
use crate::core::profile::{LookupFailure, ProfileResolver};

const PROFILE_ENDPOINT: &str = "/stock/profile2";
const USER_AGENT: &str = concat!("dashfolio/", env!("CARGO_PKG_VERSION"));

/// Looks up company names on Finnhub's profile endpoint.
///
/// One request per call, no retry and no caching. Without a credential no
/// request is made at all.
pub struct FinnhubProfileResolver {
    base_url: String,
    credential: ApiCredential,
    client: Client,
}

impl FinnhubProfileResolver {
    pub fn new(base_url: &str, credential: ApiCredential) -> Result<Self> {
        Ok(FinnhubProfileResolver {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
            client: Self::build_client(None)?,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Self::build_client(Some(timeout))?;
        Ok(self)
    }

    fn build_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to build HTTP client")
    }

    async fn lookup(&self, symbol: &str) -> std::result::Result<String, LookupFailure> {
        let token = self
            .credential
            .token()
            .ok_or(LookupFailure::MissingConfiguration)?;

        let url = format!("{}{}", self.base_url, PROFILE_ENDPOINT);
        debug!("Requesting profile from {}", url);

        // The token rides in the query string, so strip URLs from transport errors.
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", token)])
            .send()
            .await
            .map_err(|e| LookupFailure::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupFailure::Transport(e.without_url()))?;

        if !status.is_success() {
            return Err(LookupFailure::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let profile: Value = match serde_json::from_str(&body) {
            Ok(profile) => profile,
            Err(e) => {
                return Err(LookupFailure::MalformedBody {
                    error: e.to_string(),
                    body,
                });
            }
        };
        let Some(fields) = profile.as_object() else {
            return Err(LookupFailure::MalformedBody {
                error: "expected a JSON object".to_string(),
                body,
            });
        };

        // Only `name` is read; every other profile field is ignored.
        match fields.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
            _ => Err(LookupFailure::NameNotPresent { body }),
        }
    }
}

#[async_trait]
impl ProfileResolver for FinnhubProfileResolver {
    #[instrument(
        name = "FinnhubProfileLookup",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn resolve_name(&self, symbol: &str) -> Option<String> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            debug!("Blank symbol, skipping profile lookup");
            return None;
        }

        match self.lookup(&symbol).await {
            Ok(name) => {
                debug!(%name, "Resolved profile name");
                Some(name)
            }
            Err(LookupFailure::MissingConfiguration) => {
                info!("No market data token configured, skipping name lookup");
                None
            }
            Err(failure) => {
                log_failure(&failure);
                None
            }
        }
    }
}

fn log_failure(failure: &LookupFailure) {
    match failure {
        LookupFailure::UpstreamStatus { status, body } => {
            warn!(status, body = %body, "Profile request was not successful");
        }
        LookupFailure::MalformedBody { error, body } => {
            warn!(error = %error, body = %body, "Failed to parse profile response");
        }
        LookupFailure::NameNotPresent { body } => {
            warn!(body = %body, "Profile response has no name");
        }
        other => warn!(error = %other, "Profile request failed"),
    }
}
