//! Symbol to display-name lookup abstractions

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;

/// Reasons a profile lookup came back empty. These are only ever logged;
/// a resolver turns every one of them into `None`.
#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error("no API credential configured")]
    MissingConfiguration,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },
    #[error("unparseable profile body: {error}")]
    MalformedBody { error: String, body: String },
    #[error("profile has no name")]
    NameNotPresent { body: String },
}

/// Best-effort enrichment of a ticker symbol with a human readable name.
///
/// Implementations never fail: any problem resolves to `None` so callers can
/// fall back to whatever label they already have.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    async fn resolve_name(&self, symbol: &str) -> Option<String>;
}

/// Resolves every symbol concurrently. Results keep the order of `symbols`.
pub async fn resolve_names(
    resolver: &(dyn ProfileResolver + Send + Sync),
    symbols: &[String],
) -> Vec<(String, Option<String>)> {
    let futures = symbols.iter().map(|symbol| async move {
        let name = resolver.resolve_name(symbol).await;
        (symbol.clone(), name)
    });
    join_all(futures).await
}
