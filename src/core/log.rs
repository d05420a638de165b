use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::MakeWriter, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Picks the active filter. A valid `RUST_LOG` wins outright; otherwise only
/// this crate logs, at debug with `verbose` and not at all without it.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid RUST_LOG ({e}), using defaults"),
        }
    }

    if verbose {
        EnvFilter::new("off,dashfolio=debug")
    } else {
        EnvFilter::new("off")
    }
}

pub fn build_subscriber<W>(
    verbose: bool,
    rust_log: Option<&str>,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(writer))
        .with(log_filter(verbose, rust_log))
}

/// Installs the global subscriber. Output goes to stderr so rendered tables
/// and JSON on stdout stay clean.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_subscriber(verbose, rust_log.as_deref(), std::io::stderr).init();
}
