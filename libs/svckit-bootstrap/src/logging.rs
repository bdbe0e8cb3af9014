//! `tracing` subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Pick the filter directive: `-v` flags win over the configured level.
///
/// `-v` info, `-vv` debug, `-vvv` (or more) trace.
pub fn resolve_directive(cfg: &LoggingConfig, verbose: u8) -> String {
    match verbose {
        0 => cfg.level.clone(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set and valid, takes precedence over both the config and `-v`.
/// Calling this twice is harmless: the second attempt only logs a debug line.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) {
    let directive = resolve_directive(cfg, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match cfg.format {
        LogFormat::Text => fmt::layer().with_ansi(cfg.ansi).with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    };

    let result = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init();

    if let Err(e) = result {
        tracing::debug!(error = %e, "global subscriber already installed");
    }
}
