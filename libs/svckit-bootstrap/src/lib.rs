#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

//! Shared process bootstrap for the user-service binaries.
//!
//! - [`config`]: layered configuration (defaults -> YAML -> env) on top of figment
//! - [`logging`]: `tracing` subscriber setup driven by [`LoggingConfig`]
//! - [`signals`]: Ctrl+C / SIGTERM handling wired to a cancellation token

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{ConfigError, LogFormat, LoggingConfig, load_layered, to_pretty_json};
pub use logging::init_logging;
pub use signals::{shutdown_token, wait_for_shutdown};
