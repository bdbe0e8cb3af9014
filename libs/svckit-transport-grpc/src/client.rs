//! gRPC client channel configuration and connection.
//!
//! Only transport concerns live here: timeouts, HTTP/2 keepalive and bounded
//! retries of the *initial* connect. RPCs themselves are never retried.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Transport configuration for one upstream gRPC service.
#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    /// Name used in logs and error context.
    pub service_name: &'static str,
    pub connect_timeout: Duration,
    /// Per-RPC deadline applied at the channel level.
    pub rpc_timeout: Duration,
    /// Extra connect attempts after the first failure.
    pub max_retries: u32,
    /// Backoff grows linearly with the attempt number up to `max_backoff`.
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            service_name: "grpc_client",
            connect_timeout: Duration::from_secs(10),
            rpc_timeout: Duration::from_secs(30),
            max_retries: 3,
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl GrpcClientConfig {
    pub fn new(service_name: &'static str) -> Self {
        Self {
            service_name,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.base_backoff = base;
        self.max_backoff = max;
        self
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_backoff.saturating_mul(attempt).min(self.max_backoff)
    }
}

/// Serializable form of [`GrpcClientConfig`] for config files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Upstream URI, e.g. `http://127.0.0.1:50051`.
    pub uri: String,
    pub connect_timeout_ms: u64,
    pub rpc_timeout_ms: u64,
    pub max_retries: u32,
    pub base_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let cfg = GrpcClientConfig::default();
        Self {
            uri: "http://127.0.0.1:50051".to_owned(),
            connect_timeout_ms: millis(cfg.connect_timeout),
            rpc_timeout_ms: millis(cfg.rpc_timeout),
            max_retries: cfg.max_retries,
            base_backoff_ms: millis(cfg.base_backoff),
            max_backoff_ms: millis(cfg.max_backoff),
        }
    }
}

impl ClientSettings {
    pub fn to_client_config(&self, service_name: &'static str) -> GrpcClientConfig {
        GrpcClientConfig::new(service_name)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_rpc_timeout(Duration::from_millis(self.rpc_timeout_ms))
            .with_max_retries(self.max_retries)
            .with_backoff(
                Duration::from_millis(self.base_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            )
    }
}

fn build_endpoint(uri: String, cfg: &GrpcClientConfig) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true);

    Ok(endpoint)
}

/// Open a channel with a single connect attempt.
///
/// # Errors
/// Returns an error if the URI is invalid or the connection cannot be established.
pub async fn connect_channel(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri = uri.into();
    let span = tracing::debug_span!("grpc_connect", service = cfg.service_name, uri = %uri);

    async move {
        let endpoint = build_endpoint(uri, cfg)?;
        let channel = endpoint.connect().await?;
        tracing::info!(
            service = cfg.service_name,
            connect_timeout_ms = millis(cfg.connect_timeout),
            rpc_timeout_ms = millis(cfg.rpc_timeout),
            "gRPC channel connected"
        );
        Ok::<_, anyhow::Error>(channel)
    }
    .instrument(span)
    .await
}

/// Open a channel, retrying the connect up to `cfg.max_retries` extra times.
///
/// # Errors
/// Returns the last connect error once all attempts are exhausted.
pub async fn connect_with_retry(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri = uri.into();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match connect_channel(uri.clone(), cfg).await {
            Ok(channel) => return Ok(channel),
            Err(e) if attempt <= cfg.max_retries => {
                let backoff = cfg.backoff_for(attempt);
                tracing::warn!(
                    service = cfg.service_name,
                    attempt,
                    max_retries = cfg.max_retries,
                    backoff_ms = millis(backoff),
                    error = %e,
                    "gRPC connect failed, retrying"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to connect to {} after {attempt} attempts", cfg.service_name)
                });
            }
        }
    }
}
