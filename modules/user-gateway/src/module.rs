//! Wiring of the SDK client, controller and HTTP router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::GatewayConfig;
use crate::controller::ControllerV1;
use crate::rest;

const UPSTREAM_NAME: &str = "user_service";

/// Connect to the user service and build the router.
///
/// Fails if the user service stays unreachable after the configured retries.
///
/// # Errors
/// Returns an error if the upstream channel cannot be established.
pub async fn build_app(config: &GatewayConfig) -> anyhow::Result<Router> {
    let cfg = config.user_service.to_client_config(UPSTREAM_NAME);
    let users = user_service_sdk::connect_client(config.user_service.uri.clone(), &cfg)
        .await
        .context("user service is not reachable")?;

    Ok(rest::router(Arc::new(ControllerV1::new(users))))
}

/// Serve until `cancel` fires.
///
/// # Errors
/// Returns an error if the upstream is unreachable or the listener cannot be bound.
pub async fn run(config: &GatewayConfig, cancel: CancellationToken) -> anyhow::Result<()> {
    let app = build_app(config).await?;
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.listen_addr))?;

    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, upstream = %config.user_service.uri, "user gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    tracing::info!("user gateway stopped");
    Ok(())
}
