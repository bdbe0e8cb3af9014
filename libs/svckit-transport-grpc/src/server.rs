//! Serving tonic routes over TCP with cooperative shutdown.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::service::Routes;
use tonic::transport::Server;

/// Bind a TCP listener, logging the address actually bound (port `0` resolves here).
///
/// # Errors
/// Returns an error if the address cannot be bound.
pub async fn bind_tcp(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind gRPC listener on {addr}"))?;
    Ok(listener)
}

/// Serve `routes` on an already bound listener until `cancel` fires.
///
/// In-flight calls are drained before this returns.
///
/// # Errors
/// Returns an error if the server fails while serving.
pub async fn serve_tcp(
    listener: TcpListener,
    routes: Routes,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, transport = "tcp", "gRPC server listening");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_routes(routes)
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!(%bound_addr, "gRPC server stopped");
    Ok(())
}
