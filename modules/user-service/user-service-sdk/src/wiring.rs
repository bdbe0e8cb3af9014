//! Wiring for the user service SDK.

use std::sync::Arc;

use anyhow::Result;
use svckit_transport_grpc::GrpcClientConfig;

use crate::SERVICE_NAME;
use crate::api::UserClientV1;
use crate::client::UserGrpcClient;

/// Connect a gRPC client to the user service at `uri`.
///
/// The returned handle is meant to be passed to consumers through their
/// constructors. Failing to connect after the configured retries is an error.
///
/// # Errors
/// Returns an error if the channel cannot be established.
///
/// # Example
/// ```ignore
/// let cfg = GrpcClientConfig::new("user_service");
/// let users = user_service_sdk::connect_client("http://127.0.0.1:50051", &cfg).await?;
/// let id = users.create(NewUser::new("alice")).await?;
/// ```
pub async fn connect_client(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Arc<dyn UserClientV1>> {
    let uri = uri.into();
    let client = UserGrpcClient::connect(uri.clone(), cfg).await?;
    tracing::info!(service = SERVICE_NAME, uri = %uri, "UserClientV1 client wired");
    Ok(Arc::new(client))
}
