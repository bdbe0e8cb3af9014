//! Wiring of storage, service and gRPC controller into a running server.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tonic::service::Routes;
use user_service_sdk::{SERVICE_NAME, UserServer};

use crate::api::grpc::UserController;
use crate::config::{ServiceConfig, StorageConfig, StorageKind};
use crate::domain::{Service, UserDao};
use crate::infra::storage::{InMemoryUserDao, MongoUserDao};

/// Build the DAO selected by `storage.kind`.
///
/// # Errors
/// Returns an error if MongoDB cannot be reached.
pub async fn build_dao(storage: &StorageConfig) -> anyhow::Result<Arc<dyn UserDao>> {
    match storage.kind {
        StorageKind::Memory => {
            tracing::warn!("using in-memory storage, data is lost on exit");
            Ok(Arc::new(InMemoryUserDao::new()))
        }
        StorageKind::Mongo => {
            let mongo = &storage.mongo;
            let dao = MongoUserDao::connect(&mongo.uri, &mongo.database, &mongo.collection)
                .await
                .with_context(|| format!("failed to connect to MongoDB database '{}'", mongo.database))?;
            Ok(Arc::new(dao))
        }
    }
}

/// gRPC routes serving `user.v1.User` on top of `dao`.
pub fn build_routes(dao: Arc<dyn UserDao>) -> Routes {
    let service = Arc::new(Service::new(dao));
    Routes::new(UserServer::new(UserController::new(service)))
}

/// Serve until `cancel` fires.
///
/// # Errors
/// Returns an error if storage is unavailable or the listener cannot be bound.
pub async fn run(config: &ServiceConfig, cancel: CancellationToken) -> anyhow::Result<()> {
    let dao = build_dao(&config.storage).await?;
    let listener = svckit_transport_grpc::bind_tcp(config.listen_addr).await?;

    tracing::info!(service = SERVICE_NAME, storage = ?config.storage.kind, "user service starting");
    svckit_transport_grpc::serve_tcp(listener, build_routes(dao), cancel).await
}
