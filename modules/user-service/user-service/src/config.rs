//! Configuration of the user-service binary.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use serde::{Deserialize, Serialize};
use svckit_bootstrap::LoggingConfig;

/// Prefix of environment overrides, e.g. `USER_SERVICE__STORAGE__MONGO__URI`.
pub const ENV_PREFIX: &str = "USER_SERVICE__";

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 50051));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the gRPC server binds to.
    pub listen_addr: SocketAddr,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Apply `--port` and `--mock`.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, mock: bool) {
        if let Some(port) = port {
            self.listen_addr.set_port(port);
        }
        if mock {
            self.storage.kind = StorageKind::Memory;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Mongo,
    /// Process-local map, lost on exit.
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub kind: StorageKind,
    /// Ignored unless `kind` is `mongo`.
    pub mongo: MongoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".to_owned(),
            database: "practice".to_owned(),
            collection: "user".to_owned(),
        }
    }
}
