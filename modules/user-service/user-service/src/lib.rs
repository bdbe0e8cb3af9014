//! User service
//!
//! Layering, leaf first:
//! - `infra::storage`: `UserDao` implementations (MongoDB, in-memory)
//! - `domain`: the DAO contract, error types and the `Service` facade
//! - `api::grpc`: `UserController`, the tonic adapter for `user.v1.User`
//! - `module`: wiring of the above into a running server

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use api::grpc::UserController;
pub use config::{MongoConfig, ServiceConfig, StorageConfig, StorageKind};
pub use domain::{DomainError, Service, StorageError, StorageOp, UserDao};
pub use infra::storage::{InMemoryUserDao, MongoUserDao};
