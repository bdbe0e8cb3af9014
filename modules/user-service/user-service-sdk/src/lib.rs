//! User service SDK
//!
//! This crate provides everything needed to consume the user service:
//! - Client trait (`UserClientV1`)
//! - Models (`User`, `NewUser`, `UserPatch`, `UserListFilter`)
//! - Error types (`UserServiceError`, `InvalidIdError`)
//! - Wiring function (`connect_client`)
//! - Proto stubs for the server implementation
//!
//! ## Usage
//!
//! ```ignore
//! use user_service_sdk::{NewUser, UserClientV1, connect_client};
//!
//! let users = connect_client("http://127.0.0.1:50051", &cfg).await?;
//! let id = users.create(NewUser::new("alice")).await?;
//! let user = users.get_one(id).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT, MODELS AND ERRORS ===
mod api;
pub mod convert;
pub mod errors;
pub mod models;

pub use api::UserClientV1;
pub use errors::{InvalidIdError, UserServiceError};
pub use models::{NewUser, User, UserListFilter, UserPatch};

// === WIRING ===
mod client;
mod wiring;
pub use wiring::connect_client;

pub use bson::oid::ObjectId;

// === GRPC PROTO STUBS (for server implementation) ===
/// Generated protobuf types for the `user.v1.User` service.
#[allow(clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("user.v1");
}

pub use proto::user_server::{User as UserService, UserServer};

/// Fully qualified gRPC service name.
pub const SERVICE_NAME: &str = "user.v1.User";
