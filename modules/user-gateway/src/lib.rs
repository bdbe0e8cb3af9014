//! User gateway
//!
//! Edge HTTP service exposing `UserApiV1`. Every call is forwarded to the user
//! service through the SDK client handed to [`controller::ControllerV1::new`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod module;
pub mod rest;

pub use api::UserApiV1;
pub use config::GatewayConfig;
pub use controller::ControllerV1;
pub use error::GatewayError;
