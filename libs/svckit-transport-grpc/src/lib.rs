#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

//! gRPC transport helpers shared by the user service and its consumers.

pub mod client;
pub mod server;

pub use client::{ClientSettings, GrpcClientConfig, connect_channel, connect_with_retry};
pub use server::{bind_tcp, serve_tcp};
