//! One-shot WebSocket client.
//!
//! Opens a (TLS) WebSocket, sends one text frame, waits for one data frame in
//! reply and closes with code 1000.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod session;
pub mod tls;

pub use session::{CLOSE_REASON, Reply, SessionConfig, SessionError, run_session};
pub use tls::{TlsError, client_config};
