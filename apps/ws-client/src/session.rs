//! The send-one, receive-one, close exchange.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Message, Utf8Bytes};
use tokio_tungstenite::{Connector, connect_async_tls_with_config};

/// Reason sent with the normal-closure frame.
pub const CLOSE_REASON: &str = "going to close";

const CLOSE_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// `wss://` (or `ws://`) endpoint.
    pub url: String,
    /// Text payload of the single frame sent.
    pub message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: "wss://127.0.0.1:8000/ws".to_owned(),
            message: "hello".to_owned(),
        }
    }
}

/// First data frame received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Binary(Vec<u8>),
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// Each variant names the step that failed.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("dial failed: {0}")]
    Dial(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("ws write failed: {0}")]
    Write(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("ws read failed: {0}")]
    Read(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("ws read failed: connection closed before a reply arrived")]
    ClosedBeforeReply,

    #[error("ws close failed: {0}")]
    Close(#[source] tokio_tungstenite::tungstenite::Error),
}

/// Run one exchange against `config.url`.
///
/// `connector` is used for `wss://` URLs; `None` falls back to the library default.
///
/// # Errors
/// Returns the step that failed: dial, write, read or close.
pub async fn run_session(config: &SessionConfig, connector: Option<Connector>) -> Result<Reply, SessionError> {
    let (mut ws, response) = connect_async_tls_with_config(config.url.as_str(), None, false, connector)
        .await
        .map_err(SessionError::Dial)?;
    tracing::debug!(url = %config.url, status = %response.status(), "websocket connected");

    ws.send(Message::text(config.message.clone()))
        .await
        .map_err(SessionError::Write)?;

    let reply = loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => break Reply::Text(text.as_str().to_owned()),
            Some(Ok(Message::Binary(bytes))) => break Reply::Binary(bytes.to_vec()),
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
            Some(Ok(Message::Close(_))) | None => return Err(SessionError::ClosedBeforeReply),
            Some(Err(e)) => return Err(SessionError::Read(e)),
        }
    };
    tracing::info!(%reply, "received message");

    let frame = CloseFrame {
        code: CloseCode::Normal,
        reason: Utf8Bytes::from_static(CLOSE_REASON),
    };
    ws.send(Message::Close(Some(frame)))
        .await
        .map_err(SessionError::Close)?;

    // Wait for the server's close reply; a peer that just drops is fine too.
    let drain = async { while let Some(Ok(_)) = ws.next().await {} };
    if tokio::time::timeout(CLOSE_DRAIN_TIMEOUT, drain).await.is_err() {
        tracing::debug!("server did not acknowledge close in time");
    }

    Ok(reply)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_tls_server() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.url, "wss://127.0.0.1:8000/ws");
        assert_eq!(cfg.message, "hello");
    }

    #[test]
    fn reply_display() {
        assert_eq!(Reply::Text("hi".to_owned()).to_string(), "hi");
        assert_eq!(Reply::Binary(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[tokio::test]
    async fn dial_failure_is_tagged() {
        let cfg = SessionConfig {
            url: "ws://127.0.0.1:1/ws".to_owned(),
            ..SessionConfig::default()
        };
        let err = run_session(&cfg, None).await.unwrap_err();
        assert!(matches!(err, SessionError::Dial(_)));
        assert!(err.to_string().starts_with("dial failed"));
    }
}
