#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The client against a local plain `ws://` echo server.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use ws_client::{CLOSE_REASON, Reply, SessionConfig, SessionError, run_session};

/// Accept one connection, echo the first data frame, report the close frame received.
async fn echo_once(listener: TcpListener, echo: bool, closed: oneshot::Sender<Option<(CloseCode, String)>>) {
    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

    let mut close = None;
    while let Some(Ok(msg)) = ws.next().await {
        match msg {
            Message::Text(_) | Message::Binary(_) if echo => {
                ws.send(Message::Ping(Vec::new().into())).await.unwrap();
                ws.send(msg).await.unwrap();
            }
            Message::Text(_) | Message::Binary(_) => {
                ws.close(None).await.unwrap();
            }
            Message::Close(frame) => {
                close = frame.map(|f| (f.code, f.reason.as_str().to_owned()));
            }
            _ => {}
        }
    }
    let _ = closed.send(close);
}

async fn local_server(echo: bool) -> (String, oneshot::Receiver<Option<(CloseCode, String)>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(echo_once(listener, echo, tx));
    (format!("ws://{addr}/ws"), rx)
}

#[tokio::test]
async fn reply_is_received_and_close_frame_sent() {
    let (url, closed) = local_server(true).await;
    let config = SessionConfig {
        url,
        message: "hello".to_owned(),
    };

    let reply = run_session(&config, None).await.unwrap();
    assert_eq!(reply, Reply::Text("hello".to_owned()));

    let (code, reason) = closed.await.unwrap().expect("close frame received");
    assert_eq!(code, CloseCode::Normal);
    assert_eq!(reason, CLOSE_REASON);
}

#[tokio::test]
async fn server_closing_first_is_a_read_failure() {
    let (url, _closed) = local_server(false).await;
    let config = SessionConfig {
        url,
        message: "hello".to_owned(),
    };

    let err = run_session(&config, None).await.unwrap_err();
    assert!(matches!(err, SessionError::ClosedBeforeReply));
}
