//! Error types.

use birdbot_core::ConnectionState;
use tokio_tungstenite::tungstenite;

/// Failure of the underlying transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("connection closed by peer")]
    Closed,
}

/// Errors from [`Bot`](crate::Bot) operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: ConnectionState,
    },
    #[error("handshake failed with status {}: {reason}", display_status(.status))]
    HandshakeFailed { status: Option<u16>, reason: String },
    #[error("connection already closed")]
    AlreadyClosed,
    #[error("close failed: {0}")]
    CloseFailed(#[source] TransportError),
    #[error("no connection available")]
    NoConnection,
    #[error("send failed: {0}")]
    SendFailed(#[source] TransportError),
    #[error("connection lost: {0}")]
    ConnectionLost(#[source] TransportError),
    #[error("receive loop aborted: {0}")]
    ListenerAborted(#[from] tokio::task::JoinError),
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_owned(), |s| s.to_string())
}
