//! Core types for birdbot.
//!
//! This crate provides the wire primitives: the frame codec, the session
//! credential, and the connection lifecycle states. It performs no I/O.

mod credential;
mod frame;

pub use credential::Credential;
pub use frame::{Message, PRIVMSG, Payload, REPLY_DATA, ReplyKind, decode, encode};

use std::fmt;

/// Connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No endpoint address yet.
    #[default]
    Unconfigured,
    /// Address set, ready to connect.
    Configured,
    /// Handshake done, receive loop running.
    Connected,
    /// Closed on request.
    Closed,
    /// Handshake failed or the connection was lost.
    Failed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Connected => "connected",
            Self::Closed => "closed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
