//! Client side of birdbot.
//!
//! [`Bot`] owns the connection lifecycle (configure, connect, close).
//! Connecting spawns a receive loop that answers every private message with
//! a canned reply; the returned [`Listener`] reports how that loop ended.

mod bot;
mod error;
mod listener;
mod reaction;
mod transport;
mod websocket;

#[cfg(test)]
mod testing;

pub use bot::Bot;
pub use error::{BotError, TransportError};
pub use listener::Listener;
pub use transport::{Connector, FrameReader, FrameWriter};
pub use websocket::{WsConnector, WsReader, WsWriter};
