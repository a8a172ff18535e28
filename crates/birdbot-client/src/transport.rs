//! Transport seams.
//!
//! A [`Connector`] opens a session and hands back independent writer and
//! reader halves. The writer stays with the [`Bot`](crate::Bot) behind its
//! lock; the reader moves into the receive task.

use async_trait::async_trait;
use birdbot_core::Credential;

use crate::{BotError, TransportError};

/// Opens authenticated sessions.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Writer: FrameWriter;
    type Reader: FrameReader;

    /// Perform the handshake against `address`.
    ///
    /// Failures are reported as [`BotError::HandshakeFailed`].
    async fn open(
        &self,
        address: &str,
        credential: &Credential,
    ) -> Result<(Self::Writer, Self::Reader), BotError>;
}

/// Outbound half of a session.
#[async_trait]
pub trait FrameWriter: Send + 'static {
    /// Send one text frame.
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Close the session.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Inbound half of a session.
#[async_trait]
pub trait FrameReader: Send + 'static {
    /// Wait for the next text frame. `None` once the peer has ended the stream.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;
}
