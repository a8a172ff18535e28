//! Canned replies.

use birdbot_core::{ReplyKind, encode};

use crate::transport::{Connector, FrameWriter};
use crate::{Bot, BotError};

impl<C: Connector> Bot<C> {
    /// Send the canned private-message reply to `sender`.
    pub async fn react(&self, sender: &str) -> Result<(), BotError> {
        let mut inner = self.lock().await;
        let session = inner.session.as_mut().ok_or(BotError::NoConnection)?;

        let frame = encode(ReplyKind::PrivateMessage, sender);
        tracing::debug!("-> {}", frame);
        session.writer.send(frame).await.map_err(BotError::SendFailed)
    }
}
