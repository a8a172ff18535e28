//! Receive loop.

use birdbot_core::decode;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::transport::{Connector, FrameReader};
use crate::{Bot, BotError, TransportError};

/// Handle to a running receive loop.
///
/// The loop ends with `Ok(())` when the bot is closed, or with
/// [`BotError::ConnectionLost`] when the transport fails underneath it.
#[derive(Debug)]
pub struct Listener {
    task: JoinHandle<Result<(), BotError>>,
}

impl Listener {
    /// Wait for the loop to finish.
    pub async fn join(self) -> Result<(), BotError> {
        self.task.await?
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub(crate) fn spawn<C: Connector>(
    bot: Bot<C>,
    reader: C::Reader,
    shutdown: CancellationToken,
) -> Listener {
    Listener {
        task: tokio::spawn(listen(bot, reader, shutdown)),
    }
}

async fn listen<C: Connector>(
    bot: Bot<C>,
    mut reader: C::Reader,
    shutdown: CancellationToken,
) -> Result<(), BotError> {
    loop {
        let frame = tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                tracing::debug!("Receive loop cancelled");
                return Ok(());
            }
            frame = reader.recv() => frame,
        };

        let error = match frame {
            Some(Ok(raw)) => {
                dispatch(&bot, &raw).await;
                continue;
            }
            Some(Err(e)) => e,
            None => TransportError::Closed,
        };

        if bot.release_lost(&shutdown).await {
            tracing::error!("Connection lost: {}", error);
            return Err(BotError::ConnectionLost(error));
        }
        return Ok(());
    }
}

async fn dispatch<C: Connector>(bot: &Bot<C>, raw: &str) {
    tracing::debug!("<- {}", raw);
    let message = decode(raw);
    if !message.is_private_message() {
        return;
    }

    let payload = &message.payload;
    tracing::info!(
        nick = %payload.nick,
        timestamp = payload.timestamp,
        "Private message: {}",
        payload.data
    );
    if let Err(e) = bot.react(&payload.nick).await {
        tracing::warn!("Reply to {:?} failed: {}", payload.nick, e);
    }
}
