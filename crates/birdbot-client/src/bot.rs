//! Connection lifecycle.
//!
//! All lifecycle operations serialize through one async mutex. While
//! connected, the session's writer lives behind that mutex and its reader
//! is owned by the receive task; closing cancels the task through the
//! session's token instead of touching the reader.

use std::sync::Arc;

use birdbot_core::{ConnectionState, Credential};
use tokio::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use crate::listener::{self, Listener};
use crate::transport::{Connector, FrameWriter};
use crate::websocket::WsConnector;
use crate::BotError;

/// Chat client handle. Clones share the same connection.
pub struct Bot<C: Connector> {
    shared: Arc<Shared<C>>,
}

struct Shared<C: Connector> {
    connector: C,
    credential: Credential,
    inner: Mutex<Inner<C::Writer>>,
}

pub(crate) struct Inner<W> {
    pub(crate) state: ConnectionState,
    address: Option<String>,
    pub(crate) session: Option<Session<W>>,
}

/// A live connection, as seen from outside the receive task.
pub(crate) struct Session<W> {
    pub(crate) writer: W,
    shutdown: CancellationToken,
}

impl<C: Connector> Clone for Bot<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Bot<WsConnector> {
    /// A bot speaking websocket.
    pub fn websocket(credential: Credential) -> Self {
        Self::new(WsConnector, credential)
    }
}

impl<C: Connector> Bot<C> {
    pub fn new(connector: C, credential: Credential) -> Self {
        Self {
            shared: Arc::new(Shared {
                connector,
                credential,
                inner: Mutex::new(Inner {
                    state: ConnectionState::Unconfigured,
                    address: None,
                    session: None,
                }),
            }),
        }
    }

    /// Set the endpoint address.
    pub async fn configure(&self, address: impl Into<String>) -> Result<(), BotError> {
        let address = address.into();
        let mut inner = self.lock().await;

        if address.is_empty() {
            return Err(BotError::InvalidConfiguration("address not supplied"));
        }
        if inner.state == ConnectionState::Connected {
            return Err(BotError::InvalidState {
                operation: "configure",
                state: inner.state,
            });
        }

        inner.address = Some(address);
        inner.state = ConnectionState::Configured;
        Ok(())
    }

    /// Open the session and start the receive loop.
    ///
    /// Returns once the handshake is done; the loop keeps running in its own
    /// task, observable through the returned [`Listener`].
    pub async fn connect(&self) -> Result<Listener, BotError> {
        let mut inner = self.lock().await;

        if inner.state == ConnectionState::Connected {
            return Err(BotError::InvalidState {
                operation: "connect",
                state: inner.state,
            });
        }
        let Some(address) = inner.address.clone() else {
            return Err(BotError::InvalidConfiguration("address not supplied"));
        };

        tracing::info!("Connecting to {}", address);
        let (writer, reader) = match self
            .shared
            .connector
            .open(&address, &self.shared.credential)
            .await
        {
            Ok(halves) => halves,
            Err(e) => {
                inner.state = ConnectionState::Failed;
                return Err(e);
            }
        };

        let shutdown = CancellationToken::new();
        inner.session = Some(Session {
            writer,
            shutdown: shutdown.clone(),
        });
        inner.state = ConnectionState::Connected;
        drop(inner);

        tracing::info!("Connected to {}", address);
        Ok(listener::spawn(self.clone(), reader, shutdown))
    }

    /// Stop the receive loop and close the session.
    ///
    /// The session is released even when the transport fails to close.
    pub async fn close(&self) -> Result<(), BotError> {
        let mut inner = self.lock().await;

        let Some(mut session) = inner.session.take() else {
            return Err(BotError::AlreadyClosed);
        };
        session.shutdown.cancel();
        inner.state = ConnectionState::Closed;

        session.writer.close().await.map_err(BotError::CloseFailed)?;
        tracing::info!("Connection closed");
        Ok(())
    }

    pub async fn state(&self) -> ConnectionState {
        self.lock().await.state
    }

    pub async fn address(&self) -> Option<String> {
        self.lock().await.address.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.lock().await.session.is_some()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Inner<C::Writer>> {
        self.shared.inner.lock().await
    }

    /// Drop the session after the receive loop lost it.
    ///
    /// Returns `false` when the loop had already been cancelled by
    /// [`close`](Self::close), in which case nothing changes.
    pub(crate) async fn release_lost(&self, shutdown: &CancellationToken) -> bool {
        let mut inner = self.lock().await;
        if shutdown.is_cancelled() {
            return false;
        }
        inner.session = None;
        inner.state = ConnectionState::Failed;
        true
    }
}
