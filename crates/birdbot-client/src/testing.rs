//! In-process transport for driving a [`Bot`](crate::Bot) without sockets.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use birdbot_core::Credential;
use tokio::sync::mpsc;

use crate::transport::{Connector, FrameReader, FrameWriter};
use crate::{BotError, TransportError};

/// Hands out pre-arranged sessions in order.
#[derive(Clone, Default)]
pub(crate) struct MemoryConnector {
    inner: Arc<ConnectorState>,
}

#[derive(Default)]
struct ConnectorState {
    sessions: Mutex<VecDeque<(MemoryWriter, MemoryReader)>>,
    handshakes: Mutex<Vec<(String, String)>>,
    opens: AtomicUsize,
    refuse: Option<u16>,
}

impl MemoryConnector {
    /// A connector whose handshakes are always rejected with `status`.
    pub(crate) fn refusing(status: u16) -> Self {
        Self {
            inner: Arc::new(ConnectorState {
                refuse: Some(status),
                ..ConnectorState::default()
            }),
        }
    }

    /// Queue a session for the next `open` and return the server's end of it.
    pub(crate) fn push_session(&self) -> Remote {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let flags = Arc::new(Flags::default());

        let writer = MemoryWriter {
            outbound: outbound_tx,
            flags: Arc::clone(&flags),
        };
        let reader = MemoryReader {
            inbound: inbound_rx,
        };
        self.inner
            .sessions
            .lock()
            .unwrap()
            .push_back((writer, reader));

        Remote {
            inbound: inbound_tx,
            outbound: outbound_rx,
            flags,
        }
    }

    pub(crate) fn open_count(&self) -> usize {
        self.inner.opens.load(Ordering::SeqCst)
    }

    /// `(address, cookie)` of every handshake attempted.
    pub(crate) fn handshakes(&self) -> Vec<(String, String)> {
        self.inner.handshakes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Writer = MemoryWriter;
    type Reader = MemoryReader;

    async fn open(
        &self,
        address: &str,
        credential: &Credential,
    ) -> Result<(MemoryWriter, MemoryReader), BotError> {
        self.inner.opens.fetch_add(1, Ordering::SeqCst);
        self.inner
            .handshakes
            .lock()
            .unwrap()
            .push((address.to_owned(), credential.cookie()));

        if let Some(status) = self.inner.refuse {
            return Err(BotError::HandshakeFailed {
                status: Some(status),
                reason: "refused".into(),
            });
        }
        self.inner
            .sessions
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BotError::HandshakeFailed {
                status: None,
                reason: "no session queued".into(),
            })
    }
}

#[derive(Default)]
struct Flags {
    closed: AtomicBool,
    fail_close: AtomicBool,
}

/// Server end of a memory session.
pub(crate) struct Remote {
    inbound: mpsc::UnboundedSender<Result<String, TransportError>>,
    /// Frames the bot has sent.
    pub(crate) outbound: mpsc::UnboundedReceiver<String>,
    flags: Arc<Flags>,
}

impl Remote {
    pub(crate) fn push(&self, frame: &str) {
        self.inbound.send(Ok(frame.to_owned())).unwrap();
    }

    pub(crate) fn push_error(&self, error: std::io::Error) {
        self.inbound.send(Err(error.into())).unwrap();
    }

    pub(crate) fn fail_close(&self) {
        self.flags.fail_close.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.flags.closed.load(Ordering::SeqCst)
    }
}

pub(crate) struct MemoryWriter {
    outbound: mpsc::UnboundedSender<String>,
    flags: Arc<Flags>,
}

#[async_trait]
impl FrameWriter for MemoryWriter {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        if self.flags.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.outbound
            .send(frame)
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.flags.fail_close.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("close refused").into());
        }
        self.flags.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) struct MemoryReader {
    inbound: mpsc::UnboundedReceiver<Result<String, TransportError>>,
}

#[async_trait]
impl FrameReader for MemoryReader {
    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.recv().await
    }
}
