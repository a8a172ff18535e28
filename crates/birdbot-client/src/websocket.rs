//! Websocket transport over `tokio-tungstenite`.

use async_trait::async_trait;
use birdbot_core::Credential;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::transport::{Connector, FrameReader, FrameWriter};
use crate::{BotError, TransportError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens websocket sessions authenticated by cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    type Writer = WsWriter;
    type Reader = WsReader;

    async fn open(
        &self,
        address: &str,
        credential: &Credential,
    ) -> Result<(WsWriter, WsReader), BotError> {
        let mut request = address.into_client_request().map_err(handshake_failed)?;

        let cookie = HeaderValue::from_str(&credential.cookie()).map_err(|e| {
            BotError::HandshakeFailed {
                status: None,
                reason: format!("credential is not a valid header value: {e}"),
            }
        })?;
        request.headers_mut().insert(header::COOKIE, cookie);

        let (ws, response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(handshake_failed)?;
        tracing::debug!("Handshake with {} answered {}", address, response.status());

        let (sink, stream) = ws.split();
        Ok((WsWriter { sink }, WsReader { stream }))
    }
}

fn handshake_failed(e: tungstenite::Error) -> BotError {
    let status = match &e {
        tungstenite::Error::Http(response) => Some(response.status().as_u16()),
        _ => None,
    };
    BotError::HandshakeFailed {
        status,
        reason: e.to_string(),
    }
}

/// Write half of a websocket session.
#[derive(Debug)]
pub struct WsWriter {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameWriter for WsWriter {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.sink.send(Message::Text(frame.into())).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.sink.close().await?;
        Ok(())
    }
}

/// Read half of a websocket session.
#[derive(Debug)]
pub struct WsReader {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameReader for WsReader {
    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(data)) => {
                    return Some(Ok(String::from_utf8_lossy(&data).into_owned()));
                }
                Ok(Message::Close(frame)) => {
                    tracing::debug!("Peer sent close frame: {:?}", frame);
                    return None;
                }
                // Pings are answered by tungstenite.
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
