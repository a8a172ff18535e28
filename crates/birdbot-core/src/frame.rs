//! Frame codec.
//!
//! A frame is `<TAG> <body>`: the tag is everything before the first space,
//! the body is whatever follows the tag (leading space included) and holds a
//! JSON object. Decoding is best-effort; it never fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tag of a private message, inbound and outbound.
pub const PRIVMSG: &str = "PRIVMSG";

/// Fixed `data` value carried by every reply.
pub const REPLY_DATA: &str = "MiyanoBird";

/// Structured fields of a frame body.
///
/// Fields that are missing or of the wrong type stay at their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Sender identifier.
    pub nick: String,
    /// Free-form message data.
    pub data: String,
    /// Epoch-based timestamp.
    pub timestamp: i64,
}

impl Payload {
    /// Decode a frame body, keeping whatever fields can be recovered.
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::default();
        }

        let fields = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                tracing::debug!("frame body is not an object: {}", other);
                return Self::default();
            }
            Err(e) => {
                tracing::debug!("undecodable frame body {:?}: {}", body, e);
                return Self::default();
            }
        };

        Self {
            nick: string_field(&fields, "nick"),
            data: string_field(&fields, "data"),
            timestamp: fields.get("timestamp").and_then(Value::as_i64).unwrap_or_default(),
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// A decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Leading word of the frame.
    pub tag: String,
    /// Decoded body. Always present; defaulted when the body is unusable.
    pub payload: Payload,
}

impl Message {
    /// Whether this is a `PRIVMSG` frame.
    pub fn is_private_message(&self) -> bool {
        self.tag == PRIVMSG
    }
}

/// Kinds of frame the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Canned private-message reply.
    PrivateMessage,
}

/// Split a raw frame into its tag and decoded payload.
///
/// A frame without a space is all tag; its payload is the default.
pub fn decode(raw: &str) -> Message {
    let (tag, body) = match raw.find(' ') {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    };

    Message {
        tag: tag.to_owned(),
        payload: Payload::from_body(body),
    }
}

/// Build an outbound frame of `kind` addressed to `sender`.
pub fn encode(kind: ReplyKind, sender: &str) -> String {
    match kind {
        ReplyKind::PrivateMessage => {
            let body = serde_json::json!({ "nick": sender, "data": REPLY_DATA });
            format!("{PRIVMSG} {body}")
        }
    }
}
