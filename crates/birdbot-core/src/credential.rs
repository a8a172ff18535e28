//! Session credential.
//!
//! The server authenticates the websocket upgrade through a cookie of the
//! form `authtoken=<token>;jwt=<token>`.

use std::fmt;

/// An authentication token, fixed for the life of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Cookie` header sent with the handshake.
    pub fn cookie(&self) -> String {
        format!("authtoken={0};jwt={0}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}
