//! Configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Contents of the JSON configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Token presented in the handshake cookie.
    pub auth_token: String,
    /// Websocket endpoint, e.g. `wss://chat.example.com/ws`.
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
