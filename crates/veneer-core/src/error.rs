//! Error types for Veneer
//!
//! Every variant is local and recoverable. `Validation` and `Lookup` are
//! rendered verbatim to the local chat, so their messages are user-facing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Argument out of bounds or badly formatted. State is left unchanged.
    #[error("{0}")]
    Validation(String),

    /// A named participant could not be found in the registry.
    #[error("{0}")]
    Lookup(String),

    /// Malformed gossip payload or command line.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}
