//! Veneer Core - identity types, gossip wire format, host contracts, errors

pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod protocol;
pub mod types;

pub use color::Color;
pub use config::{load_toml, CatalogEntry, ChatColors, LocalConfig, OverlayConfig};
pub use error::{Error, Result};
pub use host::*;
pub use protocol::*;
pub use types::*;
