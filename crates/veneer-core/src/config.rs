//! Overlay configuration
//!
//! All tunable parameters in one place. Loaded from TOML at startup,
//! falls back to defaults if no config file exists.

use crate::types::{FieldKind, GradientSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Usernames whose real rank is never masked and who never see masked ranks.
    pub privileged: Vec<String>,
    /// Initial local override state.
    pub local: LocalConfig,
    /// Period of the reconciliation tick in milliseconds.
    pub reconcile_tick_ms: u64,
    /// Fill written into a text style when the render hook substitutes a name.
    pub highlight_fill: u32,
    /// Identity-bearing elements, scanned in this order.
    pub catalog: Vec<CatalogEntry>,
    /// Colour pairs for local chat output.
    pub chat: ChatColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub display_name: Option<String>,
    pub name_active: bool,
    pub rank_label: String,
    pub gradient: Option<GradientSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub selector: String,
    pub field: FieldKind,
}

impl CatalogEntry {
    pub fn new(selector: impl Into<String>, field: FieldKind) -> Self {
        Self {
            selector: selector.into(),
            field,
        }
    }
}

/// `[primary, secondary]` colour pairs, passed straight to the host chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatColors {
    pub info: [String; 2],
    pub error: [String; 2],
    pub private: [String; 2],
}

// ============================================================
// Defaults
// ============================================================

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            privileged: vec!["ki1la".into(), "khayrie".into(), "Il fait".into()],
            local: LocalConfig::default(),
            reconcile_tick_ms: 300,
            highlight_fill: 0xFFD700,
            catalog: default_catalog(),
            chat: ChatColors::default(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            display_name: Some("★Custom★".into()),
            name_active: true,
            rank_label: "Level 999".into(),
            gradient: None,
        }
    }
}

impl Default for ChatColors {
    fn default() -> Self {
        Self {
            info: ["#FFD700".into(), "#FFA500".into()],
            error: ["#FF0000".into(), "#FF0000".into()],
            private: ["#00FF00".into(), "#00AA00".into()],
        }
    }
}

fn default_catalog() -> Vec<CatalogEntry> {
    let names = [
        "#pretty_top_name",
        ".newbonklobby_playerentry_name",
        ".ingamescoreboard_playername",
        ".ingamechatname",
        ".newbonklobby_chat_msg_name",
        "#ingamewinner_top",
        ".replay_playername",
    ];
    let ranks = ["#pretty_top_level", ".newbonklobby_playerentry_level"];
    names
        .iter()
        .map(|s| CatalogEntry::new(*s, FieldKind::Name))
        .chain(ranks.iter().map(|s| CatalogEntry::new(*s, FieldKind::Rank)))
        .collect()
}

// ============================================================
// Loading
// ============================================================

/// Load any config table from a TOML file, falling back to its defaults when
/// the file is missing or does not parse.
pub fn load_toml<T: DeserializeOwned + Default>(path: &Path) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {} - using defaults", path.display(), e);
                T::default()
            }
        },
        Err(_) => {
            tracing::info!("No config at {} - using defaults", path.display());
            T::default()
        }
    }
}

impl OverlayConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        load_toml(path)
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn reconcile_tick(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reconcile_tick_ms.max(1))
    }
}
