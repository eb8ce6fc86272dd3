//! Simulated host session for driving an overlay from a terminal.

use serde::{Deserialize, Serialize};
use std::path::Path;
use veneer_core::{ChatSink, OverlayConfig, Participant, TextObject, TextRenderer, Transport};
use veneer_overlay::memory::{MemoryDocument, MemoryRegistry};

/// Overlay config plus the players of the simulated session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    #[serde(flatten)]
    pub overlay: OverlayConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub local_id: String,
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            local_id: "1".into(),
            players: vec![
                PlayerConfig { id: "1".into(), user_name: "alice".into(), level: 12 },
                PlayerConfig { id: "2".into(), user_name: "bob".into(), level: 30 },
                PlayerConfig { id: "3".into(), user_name: "khayrie".into(), level: 88 },
            ],
        }
    }
}

impl SimConfig {
    /// Load from TOML, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        veneer_core::load_toml(path)
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn registry(&self) -> MemoryRegistry {
        let registry = MemoryRegistry::new(self.session.local_id.as_str());
        for p in &self.session.players {
            registry.insert(p.id.as_str(), Participant::new(&p.user_name, p.level));
        }
        registry
    }

    /// One lobby name entry and one lobby level entry per player.
    pub fn seed(&self, document: &MemoryDocument) {
        for p in &self.session.players {
            document.append(".newbonklobby_playerentry_name", &p.user_name);
            document.append(
                ".newbonklobby_playerentry_level",
                &veneer_core::rank_label(p.level),
            );
        }
    }
}

pub struct StdoutTransport;

impl Transport for StdoutTransport {
    fn send(&self, payload: String) {
        println!(">> {}", payload);
    }
}

pub struct StdoutChat;

impl ChatSink for StdoutChat {
    fn display(&self, text: &str, primary: &str, _secondary: &str) {
        println!("[chat {}] {}", primary, text);
    }
}

/// Stand-in text primitive: prints what would be drawn.
pub struct StdoutRenderer;

impl TextRenderer for StdoutRenderer {
    type Output = ();

    fn update_text(&self, object: &mut TextObject) {
        println!("[draw #{:06X}] {}", object.style.fill, object.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_core::ParticipantRegistry;

    #[test]
    fn session_table_sits_beside_overlay_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veneer.toml");
        std::fs::write(
            &path,
            r#"
privileged = ["owner"]
reconcile_tick_ms = 50

[session]
local_id = "7"

[[session.players]]
id = "7"
user_name = "zed"
level = 3
"#,
        )
        .unwrap();

        let config = SimConfig::load(&path);
        assert_eq!(config.overlay.privileged, vec!["owner"]);
        assert_eq!(config.overlay.reconcile_tick_ms, 50);
        assert_eq!(config.overlay.catalog.len(), 9);
        let registry = config.registry();
        assert_eq!(registry.local_id().as_str(), "7");
        assert_eq!(registry.participants()[0].1, Participant::new("zed", 3));
    }

    #[test]
    fn missing_or_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = SimConfig::load(&dir.path().join("absent.toml"));
        assert_eq!(missing.session.players.len(), 3);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "session = [").unwrap();
        assert_eq!(SimConfig::load(&broken).session.local_id, "1");
    }

    #[test]
    fn seeded_document_has_a_name_and_level_per_player() {
        let document = MemoryDocument::new();
        SimConfig::default().seed(&document);
        let texts: Vec<String> = document.dump().into_iter().map(|(_, _, t)| t).collect();
        assert_eq!(texts[..2], ["alice".to_string(), "Level 12".to_string()]);
        assert_eq!(texts.len(), 6);
    }
}
