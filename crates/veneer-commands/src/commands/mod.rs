//! Built-in chat commands

pub mod gradient;
pub mod info;
pub mod level;
pub mod message;
pub mod name;
pub mod nick;

use veneer_core::{Error, Participant, ParticipantId, Result};
use veneer_overlay::Overlay;

/// Resolve a partial, case-insensitive player name against the registry.
pub(crate) fn find_player(overlay: &Overlay, needle: &str) -> Result<(ParticipantId, Participant)> {
    overlay
        .context()
        .find_participant(needle)
        .ok_or_else(|| Error::lookup(format!("Player \"{}\" not found.", needle)))
}

/// Split `<player> <rest...>`; `None` when either part is missing.
pub(crate) fn player_and_text(args: &str) -> Option<(&str, String)> {
    let mut parts = args.split_whitespace();
    let player = parts.next()?;
    let text = parts.collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some((player, text))
}
