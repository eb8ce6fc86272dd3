//! /nick - local relabel of another participant

use super::{find_player, player_and_text};
use crate::registry::{Command, Effect, Reply};
use veneer_core::{Error, Result};
use veneer_overlay::store::MAX_NAME_CHARS;
use veneer_overlay::Overlay;

pub struct NickCommand;

impl Command for NickCommand {
    fn name(&self) -> &str { "nick" }

    fn usage(&self) -> &str { "/nick <player> <name>" }

    fn description(&self) -> &str { "Nickname a player" }

    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply> {
        let (player, nickname) = player_and_text(args)
            .ok_or_else(|| Error::validation("Usage: /nick <player> <nickname>"))?;
        if nickname.chars().count() > MAX_NAME_CHARS {
            return Err(Error::validation("Nickname too long (max 20 chars)."));
        }
        let (id, participant) = find_player(overlay, player)?;
        overlay
            .context()
            .store_mut()
            .set_nickname(id.clone(), &nickname)?;
        overlay.gossip().announce_nickname(id, &nickname);
        Ok(Reply::info(format!(
            "Nicknamed {} as \"{}\"",
            participant.user_name, nickname
        ))
        .with_effect(Effect::Reconcile))
    }
}
