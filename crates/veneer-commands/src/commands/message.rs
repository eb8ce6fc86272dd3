//! /m - private message to another participant

use super::{find_player, player_and_text};
use crate::registry::{Command, Reply};
use veneer_core::{Error, Result};
use veneer_overlay::Overlay;

pub struct MessageCommand;

impl Command for MessageCommand {
    fn name(&self) -> &str { "m" }

    fn usage(&self) -> &str { "/m <player> <msg>" }

    fn description(&self) -> &str { "Private message" }

    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply> {
        let (player, message) = player_and_text(args)
            .ok_or_else(|| Error::validation("Usage: /m <player> <message>"))?;
        let (id, _) = find_player(overlay, player)?;
        overlay.gossip().send_private(id.clone(), &message);
        Ok(Reply::private(format!(
            "[PM to {}] {}",
            overlay.context().display_name(&id),
            message
        )))
    }
}
