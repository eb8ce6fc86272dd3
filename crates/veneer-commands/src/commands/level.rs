//! /level - set the local rank label

use crate::registry::{Command, Reply};
use veneer_core::{Error, Result};
use veneer_overlay::Overlay;

pub struct LevelCommand;

impl Command for LevelCommand {
    fn name(&self) -> &str { "level" }

    fn usage(&self) -> &str { "/level <0-9999>" }

    fn description(&self) -> &str {
        "Change your level (hidden from privileged users)"
    }

    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply> {
        let level: i64 = args
            .parse()
            .map_err(|_| Error::validation("Level must be 0-9999."))?;
        let mut store = overlay.context().store_mut();
        store.set_local_level(level)?;
        Ok(Reply::published(format!(
            "Your level is now: {} (hidden from privileged users)",
            store.local().rank_label
        )))
    }
}
