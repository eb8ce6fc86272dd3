//! /name - set or toggle the local display name

use crate::registry::{Command, Reply};
use veneer_core::Result;
use veneer_overlay::Overlay;

pub struct NameCommand;

impl Command for NameCommand {
    fn name(&self) -> &str { "name" }

    fn usage(&self) -> &str { "/name [text]" }

    fn description(&self) -> &str {
        "Change your displayed name (no text toggles it)"
    }

    /// Untrimmed, so a bare `/name` toggles while `/name ` with only blanks
    /// is rejected as an empty name.
    fn arguments<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix("/name")?;
        (rest.is_empty() || rest.starts_with(' ')).then_some(rest)
    }

    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply> {
        let mut store = overlay.context().store_mut();
        if args.is_empty() {
            let active = store.toggle_local_name_active();
            return Ok(Reply::published(if active {
                "Custom name enabled."
            } else {
                "Custom name disabled."
            }));
        }
        let name = args.trim();
        store.set_local_name(name)?;
        Ok(Reply::published(format!("Name changed to: {}", name)))
    }
}
