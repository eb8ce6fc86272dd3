//! /info - help text

use crate::registry::{Command, Reply};
use veneer_core::Result;
use veneer_overlay::Overlay;

pub struct InfoCommand {
    help: Vec<String>,
}

impl InfoCommand {
    /// `help` holds one line per other registered command.
    pub fn new(help: Vec<String>) -> Self {
        Self { help }
    }
}

impl Command for InfoCommand {
    fn name(&self) -> &str { "info" }

    fn usage(&self) -> &str { "/info" }

    fn description(&self) -> &str { "Show this help" }

    fn execute(&self, _args: &str, overlay: &Overlay) -> Result<Reply> {
        let mut lines = vec!["=== Veneer ===".to_string()];
        lines.extend(self.help.iter().cloned());
        lines.push(format!("{:<24} → {}", self.usage(), self.description()));
        let privileged = overlay.context().policy().privileged_names();
        if !privileged.is_empty() {
            lines.push(format!(
                "Privileged users ({}) always see real levels.",
                privileged.join(", ")
            ));
        }
        Ok(Reply::lines(lines))
    }
}
