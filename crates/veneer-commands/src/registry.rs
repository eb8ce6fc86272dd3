//! Command registry and trait definitions
//!
//! A command owns every line that is exactly `/<name>` or starts with
//! `/<name> `. Lines no command owns go back to the host handler untouched.

use veneer_core::Result;
use veneer_overlay::Overlay;

/// How a reply is coloured in the local chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Private,
}

/// What the interpreter does after a command succeeds, before printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Patch the document only.
    Reconcile,
    /// Broadcast local state, then patch the document.
    Publish,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub tone: Tone,
    pub effect: Effect,
}

impl Reply {
    /// Local state changed and should be announced.
    pub fn published(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            tone: Tone::Info,
            effect: Effect::Publish,
        }
    }

    pub fn info(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            tone: Tone::Info,
            effect: Effect::Nothing,
        }
    }

    pub fn private(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            tone: Tone::Private,
            effect: Effect::Nothing,
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            tone: Tone::Info,
            effect: Effect::Nothing,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// The Command trait - implement this to add a chat command.
pub trait Command: Send + Sync {
    /// Name without the slash (e.g. "name", "m").
    fn name(&self) -> &str;

    /// Usage text shown in help, e.g. "/nick <player> <name>".
    fn usage(&self) -> &str;

    /// One-line description shown in help.
    fn description(&self) -> &str;

    /// Argument text if this command owns `line`.
    fn arguments<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix('/')?.strip_prefix(self.name())?;
        if rest.is_empty() {
            Some(rest)
        } else if rest.starts_with(' ') {
            Some(rest.trim())
        } else {
            None
        }
    }

    /// Validate, mutate overlay state, and describe the outcome. An `Err`
    /// must leave the overlay untouched.
    fn execute(&self, args: &str, overlay: &Overlay) -> Result<Reply>;
}

pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands.retain(|c| c.name() != command.name());
        self.commands.push(Box::new(command));
    }

    /// First command that owns `line`, with its argument text.
    pub fn find<'l>(&self, line: &'l str) -> Option<(&dyn Command, &'l str)> {
        self.commands
            .iter()
            .find_map(|c| c.arguments(line).map(|args| (c.as_ref(), args)))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn list(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// `usage -> description` lines for every registered command.
    pub fn help_lines(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|c| format!("{:<24} → {}", c.usage(), c.description()))
            .collect()
    }
}
