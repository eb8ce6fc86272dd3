//! Veneer Commands - chat-line commands layered over the host's handler
//!
//! Each command is a self-contained file in src/commands/.
//! To add a command: create the file, implement Command, register below.

pub mod commands;
pub mod interpreter;
pub mod registry;

pub use interpreter::CommandInterpreter;
pub use registry::{Command, CommandRegistry, Effect, Reply, Tone};

/// Create the registry with every built-in command, in match order.
pub fn create_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // --- Self presentation ---
    registry.register(commands::name::NameCommand);
    registry.register(commands::level::LevelCommand);
    registry.register(commands::gradient::GradientCommand);

    // --- Other participants ---
    registry.register(commands::nick::NickCommand);
    registry.register(commands::message::MessageCommand);

    let help = registry.help_lines();
    registry.register(commands::info::InfoCommand::new(help));

    registry
}
