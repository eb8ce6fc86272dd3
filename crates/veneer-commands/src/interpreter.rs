//! Command interpreter - decorator over the host's chat command handler
//!
//! Owned lines are executed and answered locally with an empty reply (the
//! host convention for "handled"). Anything else is passed through verbatim.

use crate::registry::{CommandRegistry, Effect, Tone};
use std::sync::Arc;
use tracing::{debug, info};
use veneer_core::CommandHandler;
use veneer_overlay::Overlay;

pub struct CommandInterpreter<H> {
    registry: CommandRegistry,
    overlay: Arc<Overlay>,
    fallback: H,
}

impl<H: CommandHandler> CommandInterpreter<H> {
    pub fn new(registry: CommandRegistry, overlay: Arc<Overlay>, fallback: H) -> Self {
        Self {
            registry,
            overlay,
            fallback,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn fallback(&self) -> &H {
        &self.fallback
    }
}

impl<H: CommandHandler> CommandHandler for CommandInterpreter<H> {
    fn handle(&self, line: &str) -> String {
        let Some((command, args)) = self.registry.find(line) else {
            return self.fallback.handle(line);
        };

        match command.execute(args, &self.overlay) {
            Ok(reply) => {
                info!("/{} accepted", command.name());
                match reply.effect {
                    Effect::Publish => {
                        self.overlay.publish();
                    }
                    Effect::Reconcile => {
                        self.overlay.reconcile();
                    }
                    Effect::Nothing => {}
                }
                let colors = match reply.tone {
                    Tone::Info => &self.overlay.colors().info,
                    Tone::Private => &self.overlay.colors().private,
                };
                for line in &reply.lines {
                    self.overlay.say(line, colors);
                }
            }
            Err(e) => {
                debug!("/{} rejected: {}", command.name(), e);
                self.overlay.error(&e.to_string());
            }
        }
        String::new()
    }
}
