//! Interaction dispatcher - Routes inbound interactions to command handlers

use std::sync::Arc;

use crate::domain::entities::{CommandRegistry, InteractionEvent};
use crate::domain::traits::Bot;

/// What happened to a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command invocation
    Ignored,
    /// No handler registered under the command name
    UnknownCommand,
    /// A handler ran, successfully or not
    Handled,
}

/// Looks up handlers in a shared registry and runs them.
///
/// The registry lock is only held for the lookup, so handlers for the same or
/// different commands run concurrently.
#[derive(Clone)]
pub struct InteractionDispatcher {
    registry: Arc<CommandRegistry>,
}

impl InteractionDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub async fn dispatch(&self, bot: Arc<dyn Bot>, event: InteractionEvent) -> DispatchOutcome {
        if !event.is_command() {
            return DispatchOutcome::Ignored;
        }

        let Some(command) = self.registry.get(&event.command_name).await else {
            tracing::warn!("Unknown command: {}", event.command_name);
            return DispatchOutcome::UnknownCommand;
        };

        tracing::debug!(
            command = %event.command_name,
            interaction = %event.id,
            guild = ?event.guild_id,
            channel = ?event.channel_id,
            "Dispatching command"
        );

        let name = event.command_name.clone();
        if let Err(e) = command.handler.handle(bot, event).await {
            tracing::warn!("Command /{} failed: {}", name, e);
        }

        DispatchOutcome::Handled
    }
}
