use std::sync::Arc;

use crate::application::commands::quote;
use crate::application::errors::BotError;
use crate::domain::entities::{Command, CommandRegistry};
use crate::domain::traits::Bot;
use crate::infrastructure::config::Config;

/// Service for loading commands and publishing their declarations
pub struct CommandService {
    registry: Arc<CommandRegistry>,
}

impl CommandService {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub async fn register(&self, command: Command) {
        self.registry.register(command).await;
    }

    /// Register every command this bot ships with
    pub async fn load_commands(&self, config: &Config) {
        self.register(quote::command(&config.quote.channel)).await;
        tracing::info!("Loaded {} commands", self.registry.len().await);
    }

    /// Publish all declarations, guild-scoped when `guild_id` is set.
    ///
    /// Stops at the first rejected declaration.
    pub async fn sync(&self, bot: &dyn Bot, guild_id: Option<&str>) -> Result<usize, BotError> {
        let declarations = self.registry.declarations().await;

        for declaration in &declarations {
            bot.register_command(declaration, guild_id).await.map_err(|e| {
                BotError::Discord(format!("error creating command '{}': {}", declaration.name, e))
            })?;
            tracing::info!("Registered command: {}", declaration.name);
        }

        Ok(declarations.len())
    }
}
