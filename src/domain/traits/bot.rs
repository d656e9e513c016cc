use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDeclaration, InteractionEvent, OutboundMessage, PostedMessage, User};

/// Bot trait - abstraction over the chat platform's REST surface.
///
/// Implementations must be safe to share between concurrently running
/// handlers.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Create or overwrite a command declaration, scoped to a guild when given
    async fn register_command(&self, declaration: &CommandDeclaration, guild_id: Option<&str>) -> Result<(), BotError>;

    /// Acknowledge an interaction with a placeholder response
    async fn defer_response(&self, interaction: &InteractionEvent, ephemeral: bool) -> Result<(), BotError>;

    /// Replace the content of a previously deferred response
    async fn edit_response(&self, interaction: &InteractionEvent, content: &str) -> Result<(), BotError>;

    /// Look up a user's public profile
    async fn fetch_user(&self, user_id: &str) -> Result<User, BotError>;

    /// Post a message into a channel
    async fn send_message(&self, channel_id: &str, message: &OutboundMessage) -> Result<PostedMessage, BotError>;
}
