//! `/quote` - post a quote of another member into the quotes channel

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::errors::CommandError;
use crate::domain::entities::{
    Command, CommandDeclaration, CommandHandler, OptionDeclaration, Embed, InteractionEvent, OptionKind,
    OutboundMessage, User,
};
use crate::domain::traits::Bot;

pub const NAME: &str = "quote";
pub const USER_OPTION: &str = "user";
pub const MESSAGE_OPTION: &str = "message";

/// Accent color of quote embeds
pub const QUOTE_COLOR: u32 = 0x00AAFF;

pub fn declaration() -> CommandDeclaration {
    CommandDeclaration::new(
        NAME,
        "Quote a user with a message that will be posted to the quotes channel",
    )
    .with_option(OptionDeclaration::new(OptionKind::User, USER_OPTION, "The user to quote").required(true))
    .with_option(OptionDeclaration::new(OptionKind::String, MESSAGE_OPTION, "The quote message").required(true))
}

pub fn command(channel_id: impl Into<String>) -> Command {
    Command::new(declaration(), QuoteHandler::new(channel_id))
}

/// Arguments of one `/quote` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub user_id: String,
    pub text: String,
}

impl QuoteRequest {
    pub fn from_event(event: &InteractionEvent) -> Result<Self, CommandError> {
        Ok(Self {
            user_id: event.user_option(USER_OPTION)?.to_string(),
            text: event.string_option(MESSAGE_OPTION)?.to_string(),
        })
    }

    /// The message posted into the quotes channel
    pub fn render(&self, quoted: &User, invoker: &User, now: DateTime<Utc>) -> OutboundMessage {
        let embed = Embed::new()
            .with_author(quoted.handle(), quoted.avatar_url.clone())
            .with_description(format!("**\"{}\"**", self.text))
            .with_color(QUOTE_COLOR)
            .with_footer(invoker.handle(), invoker.avatar_url.clone())
            .with_timestamp(now);

        OutboundMessage::new(format!("{}:", quoted.mention())).with_embed(embed)
    }
}

/// Runs the deferred-response flow: acknowledge, post, then edit the
/// acknowledgement with the result.
pub struct QuoteHandler {
    channel_id: String,
}

impl QuoteHandler {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
        }
    }

    /// Edit failures are logged and swallowed; the quote, if any, stays posted.
    async fn reply(bot: &dyn Bot, event: &InteractionEvent, content: &str) {
        if let Err(e) = bot.edit_response(event, content).await {
            tracing::error!("Error editing interaction response: {}", e);
        }
    }

    /// Show `reason` to the invoker, then hand `err` back to the dispatcher
    async fn fail(
        bot: &dyn Bot,
        event: &InteractionEvent,
        reason: &str,
        err: CommandError,
    ) -> Result<(), CommandError> {
        Self::reply(bot, event, &format!("Error sending quote: {}", reason)).await;
        Err(err)
    }
}

#[async_trait]
impl CommandHandler for QuoteHandler {
    async fn handle(&self, bot: Arc<dyn Bot>, event: InteractionEvent) -> Result<(), CommandError> {
        let bot = bot.as_ref();

        bot.defer_response(&event, true)
            .await
            .map_err(|e| CommandError::Acknowledge(e.to_string()))?;

        let request = match QuoteRequest::from_event(&event) {
            Ok(request) => request,
            Err(e) => return Self::fail(bot, &event, &e.to_string(), e).await,
        };

        let Some(invoker) = event.member.as_ref() else {
            let err = CommandError::InvalidArgs("interaction has no invoking member".to_string());
            return Self::fail(bot, &event, &err.to_string(), err).await;
        };

        let quoted = match bot.fetch_user(&request.user_id).await {
            Ok(user) => user,
            Err(e) => {
                let reason = format!("could not fetch user {}: {}", request.user_id, e);
                return Self::fail(bot, &event, &reason, CommandError::ExecutionFailed(reason.clone())).await;
            }
        };

        let message = request.render(&quoted, invoker, Utc::now());

        let posted = match bot.send_message(&self.channel_id, &message).await {
            Ok(posted) => posted,
            Err(e) => {
                tracing::error!("Error sending quote message: {}", e);
                let reason = e.to_string();
                return Self::fail(bot, &event, &reason, CommandError::ExecutionFailed(reason.clone())).await;
            }
        };

        tracing::info!(
            quoted = %quoted,
            invoker = %invoker,
            message = %posted.id,
            "Quote posted"
        );

        let link = posted.link(event.guild_id.as_deref());
        Self::reply(bot, &event, &format!("Quote posted successfully!\n{}", link)).await;

        Ok(())
    }
}
