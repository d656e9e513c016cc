//! Discord adapter
//!
//! REST calls go through serenity's `Http`; `client` owns the gateway session.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Command as SerenityCommand, CommandDataOptionValue, CommandInteraction, CommandOptionType,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, GuildId,
    Http, Interaction, InteractionId, Member, Timestamp, UserId,
};

use crate::application::errors::BotError;
use crate::domain::entities::{
    CommandDeclaration, Embed, InteractionEvent, InteractionKind, OptionKind, OptionValue,
    OutboundMessage, PostedMessage, User,
};
use crate::domain::traits::Bot;

pub use client::DiscordBot;

/// `Bot` implementation backed by the Discord REST API
#[derive(Clone)]
pub struct DiscordAdapter {
    http: Arc<Http>,
}

impl DiscordAdapter {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Bot for DiscordAdapter {
    async fn register_command(&self, declaration: &CommandDeclaration, guild_id: Option<&str>) -> Result<(), BotError> {
        let builder = build_command(declaration);

        match guild_id {
            Some(guild_id) => {
                let guild = GuildId::new(parse_id("guild", guild_id)?);
                guild.create_command(&self.http, builder).await.map_err(discord_error)?;
            }
            None => {
                SerenityCommand::create_global_command(&self.http, builder)
                    .await
                    .map_err(discord_error)?;
            }
        }

        Ok(())
    }

    async fn defer_response(&self, interaction: &InteractionEvent, ephemeral: bool) -> Result<(), BotError> {
        let id = InteractionId::new(parse_id("interaction", &interaction.id)?);
        let response = CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(ephemeral));

        self.http
            .create_interaction_response(id, &interaction.token, &response, Vec::new())
            .await
            .map_err(discord_error)
    }

    async fn edit_response(&self, interaction: &InteractionEvent, content: &str) -> Result<(), BotError> {
        let edit = EditInteractionResponse::new().content(content);

        self.http
            .edit_original_interaction_response(&interaction.token, &edit, Vec::new())
            .await
            .map_err(discord_error)?;

        Ok(())
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, BotError> {
        let id = UserId::new(parse_id("user", user_id)?);
        let user = self.http.get_user(id).await.map_err(discord_error)?;

        Ok(User::new(user.id.to_string(), user.name.clone())
            .with_avatar(user.face())
            .with_bot(user.bot))
    }

    async fn send_message(&self, channel_id: &str, message: &OutboundMessage) -> Result<PostedMessage, BotError> {
        let channel = ChannelId::new(parse_id("channel", channel_id)?);
        let builder = CreateMessage::new()
            .content(&message.content)
            .embeds(message.embeds.iter().map(build_embed).collect());

        let posted = channel
            .send_message(&self.http, builder)
            .await
            .map_err(discord_error)?;

        Ok(PostedMessage {
            id: posted.id.to_string(),
            channel_id: posted.channel_id.to_string(),
        })
    }
}

fn discord_error(e: serenity::Error) -> BotError {
    match e {
        serenity::Error::Http(e) => BotError::Discord(e.to_string()),
        serenity::Error::Io(e) => BotError::Network(e.to_string()),
        other => BotError::Discord(other.to_string()),
    }
}

/// Snowflakes are non-zero u64s; serenity's id constructors panic on zero
fn parse_id(kind: &str, value: &str) -> Result<u64, BotError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| BotError::Discord(format!("invalid {} id: {:?}", kind, value)))
}

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Number => CommandOptionType::Number,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::Channel => CommandOptionType::Channel,
        OptionKind::Role => CommandOptionType::Role,
        OptionKind::Mentionable => CommandOptionType::Mentionable,
        OptionKind::Attachment => CommandOptionType::Attachment,
    }
}

fn build_command(declaration: &CommandDeclaration) -> CreateCommand {
    declaration.options.iter().fold(
        CreateCommand::new(&declaration.name).description(&declaration.description),
        |command, option| {
            command.add_option(
                CreateCommandOption::new(option_type(option.kind), &option.name, &option.description)
                    .required(option.required),
            )
        },
    )
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(ref description) = embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.color(color);
    }
    if let Some(ref author) = embed.author {
        let mut a = CreateEmbedAuthor::new(&author.name);
        if let Some(ref icon) = author.icon_url {
            a = a.icon_url(icon);
        }
        builder = builder.author(a);
    }
    if let Some(ref footer) = embed.footer {
        let mut f = CreateEmbedFooter::new(&footer.text);
        if let Some(ref icon) = footer.icon_url {
            f = f.icon_url(icon);
        }
        builder = builder.footer(f);
    }
    if let Some(ts) = embed.timestamp {
        match Timestamp::from_unix_timestamp(ts.timestamp()) {
            Ok(timestamp) => builder = builder.timestamp(timestamp),
            Err(e) => tracing::debug!("Dropping embed timestamp {}: {}", ts, e),
        }
    }
    builder
}

fn option_value(value: &CommandDataOptionValue) -> OptionValue {
    match value {
        CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
        CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
        CommandDataOptionValue::Number(n) => OptionValue::Number(*n),
        CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
        CommandDataOptionValue::User(id) => OptionValue::User(id.to_string()),
        CommandDataOptionValue::Channel(id) => OptionValue::Channel(id.to_string()),
        CommandDataOptionValue::Role(id) => OptionValue::Role(id.to_string()),
        CommandDataOptionValue::Mentionable(id) => OptionValue::Mentionable(id.to_string()),
        CommandDataOptionValue::Attachment(id) => OptionValue::Attachment(id.to_string()),
        _ => OptionValue::Unsupported,
    }
}

fn member_user(member: &Member) -> User {
    User::new(member.user.id.to_string(), member.user.name.clone())
        .with_avatar(member.face())
        .with_bot(member.user.bot)
}

fn command_event(command: &CommandInteraction) -> InteractionEvent {
    let invoker = match command.member.as_deref() {
        Some(member) => member_user(member),
        None => User::new(command.user.id.to_string(), command.user.name.clone())
            .with_avatar(command.user.face())
            .with_bot(command.user.bot),
    };

    let mut event = command.data.options.iter().fold(
        InteractionEvent::command(&command.data.name, command.id.to_string(), &command.token)
            .with_member(invoker)
            .with_channel(command.channel_id.to_string()),
        |event, o| event.with_option(&o.name, option_value(&o.value)),
    );
    if let Some(guild_id) = command.guild_id {
        event = event.with_guild(guild_id.to_string());
    }
    event
}

/// Convert a gateway interaction. Kinds this crate doesn't know yet map to `None`.
pub fn to_event(interaction: &Interaction) -> Option<InteractionEvent> {
    let event = match interaction {
        Interaction::Command(command) => command_event(command),
        Interaction::Autocomplete(command) => {
            InteractionEvent::new(InteractionKind::Autocomplete, command.id.to_string(), &command.token)
        }
        Interaction::Component(component) => {
            InteractionEvent::new(InteractionKind::MessageComponent, component.id.to_string(), &component.token)
        }
        Interaction::Modal(modal) => {
            InteractionEvent::new(InteractionKind::ModalSubmit, modal.id.to_string(), &modal.token)
        }
        Interaction::Ping(ping) => InteractionEvent::new(InteractionKind::Ping, ping.id.to_string(), &ping.token),
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::RoleId;

    #[test]
    fn converts_option_values() {
        assert_eq!(
            option_value(&CommandDataOptionValue::User(UserId::new(123))),
            OptionValue::User("123".into())
        );
        assert_eq!(
            option_value(&CommandDataOptionValue::String("hello world".into())),
            OptionValue::String("hello world".into())
        );
        assert_eq!(
            option_value(&CommandDataOptionValue::Channel(ChannelId::new(7))),
            OptionValue::Channel("7".into())
        );
        assert_eq!(
            option_value(&CommandDataOptionValue::Role(RoleId::new(8))),
            OptionValue::Role("8".into())
        );
        assert_eq!(option_value(&CommandDataOptionValue::Integer(-3)), OptionValue::Integer(-3));
        assert_eq!(
            option_value(&CommandDataOptionValue::SubCommand(Vec::new())),
            OptionValue::Unsupported
        );
    }

    #[test]
    fn maps_option_kinds() {
        assert_eq!(option_type(OptionKind::User), CommandOptionType::User);
        assert_eq!(option_type(OptionKind::String), CommandOptionType::String);
    }

    #[test]
    fn out_of_range_timestamp_is_dropped() {
        use chrono::{DateTime, Utc};

        let embed = Embed::new()
            .with_description("**\"hello world\"**")
            .with_timestamp(DateTime::<Utc>::MAX_UTC);
        let _ = build_embed(&embed);
        let _ = build_embed(&embed.clone().with_timestamp(Utc::now()));
    }

    #[test]
    fn rejects_bad_snowflakes() {
        assert_eq!(parse_id("channel", "42").unwrap(), 42);
        assert!(parse_id("channel", "0").is_err());
        assert!(parse_id("channel", "general").is_err());
        assert!(parse_id("user", "U123").is_err());
    }
}
