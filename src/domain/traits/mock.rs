//! In-memory `Bot` used by unit tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDeclaration, InteractionEvent, OutboundMessage, PostedMessage, User};
use crate::domain::traits::Bot;

/// A call the handler made against the platform
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Register { name: String, guild_id: Option<String> },
    Defer { interaction_id: String, ephemeral: bool },
    Edit { interaction_id: String, content: String },
    FetchUser(String),
    Send { channel_id: String, message: OutboundMessage },
}

/// Records every call; individual operations can be made to fail
#[derive(Default)]
pub struct RecordingBot {
    calls: Mutex<Vec<Call>>,
    pub fail_defer: bool,
    pub fail_edit: bool,
    pub fail_fetch: bool,
    pub fail_send: bool,
    pub fail_register: bool,
    pub posted_id: String,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            posted_id: "999".to_string(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Edit { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn register_command(&self, declaration: &CommandDeclaration, guild_id: Option<&str>) -> Result<(), BotError> {
        self.record(Call::Register {
            name: declaration.name.clone(),
            guild_id: guild_id.map(str::to_string),
        });
        if self.fail_register {
            return Err(BotError::Discord("rejected declaration".to_string()));
        }
        Ok(())
    }

    async fn defer_response(&self, interaction: &InteractionEvent, ephemeral: bool) -> Result<(), BotError> {
        self.record(Call::Defer {
            interaction_id: interaction.id.clone(),
            ephemeral,
        });
        if self.fail_defer {
            return Err(BotError::Network("unknown interaction".to_string()));
        }
        Ok(())
    }

    async fn edit_response(&self, interaction: &InteractionEvent, content: &str) -> Result<(), BotError> {
        self.record(Call::Edit {
            interaction_id: interaction.id.clone(),
            content: content.to_string(),
        });
        if self.fail_edit {
            return Err(BotError::Network("token expired".to_string()));
        }
        Ok(())
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, BotError> {
        self.record(Call::FetchUser(user_id.to_string()));
        if self.fail_fetch {
            return Err(BotError::Discord("unknown user".to_string()));
        }
        Ok(User::new(user_id, format!("user-{}", user_id))
            .with_avatar(format!("https://cdn.example/{}.png", user_id)))
    }

    async fn send_message(&self, channel_id: &str, message: &OutboundMessage) -> Result<PostedMessage, BotError> {
        self.record(Call::Send {
            channel_id: channel_id.to_string(),
            message: message.clone(),
        });
        if self.fail_send {
            return Err(BotError::Discord("Missing Access".to_string()));
        }
        Ok(PostedMessage {
            id: self.posted_id.clone(),
            channel_id: channel_id.to_string(),
        })
    }
}
