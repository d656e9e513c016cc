use chrono::{DateTime, Utc};

/// Embed author block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Embed footer block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

/// Rich content block attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub description: Option<String>,
    pub author: Option<EmbedAuthor>,
    pub footer: Option<EmbedFooter>,
    pub color: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    pub fn new() -> Self {
        Self {
            description: None,
            author: None,
            footer: None,
            color: None,
            timestamp: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url,
        });
        self
    }

    pub fn with_footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Default for Embed {
    fn default() -> Self {
        Self::new()
    }
}

/// Message to be posted into a channel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundMessage {
    pub content: String,
    pub embeds: Vec<Embed>,
}

impl OutboundMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            embeds: Vec::new(),
        }
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }
}

/// Identifiers of a message the platform accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: String,
    pub channel_id: String,
}

impl PostedMessage {
    /// Jump link; DMs have no guild and use `@me`
    pub fn link(&self, guild_id: Option<&str>) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            guild_id.unwrap_or("@me"),
            self.channel_id,
            self.id
        )
    }
}
