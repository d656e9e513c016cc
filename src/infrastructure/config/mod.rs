//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    /// Register commands in this guild only; propagates instantly, for testing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuoteConfig {
    /// Channel quotes are posted into
    #[serde(default)]
    pub channel: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.token.trim().is_empty() {
            return Err(ConfigError::MissingField("bot.token"));
        }

        if self.quote.channel.trim().is_empty() {
            return Err(ConfigError::MissingField("quote.channel"));
        }
        check_snowflake("quote.channel", &self.quote.channel)?;

        if let Some(guild_id) = self.guild_id() {
            check_snowflake("bot.guild_id", guild_id)?;
        }

        Ok(())
    }

    /// Development guild, treating an empty string as unset
    pub fn guild_id(&self) -> Option<&str> {
        self.bot.guild_id.as_deref().filter(|g| !g.is_empty())
    }
}

fn check_snowflake(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match value.parse::<u64>() {
        Ok(id) if id != 0 => Ok(()),
        _ => Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}
