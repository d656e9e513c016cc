use super::User;
use crate::application::errors::CommandError;

/// Kind of inbound interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Ping,
    ApplicationCommand,
    Autocomplete,
    MessageComponent,
    ModalSubmit,
}

/// Value of a single command option, tagged by its declared type
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(String),
    Channel(String),
    Role(String),
    Mentionable(String),
    Attachment(String),
    /// Sub-commands, autocomplete partials and anything newer than this crate
    Unsupported,
}

impl OptionValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::String(_) => "string",
            OptionValue::Integer(_) => "integer",
            OptionValue::Number(_) => "number",
            OptionValue::Boolean(_) => "boolean",
            OptionValue::User(_) => "user",
            OptionValue::Channel(_) => "channel",
            OptionValue::Role(_) => "role",
            OptionValue::Mentionable(_) => "mentionable",
            OptionValue::Attachment(_) => "attachment",
            OptionValue::Unsupported => "unsupported",
        }
    }
}

/// A named option as supplied by the invoking user
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An inbound interaction, converted from the gateway's representation.
///
/// Only `ApplicationCommand` events carry a command name and options; the
/// other kinds are forwarded so the dispatcher can drop them.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub id: String,
    pub token: String,
    pub kind: InteractionKind,
    pub command_name: String,
    pub options: Vec<CommandOption>,
    pub member: Option<User>,
    pub guild_id: Option<String>,
    pub channel_id: Option<String>,
}

impl InteractionEvent {
    pub fn new(kind: InteractionKind, id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            kind,
            command_name: String::new(),
            options: Vec::new(),
            member: None,
            guild_id: None,
            channel_id: None,
        }
    }

    pub fn command(name: impl Into<String>, id: impl Into<String>, token: impl Into<String>) -> Self {
        let mut event = Self::new(InteractionKind::ApplicationCommand, id, token);
        event.command_name = name.into();
        event
    }

    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.push(CommandOption::new(name, value));
        self
    }

    pub fn with_member(mut self, member: User) -> Self {
        self.member = Some(member);
        self
    }

    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn is_command(&self) -> bool {
        self.kind == InteractionKind::ApplicationCommand
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.iter().find(|o| o.name == name).map(|o| &o.value)
    }

    fn required(&self, name: &str) -> Result<&OptionValue, CommandError> {
        self.option(name)
            .ok_or_else(|| CommandError::InvalidArgs(format!("missing option `{}`", name)))
    }

    /// Required string option; any other variant is an error
    pub fn string_option(&self, name: &str) -> Result<&str, CommandError> {
        match self.required(name)? {
            OptionValue::String(s) => Ok(s),
            other => Err(mismatch(name, "string", other)),
        }
    }

    /// Required user option, returned as the user id
    pub fn user_option(&self, name: &str) -> Result<&str, CommandError> {
        match self.required(name)? {
            OptionValue::User(id) => Ok(id),
            other => Err(mismatch(name, "user", other)),
        }
    }
}

fn mismatch(name: &str, expected: &str, got: &OptionValue) -> CommandError {
    CommandError::InvalidArgs(format!(
        "option `{}` should be a {}, got {}",
        name,
        expected,
        got.type_name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_option_lookup() {
        let event = InteractionEvent::command("quote", "1", "tok")
            .with_option("user", OptionValue::User("U123".into()))
            .with_option("message", OptionValue::String("hi".into()));

        assert_eq!(event.user_option("user").unwrap(), "U123");
        assert_eq!(event.string_option("message").unwrap(), "hi");
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let event = InteractionEvent::command("quote", "1", "tok")
            .with_option("user", OptionValue::String("U123".into()));

        let err = event.user_option("user").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgs(_)));
        assert!(err.to_string().contains("should be a user, got string"));
    }

    #[test]
    fn missing_option_is_an_error() {
        let event = InteractionEvent::command("quote", "1", "tok");
        assert!(event.string_option("message").is_err());
    }

    #[test]
    fn only_application_commands_are_commands() {
        assert!(InteractionEvent::command("quote", "1", "t").is_command());
        assert!(!InteractionEvent::new(InteractionKind::Autocomplete, "1", "t").is_command());
    }
}
