use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::errors::CommandError;
use crate::domain::entities::InteractionEvent;
use crate::domain::traits::Bot;

/// Declared type of a command option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Number,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Attachment,
}

/// One declared parameter of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDeclaration {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
}

impl OptionDeclaration {
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// What the platform is told about a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDeclaration {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionDeclaration>,
}

impl CommandDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: OptionDeclaration) -> Self {
        self.options.push(option);
        self
    }
}

/// Behaviour run when a command is invoked
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, bot: Arc<dyn Bot>, event: InteractionEvent) -> Result<(), CommandError>;
}

/// Represents a bot command: its declaration plus the handler behind it
pub struct Command {
    pub declaration: CommandDeclaration,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new<H>(declaration: CommandDeclaration, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        Self {
            declaration,
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }
}

/// Command registry, shared between startup registration and the dispatcher.
///
/// Registering a name that already exists replaces the previous entry.
#[derive(Default)]
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<Command>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, command: Command) {
        let name = command.name().to_string();
        let previous = self.commands.write().await.insert(name.clone(), Arc::new(command));

        if previous.is_some() {
            tracing::debug!("Replaced command: {}", name);
        }
    }

    pub async fn get(&self, name: &str) -> Option<Arc<Command>> {
        self.commands.read().await.get(name).cloned()
    }

    /// Snapshot of every declaration, for registering with the platform
    pub async fn declarations(&self) -> Vec<CommandDeclaration> {
        let commands = self.commands.read().await;
        let mut declarations: Vec<_> = commands.values().map(|c| c.declaration.clone()).collect();
        declarations.sort_by(|a, b| a.name.cmp(&b.name));
        declarations
    }

    pub async fn len(&self) -> usize {
        self.commands.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl CommandHandler for Noop {
        async fn handle(&self, _bot: Arc<dyn Bot>, _event: InteractionEvent) -> Result<(), CommandError> {
            Ok(())
        }
    }

    fn declaration(name: &str, description: &str) -> CommandDeclaration {
        CommandDeclaration::new(name, description)
    }

    #[tokio::test]
    async fn last_registration_wins() {
        let registry = CommandRegistry::new();
        registry.register(Command::new(declaration("quote", "first"), Noop)).await;
        registry.register(Command::new(declaration("quote", "second"), Noop)).await;

        assert_eq!(registry.len().await, 1);
        let cmd = registry.get("quote").await.unwrap();
        assert_eq!(cmd.declaration.description, "second");
    }

    #[tokio::test]
    async fn declarations_are_sorted_by_name() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.len().await, 0);

        registry.register(Command::new(declaration("zeta", "z"), Noop)).await;
        registry.register(Command::new(declaration("alpha", "a"), Noop)).await;

        let names: Vec<_> = registry
            .declarations()
            .await
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(registry.get("missing").await.is_none());
    }
}
