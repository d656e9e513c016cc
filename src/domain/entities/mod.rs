//! Domain entities - Core business objects

pub mod command;
pub mod interaction;
pub mod message;
pub mod user;

pub use command::{
    Command, CommandDeclaration, CommandHandler, OptionDeclaration, CommandRegistry, OptionKind,
};
pub use interaction::{InteractionEvent, InteractionKind, OptionValue};
pub use message::{Embed, OutboundMessage, PostedMessage};
pub use user::User;
