//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: Slash command handlers
//! - Services: Command loading and publishing
//! - Errors: Domain-specific errors
//! - Messaging: Interaction dispatching

pub mod commands;
pub mod errors;
pub mod messaging;
pub mod services;
