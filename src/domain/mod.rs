//! Domain layer - Core types with no platform dependencies
//!
//! This layer contains:
//! - Entities: Commands, interactions, outbound messages, users
//! - Traits: Abstractions for the chat platform (Bot)

pub mod entities;
pub mod traits;
