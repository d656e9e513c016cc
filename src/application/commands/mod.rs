//! Slash command implementations

pub mod quote;
