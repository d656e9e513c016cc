//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
#[cfg(test)]
pub mod mock;

pub use bot::Bot;
