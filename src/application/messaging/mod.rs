//! Interaction handling - Event-driven command dispatch

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, InteractionDispatcher};
