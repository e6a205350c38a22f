// Core layer - shared types and configuration
pub mod core;

// Features layer - permissions, designation store, Roblox lookup
pub mod features;

// Infrastructure
pub mod database;

// Presentation - interaction events, button handling, dispatch
pub mod interactions;
pub mod message_components;
pub mod router;

// Application layer
pub mod commands;

#[cfg(test)]
mod test_utils;

pub use crate::core::Config;
pub use router::{InteractionRouter, RouteOutcome};
