//! # Command System
//!
//! Slash command (/) catalog, handlers and registration with Discord.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Descriptor registry with reload, bulk publisher, tier-gated handlers
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 2.0.0: Remove bang commands, slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod publisher;
pub mod registry;
pub mod slash;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use handlers::create_all_handlers;
pub use publisher::{CommandSink, DiscordCommandSink, PublishReport, SlashCommandPublisher};
pub use registry::{CatalogError, CommandDescriptor, CommandRegistry};
