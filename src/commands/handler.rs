//! Slash command handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Handlers describe their own schema, permission tier and reply visibility
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::context::CommandContext;
use crate::features::permissions::PermissionTier;
use crate::interactions::{CommandInvocation, InteractionResponder};

/// Trait for slash command modules
///
/// Each module handles exactly one slash command. Modules are listed in
/// [`create_all_handlers`](super::handlers::create_all_handlers) and loaded into the
/// [`CommandRegistry`](super::registry::CommandRegistry) as descriptors.
///
/// By the time `handle` runs the interaction has already been deferred and the invoker
/// authorized. The handler must finish with exactly one `responder.edit(..)`; returning an
/// error instead makes the router answer with a generic error reply.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn command_name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn schema(&self) -> CreateApplicationCommand {
///         slash::utility::create_ping_command()
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         invocation: &CommandInvocation,
///         responder: &dyn InteractionResponder,
///     ) -> Result<()> {
///         responder.edit(&Reply::info("Pong!", "")).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name, lowercase; the catalog match key
    fn command_name(&self) -> &'static str;

    /// Slash command definition uploaded to Discord
    fn schema(&self) -> CreateApplicationCommand;

    /// Tier required to run the command
    fn permission(&self) -> PermissionTier {
        PermissionTier::None
    }

    /// Whether the placeholder and final reply are visible only to the invoker
    fn ephemeral(&self) -> bool {
        false
    }

    /// Handle the slash command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with database, registry, publisher, etc.
    /// * `invocation` - Invoker and parsed arguments
    /// * `responder` - Reply channel for the deferred interaction
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<()>;
}
