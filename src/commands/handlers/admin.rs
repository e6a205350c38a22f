//! Admin command handlers
//!
//! Handles: reload
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Replace settings commands with catalog reload
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash;
use crate::core::embeds::Reply;
use crate::features::permissions::PermissionTier;
use crate::interactions::{CommandInvocation, InteractionResponder};

/// Handler for /reload: rediscover command modules and re-register them with Discord
pub struct ReloadHandler;

#[async_trait]
impl SlashCommandHandler for ReloadHandler {
    fn command_name(&self) -> &'static str {
        "reload"
    }

    fn schema(&self) -> CreateApplicationCommand {
        slash::create_reload_command()
    }

    fn permission(&self) -> PermissionTier {
        PermissionTier::All
    }

    fn ephemeral(&self) -> bool {
        true
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<()> {
        let author = invocation.invoker.attribution();
        info!("🔄 Command reload requested by {}", invocation.invoker.name);

        let loaded = match ctx.registry.reload() {
            Ok(count) => count,
            Err(e) => {
                error!("❌ Command reload failed: {e}");
                let reply = Reply::error(
                    "Reload Failed",
                    format!("Couldn't reload commands: {e}. The previous commands are still active."),
                )
                .with_author(author);
                return responder.edit(&reply).await;
            }
        };

        let reply = match ctx.publisher.publish(&ctx.registry.snapshot()).await {
            Ok(report) if report.skipped.is_empty() => Reply::success(
                "Reload Successful",
                format!("Loaded {loaded} commands and registered {}", report.registered),
            ),
            Ok(report) => Reply::success(
                "Reload Successful",
                format!(
                    "Loaded {loaded} commands and registered {}. Skipped: {}",
                    report.registered,
                    report.skipped.join(", ")
                ),
            ),
            Err(e) => Reply::error(
                "Registration Failed",
                format!("Loaded {loaded} commands but couldn't register them with Discord: {e}"),
            ),
        };

        responder.edit(&reply.with_author(author)).await
    }
}
