//! Utility command handlers
//!
//! Handles: ping
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Reply through the deferred placeholder with uptime
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash;
use crate::core::embeds::Reply;
use crate::interactions::{CommandInvocation, InteractionResponder};

/// Handler for /ping
pub struct PingHandler;

#[async_trait]
impl SlashCommandHandler for PingHandler {
    fn command_name(&self) -> &'static str {
        "ping"
    }

    fn schema(&self) -> CreateApplicationCommand {
        slash::create_ping_command()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<()> {
        let reply = Reply::info("Pong!", format!("⏱️ Uptime: {}", format_uptime(ctx.uptime())))
            .with_author(invocation.invoker.attribution());
        responder.edit(&reply).await?;

        info!("Ping command completed for user {}", invocation.invoker.id);
        Ok(())
    }
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
