//! Lookup command handlers
//!
//! Handles: lookup, designation
//!
//! Both replies carry Designate/Undesignate buttons whose custom IDs encode the Roblox ID,
//! so the button handler never has to read it back out of the rendered embed.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Add /designation for raw Roblox IDs
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::component::ButtonStyle;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash;
use crate::core::embeds::Reply;
use crate::features::lookup::{LookupError, RobloxUser};
use crate::features::permissions::PermissionTier;
use crate::interactions::{CommandInvocation, InteractionResponder};
use crate::message_components::ButtonAction;

/// Handler for /lookup
pub struct LookupHandler;

#[async_trait]
impl SlashCommandHandler for LookupHandler {
    fn command_name(&self) -> &'static str {
        "lookup"
    }

    fn schema(&self) -> CreateApplicationCommand {
        slash::create_lookup_command()
    }

    fn permission(&self) -> PermissionTier {
        PermissionTier::Fetch
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let author = invocation.invoker.attribution();

        let Some(username) = invocation.args.string("username") else {
            let reply = Reply::error("Missing Username", "Please provide a Roblox username to look up")
                .with_author(author);
            return responder.edit(&reply).await;
        };

        info!("[{request_id}] 🔍 Looking up roblox user {username}");
        let user = match ctx.roblox.find_by_username(username).await {
            Ok(user) => user,
            Err(LookupError::InvalidUsername(_)) => {
                let reply = Reply::error(
                    "Invalid Username",
                    format!("`{username}` is not a valid Roblox username"),
                )
                .with_author(author);
                return responder.edit(&reply).await;
            }
            Err(LookupError::NotFound(_)) => {
                let reply = Reply::error(
                    "User Not Found",
                    format!("No Roblox user named `{username}` exists"),
                )
                .with_author(author);
                return responder.edit(&reply).await;
            }
            Err(e) => return Err(e.into()),
        };

        let designated = ctx.designations.is_marked(user.id).await?;
        info!(
            "[{request_id}] Found roblox user {} ({}), designated: {designated}",
            user.name, user.id
        );

        responder
            .edit(&user_lookup_reply(&user, designated).with_author(author))
            .await
    }
}

/// Handler for /designation
pub struct DesignationHandler;

#[async_trait]
impl SlashCommandHandler for DesignationHandler {
    fn command_name(&self) -> &'static str {
        "designation"
    }

    fn schema(&self) -> CreateApplicationCommand {
        slash::create_designation_command()
    }

    fn permission(&self) -> PermissionTier {
        PermissionTier::Fetch
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

        let Some(roblox_id) = invocation
            .args
            .integer("id")
            .and_then(|id| u64::try_from(id).ok())
            .filter(|id| *id > 0)
        else {
            let reply = Reply::error("Invalid ID", "Please provide a positive Roblox user ID")
                .with_author(author);
            return responder.edit(&reply).await;
        };

        let designated = ctx.designations.is_marked(roblox_id).await?;
        let description = if designated {
            format!("Roblox ID {roblox_id} is designated as a threat")
        } else {
            format!("Roblox ID {roblox_id} is not designated")
        };

        let reply = with_designation_buttons(Reply::info("Designation Status", description), roblox_id)
            .with_author(author);
        responder.edit(&reply).await
    }
}

/// Lookup result: account details plus the designation buttons
pub fn user_lookup_reply(user: &RobloxUser, designated: bool) -> Reply {
    let info = format!(
        "Username: {}\nDisplay Name: {}\nRoblox ID: {}\nDesignated: {}\nProfile: https://www.roblox.com/users/{}/profile",
        user.name,
        user.display_name,
        user.id,
        if designated { "Yes" } else { "No" },
        user.id,
    );
    let reply = Reply::info("User Lookup", format!("Results for **{}**", user.name))
        .field("User Info", info, false);
    with_designation_buttons(reply, user.id)
}

fn with_designation_buttons(reply: Reply, roblox_id: u64) -> Reply {
    reply
        .button(
            ButtonAction::Designate(roblox_id).custom_id(),
            "Designate",
            ButtonStyle::Danger,
        )
        .button(
            ButtonAction::Undesignate(roblox_id).custom_id(),
            "Undesignate",
            ButtonStyle::Secondary,
        )
}
