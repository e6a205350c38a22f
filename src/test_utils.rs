//! Shared test fixtures: recording fakes for Discord-facing traits and an in-memory
//! command context.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::publisher::{CommandSink, SlashCommandPublisher};
use crate::commands::registry::{CommandDescriptor, CommandRegistry, ModuleList};
use crate::core::embeds::Reply;
use crate::database::Database;
use crate::features::lookup::RobloxClient;
use crate::features::permissions::{PermissionConfig, PermissionTier};
use crate::interactions::{CommandArgs, CommandInvocation, ComponentAction, InteractionResponder, Invoker};

pub const ADMIN_ROLE: u64 = 759959415708450837;
pub const FETCH_ROLE: u64 = 100;
pub const DESIGNATE_ROLE: u64 = 200;
pub const OTHER_ROLE: u64 = 300;

/// Something the responder was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Deferred { ephemeral: bool },
    Edited(Reply),
}

#[derive(Default)]
pub struct RecordingResponder {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingResponder {
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Recorded::Edited(reply) => Some(reply),
                Recorded::Deferred { .. } => None,
            })
            .collect()
    }

    /// The one and only reply edit
    pub fn single_reply(&self) -> Reply {
        let replies = self.replies();
        assert_eq!(replies.len(), 1, "expected exactly one reply, got {replies:?}");
        replies.into_iter().next().unwrap()
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.events.lock().unwrap().push(Recorded::Deferred { ephemeral });
        Ok(())
    }

    async fn edit(&self, reply: &Reply) -> Result<()> {
        self.events.lock().unwrap().push(Recorded::Edited(reply.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<Value>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandSink for RecordingSink {
    async fn overwrite(&self, batch: Vec<Value>) -> Result<usize> {
        if self.fail {
            return Err(anyhow!("HTTP 401 Unauthorized"));
        }
        let count = batch.len();
        self.batches.lock().unwrap().push(batch);
        Ok(count)
    }
}

struct NoopHandler;

#[async_trait]
impl SlashCommandHandler for NoopHandler {
    fn command_name(&self) -> &'static str {
        "noop"
    }

    fn schema(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        _invocation: &CommandInvocation,
        _responder: &dyn InteractionResponder,
    ) -> Result<()> {
        Ok(())
    }
}

/// Descriptor with an arbitrary schema, bypassing module validation
pub fn descriptor_with_schema(name: &str, schema: CreateApplicationCommand) -> CommandDescriptor {
    CommandDescriptor {
        name: name.to_string(),
        schema,
        tier: PermissionTier::None,
        ephemeral: false,
        handler: Arc::new(NoopHandler),
    }
}

pub fn permissions() -> PermissionConfig {
    PermissionConfig::new(
        [ADMIN_ROLE].into(),
        [FETCH_ROLE].into(),
        [DESIGNATE_ROLE].into(),
    )
}

pub fn invoker(roles: &[u64]) -> Invoker {
    Invoker {
        id: 4242,
        name: "moderator#0001".to_string(),
        avatar_url: Some("https://cdn.discordapp.com/embed/avatars/0.png".to_string()),
        roles: roles.to_vec(),
    }
}

pub fn invocation(name: &str, roles: &[u64], args: CommandArgs) -> CommandInvocation {
    CommandInvocation::new(name, invoker(roles), args)
}

pub fn button_press(custom_id: &str, roles: &[u64]) -> ComponentAction {
    ComponentAction {
        custom_id: custom_id.to_string(),
        invoker: invoker(roles),
    }
}

/// Context over an in-memory database, with the catalog already loaded
pub async fn test_context(modules: ModuleList) -> Arc<CommandContext> {
    let database = Database::new(":memory:").await.unwrap();
    let registry = Arc::new(CommandRegistry::new(modules));
    registry.reload().unwrap();
    Arc::new(CommandContext::new(
        database,
        Arc::new(permissions()),
        registry,
        Arc::new(SlashCommandPublisher::new()),
        // Port 9 (discard): nothing in the tests should reach it
        RobloxClient::new("http://127.0.0.1:9").unwrap(),
    ))
}
