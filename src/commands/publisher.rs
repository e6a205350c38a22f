//! Slash command publisher
//!
//! Uploads the catalog's schemas to Discord as a single bulk overwrite. Commands missing
//! from the batch are removed on Discord's side.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info};
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serde_json::Value;
use serenity::model::id::GuildId;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use super::registry::CommandDescriptor;

/// Discord limits for chat input commands
const MAX_NAME_LEN: usize = 32;
const MAX_DESCRIPTION_LEN: usize = 100;
const MAX_OPTIONS: usize = 25;
/// `type` of a chat input (slash) command
const CHAT_INPUT: u64 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` is {len} characters, limit is {limit}")]
    TooLong {
        field: &'static str,
        len: usize,
        limit: usize,
    },
    #[error("{0} options, limit is 25")]
    TooManyOptions(usize),
}

/// Destination of a bulk command overwrite
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Replace every registered command with `batch`; returns how many Discord accepted.
    async fn overwrite(&self, batch: Vec<Value>) -> Result<usize>;
}

/// Registers commands through Discord's REST API, globally or for one guild
pub struct DiscordCommandSink {
    http: Arc<Http>,
    guild_id: Option<GuildId>,
}

impl DiscordCommandSink {
    pub fn new(http: Arc<Http>, guild_id: Option<GuildId>) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl CommandSink for DiscordCommandSink {
    async fn overwrite(&self, batch: Vec<Value>) -> Result<usize> {
        let payload = Value::Array(batch);
        let registered = match self.guild_id {
            Some(guild_id) => {
                self.http
                    .create_guild_application_commands(guild_id.0, &payload)
                    .await?
            }
            None => self.http.create_global_application_commands(&payload).await?,
        };
        Ok(registered.len())
    }
}

/// Outcome of a publish
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Schemas sent in the batch
    pub submitted: usize,
    /// Commands Discord reports as registered
    pub registered: usize,
    /// Commands left out because their schema failed to serialize
    pub skipped: Vec<String>,
}

/// Publishes the command catalog once a Discord connection exists
///
/// The sink is attached on `ready`; until then `publish` fails.
pub struct SlashCommandPublisher {
    sink: RwLock<Option<Arc<dyn CommandSink>>>,
}

impl SlashCommandPublisher {
    pub fn new() -> Self {
        Self {
            sink: RwLock::new(None),
        }
    }

    pub fn attach(&self, sink: Arc<dyn CommandSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    pub fn is_attached(&self) -> bool {
        self.current_sink().is_some()
    }

    fn current_sink(&self) -> Option<Arc<dyn CommandSink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serialize every schema and submit the batch in one overwrite call
    ///
    /// Schemas that fail to serialize are logged and skipped; a failed overwrite is logged
    /// and returned.
    pub async fn publish(&self, catalog: &[CommandDescriptor]) -> Result<PublishReport> {
        let sink = self
            .current_sink()
            .ok_or_else(|| anyhow!("Cannot register slash commands before connecting to Discord"))?;

        let mut batch = Vec::with_capacity(catalog.len());
        let mut skipped = Vec::new();
        for descriptor in catalog {
            match serialize_schema(&descriptor.schema) {
                Ok(json) => batch.push(json),
                Err(e) => {
                    error!(
                        "❌ Couldn't serialize the slash command data for /{}: {e}",
                        descriptor.name
                    );
                    skipped.push(descriptor.name.clone());
                }
            }
        }

        let submitted = batch.len();
        let registered = sink.overwrite(batch).await.map_err(|e| {
            error!("❌ There was an error while registering slash commands: {e}");
            e
        })?;

        info!("✅ Registered {registered} slash commands ({submitted} submitted, {} skipped)", skipped.len());
        Ok(PublishReport {
            submitted,
            registered,
            skipped,
        })
    }
}

impl Default for SlashCommandPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a command builder to its JSON wire shape, checking Discord's limits
pub fn serialize_schema(schema: &CreateApplicationCommand) -> Result<Value, SchemaError> {
    let name = schema
        .0
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(SchemaError::MissingField("name"))?;
    check_len("name", name, MAX_NAME_LEN)?;

    let kind = schema.0.get("type").and_then(Value::as_u64).unwrap_or(CHAT_INPUT);
    if kind == CHAT_INPUT {
        let description = schema
            .0
            .get("description")
            .and_then(Value::as_str)
            .filter(|description| !description.is_empty())
            .ok_or(SchemaError::MissingField("description"))?;
        check_len("description", description, MAX_DESCRIPTION_LEN)?;
    }

    if let Some(options) = schema.0.get("options").and_then(Value::as_array) {
        if options.len() > MAX_OPTIONS {
            return Err(SchemaError::TooManyOptions(options.len()));
        }
    }

    Ok(Value::Object(
        schema
            .0
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
    ))
}

fn check_len(field: &'static str, value: &str, limit: usize) -> Result<(), SchemaError> {
    let len = value.chars().count();
    if len > limit {
        return Err(SchemaError::TooLong { field, len, limit });
    }
    Ok(())
}
