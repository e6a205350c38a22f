//! # Interactions
//!
//! Platform-neutral view of incoming interaction events and the reply channel back to
//! Discord. The router and command handlers only ever see these types, so they can be
//! driven in tests without a gateway connection.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serde_json::Value;
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::guild::Member;
use serenity::model::user::User;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::embeds::{button_rows, reply_embed, Author, EmbedColors, Reply};

/// The user behind an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub id: u64,
    pub name: String,
    pub avatar_url: Option<String>,
    /// Guild role IDs; empty outside guilds
    pub roles: Vec<u64>,
}

impl Invoker {
    pub fn from_serenity(user: &User, member: Option<&Member>) -> Self {
        Self {
            id: user.id.0,
            name: user.tag(),
            avatar_url: Some(user.face()),
            roles: member
                .map(|m| m.roles.iter().map(|role| role.0).collect())
                .unwrap_or_default(),
        }
    }

    /// Author block echoing the invoker on every reply
    pub fn attribution(&self) -> Author {
        Author {
            name: self.name.clone(),
            icon_url: self.avatar_url.clone(),
        }
    }
}

/// Slash command options, flattened through subcommands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: HashMap<String, Value>,
}

impl CommandArgs {
    pub fn from_options(options: &[CommandDataOption]) -> Self {
        let mut args = CommandArgs::default();
        args.collect(options);
        args
    }

    fn collect(&mut self, options: &[CommandDataOption]) {
        for option in options {
            match option.kind {
                CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup => {
                    self.collect(&option.options);
                }
                _ => {
                    if let Some(value) = &option.value {
                        self.values.insert(option.name.clone(), value.clone());
                    }
                }
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An application command invocation
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub invoker: Invoker,
    pub args: CommandArgs,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, invoker: Invoker, args: CommandArgs) -> Self {
        Self {
            name: name.into(),
            invoker,
            args,
        }
    }

    pub fn from_serenity(command: &ApplicationCommandInteraction) -> Self {
        Self {
            name: command.data.name.clone(),
            invoker: Invoker::from_serenity(&command.user, command.member.as_ref()),
            args: CommandArgs::from_options(&command.data.options),
        }
    }
}

/// A message component (button) press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAction {
    pub custom_id: String,
    pub invoker: Invoker,
}

impl ComponentAction {
    pub fn from_serenity(component: &MessageComponentInteraction) -> Self {
        Self {
            custom_id: component.data.custom_id.clone(),
            invoker: Invoker::from_serenity(&component.user, component.member.as_ref()),
        }
    }
}

/// Reply channel for one interaction: a deferred placeholder, then edits of it.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Acknowledge the interaction with a "thinking" placeholder
    async fn defer(&self, ephemeral: bool) -> Result<()>;

    /// Replace the placeholder content
    async fn edit(&self, reply: &Reply) -> Result<()>;
}

enum InteractionTarget<'a> {
    Command(&'a ApplicationCommandInteraction),
    Component(&'a MessageComponentInteraction),
}

/// [`InteractionResponder`] backed by Discord's interaction endpoints
pub struct SerenityResponder<'a> {
    http: Arc<Http>,
    target: InteractionTarget<'a>,
    colors: EmbedColors,
}

impl<'a> SerenityResponder<'a> {
    pub fn command(
        http: Arc<Http>,
        command: &'a ApplicationCommandInteraction,
        colors: EmbedColors,
    ) -> Self {
        Self {
            http,
            target: InteractionTarget::Command(command),
            colors,
        }
    }

    pub fn component(
        http: Arc<Http>,
        component: &'a MessageComponentInteraction,
        colors: EmbedColors,
    ) -> Self {
        Self {
            http,
            target: InteractionTarget::Component(component),
            colors,
        }
    }
}

#[async_trait]
impl InteractionResponder for SerenityResponder<'_> {
    async fn defer(&self, ephemeral: bool) -> Result<()> {
        match self.target {
            InteractionTarget::Command(command) => {
                command
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                            .interaction_response_data(|message| message.ephemeral(ephemeral))
                    })
                    .await?
            }
            InteractionTarget::Component(component) => {
                component
                    .create_interaction_response(&self.http, |response| {
                        response
                            .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                            .interaction_response_data(|message| message.ephemeral(ephemeral))
                    })
                    .await?
            }
        }
        Ok(())
    }

    async fn edit(&self, reply: &Reply) -> Result<()> {
        let embed = reply_embed(reply, &self.colors);
        let buttons = reply.buttons.clone();
        match self.target {
            InteractionTarget::Command(command) => {
                command
                    .edit_original_interaction_response(&self.http, |response| {
                        response.set_embed(embed);
                        if !buttons.is_empty() {
                            response.components(|c| button_rows(c, &buttons));
                        }
                        response
                    })
                    .await?;
            }
            InteractionTarget::Component(component) => {
                component
                    .edit_original_interaction_response(&self.http, |response| {
                        response.set_embed(embed);
                        if !buttons.is_empty() {
                            response.components(|c| button_rows(c, &buttons));
                        }
                        response
                    })
                    .await?;
            }
        }
        Ok(())
    }
}
