//! Reply embed builders for Discord responses
//!
//! Every interaction is answered with a single embed: title, description, a color picked
//! from the semantic category, and the invoking user as author. Buttons ride along as
//! action rows.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Structured `Reply` payload with info/success/error categories and buttons
//! - 1.0.0: Styled embed helpers

use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;

use crate::core::response::{
    truncate_chars, truncate_for_embed, FIELD_NAME_LIMIT, FIELD_VALUE_LIMIT, TITLE_LIMIT,
};

/// Discord allows at most five buttons per action row
const BUTTONS_PER_ROW: usize = 5;

/// Semantic color category of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedKind {
    Info,
    Success,
    Error,
}

/// Color value per [`EmbedKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedColors {
    pub info: u32,
    pub success: u32,
    pub error: u32,
}

impl Default for EmbedColors {
    fn default() -> Self {
        Self {
            info: 0x3498DB,
            success: 0x57F287,
            error: 0xED4245,
        }
    }
}

impl EmbedColors {
    pub fn color_for(&self, kind: EmbedKind) -> u32 {
        match kind {
            EmbedKind::Info => self.info,
            EmbedKind::Success => self.success,
            EmbedKind::Error => self.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyButton {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

/// Final content of an interaction, written over the deferred placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: String,
    pub description: String,
    pub kind: EmbedKind,
    pub author: Option<Author>,
    pub fields: Vec<ReplyField>,
    pub buttons: Vec<ReplyButton>,
}

impl Reply {
    pub fn new(kind: EmbedKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            author: None,
            fields: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(EmbedKind::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(EmbedKind::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(EmbedKind::Error, title, description)
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(ReplyField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn button(
        mut self,
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: ButtonStyle,
    ) -> Self {
        self.buttons.push(ReplyButton {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        });
        self
    }
}

/// Build the embed for a reply, truncating every part to Discord's limits.
pub fn reply_embed(reply: &Reply, colors: &EmbedColors) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title(truncate_chars(&reply.title, TITLE_LIMIT));
    embed.description(truncate_for_embed(&reply.description));
    embed.color(colors.color_for(reply.kind));
    if let Some(author) = &reply.author {
        embed.author(|a| {
            a.name(&author.name);
            if let Some(url) = &author.icon_url {
                a.icon_url(url);
            }
            a
        });
    }
    for field in &reply.fields {
        embed.field(
            truncate_chars(&field.name, FIELD_NAME_LIMIT),
            truncate_chars(&field.value, FIELD_VALUE_LIMIT),
            field.inline,
        );
    }
    embed
}

/// Lay buttons out in action rows of at most five.
pub fn button_rows<'a>(
    components: &'a mut CreateComponents,
    buttons: &[ReplyButton],
) -> &'a mut CreateComponents {
    for row_buttons in buttons.chunks(BUTTONS_PER_ROW) {
        components.create_action_row(|row| {
            for button in row_buttons {
                row.create_button(|b| {
                    b.custom_id(&button.custom_id)
                        .label(&button.label)
                        .style(button.style)
                });
            }
            row
        });
    }
    components
}
