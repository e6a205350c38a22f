//! # Core Module
//!
//! Configuration, reply rendering and Discord payload limits shared by every layer.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Reply embeds with semantic colors
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{reply_embed, Author, EmbedColors, EmbedKind, Reply, ReplyButton, ReplyField};
pub use response::{truncate_chars, truncate_for_embed, EMBED_LIMIT};
