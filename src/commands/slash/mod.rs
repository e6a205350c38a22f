//! # Slash Commands (/)
//!
//! Schema builders for every slash command in the catalog.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Schemas are owned by their handlers; registration moved to the publisher
//! - 2.0.0: Consolidated builders per command family
//! - 1.0.0: Reorganized from monolithic slash_commands.rs

pub mod admin;
pub mod lookup;
pub mod utility;

pub use admin::create_reload_command;
pub use lookup::{create_designation_command, create_lookup_command};
pub use utility::create_ping_command;
