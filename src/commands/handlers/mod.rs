//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: One handler per command; this list is the module catalog the registry loads
//! - 2.0.0: Add lookup handlers
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod admin;
pub mod lookup;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Every command module shipped with the bot, in registration order
///
/// Passed to `CommandRegistry::new`; called again on every reload.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::PingHandler),
        Arc::new(lookup::LookupHandler),
        Arc::new(lookup::DesignationHandler),
        Arc::new(admin::ReloadHandler),
    ]
}
