//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Designation store, registry and publisher for reloads
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::publisher::SlashCommandPublisher;
use super::registry::CommandRegistry;
use crate::database::Database;
use crate::features::designation::DesignationService;
use crate::features::lookup::RobloxClient;
use crate::features::permissions::PermissionConfig;

/// Shared context for all command handlers
///
/// Contains the services handlers need:
/// - DesignationService for the threat flag
/// - PermissionConfig for role checks
/// - CommandRegistry and SlashCommandPublisher for `/reload`
/// - RobloxClient for user lookups
/// - Bot start time for uptime reporting
#[derive(Clone)]
pub struct CommandContext {
    pub designations: DesignationService,
    pub permissions: Arc<PermissionConfig>,
    pub registry: Arc<CommandRegistry>,
    pub publisher: Arc<SlashCommandPublisher>,
    pub roblox: RobloxClient,
    pub start_time: Instant,
}

impl CommandContext {
    pub fn new(
        database: Database,
        permissions: Arc<PermissionConfig>,
        registry: Arc<CommandRegistry>,
        publisher: Arc<SlashCommandPublisher>,
        roblox: RobloxClient,
    ) -> Self {
        Self {
            designations: DesignationService::new(database),
            permissions,
            registry,
            publisher,
            roblox,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
