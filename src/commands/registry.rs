//! Command registry
//!
//! Builds the command catalog from the static module list and serves lookups to the
//! interaction router.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Descriptor catalog with validation and copy-on-reload snapshots
//! - 1.0.0: Initial implementation for handler dispatch

use log::{info, warn};
use serenity::builder::CreateApplicationCommand;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use super::handler::SlashCommandHandler;
use crate::features::permissions::PermissionTier;

/// Discord's limit for command names
const MAX_NAME_LEN: usize = 32;

/// Produces the command modules to load. Re-invoked on every reload.
pub type ModuleList = fn() -> Vec<Arc<dyn SlashCommandHandler>>;

/// Immutable snapshot of the loaded commands
pub type Catalog = Arc<Vec<CommandDescriptor>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid command name {0:?} (expected 1-32 lowercase letters, digits, '-' or '_')")]
    InvalidName(String),
    #[error("schema for /{module} declares name {declared:?}")]
    SchemaNameMismatch {
        module: String,
        declared: Option<String>,
    },
    #[error("no command modules could be loaded")]
    Empty,
}

/// One loaded command: schema, handler and metadata
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub schema: CreateApplicationCommand,
    pub tier: PermissionTier,
    pub ephemeral: bool,
    pub handler: Arc<dyn SlashCommandHandler>,
}

impl CommandDescriptor {
    /// Load a module into a descriptor, validating its name and schema
    pub fn load(handler: Arc<dyn SlashCommandHandler>) -> Result<Self, CatalogError> {
        let name = handler.command_name();
        if !is_valid_command_name(name) {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        let schema = handler.schema();
        let declared = schema.0.get("name").and_then(|v| v.as_str());
        if declared != Some(name) {
            return Err(CatalogError::SchemaNameMismatch {
                module: name.to_string(),
                declared: declared.map(str::to_string),
            });
        }

        Ok(Self {
            name: name.to_string(),
            tier: handler.permission(),
            ephemeral: handler.ephemeral(),
            schema,
            handler,
        })
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .field("ephemeral", &self.ephemeral)
            .finish_non_exhaustive()
    }
}

fn is_valid_command_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Catalog of slash command descriptors
///
/// Readers take an `Arc` snapshot of the catalog; `reload` builds a complete new catalog
/// before swapping it in, so a lookup racing a reload sees either the old or the new
/// catalog, never a partial one.
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::new(handlers::create_all_handlers);
/// registry.reload()?;
///
/// if let Some(descriptor) = registry.get("Lookup") {
///     descriptor.handler.handle(ctx, &invocation, &responder).await?;
/// }
/// ```
pub struct CommandRegistry {
    modules: ModuleList,
    catalog: RwLock<Catalog>,
}

impl CommandRegistry {
    /// Create a registry over a module list. The catalog stays empty until `reload`.
    pub fn new(modules: ModuleList) -> Self {
        Self {
            modules,
            catalog: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Load every module in the list
    ///
    /// A malformed module is logged and skipped; the rest still load. Fails only when
    /// nothing could be loaded.
    pub fn discover(&self) -> Result<Vec<CommandDescriptor>, CatalogError> {
        let mut descriptors: Vec<CommandDescriptor> = Vec::new();

        for module in (self.modules)() {
            match CommandDescriptor::load(module) {
                Ok(descriptor) => {
                    if descriptors.iter().any(|d| d.name == descriptor.name) {
                        warn!(
                            "⚠️ Duplicate command /{} - the first registered module wins",
                            descriptor.name
                        );
                    }
                    descriptors.push(descriptor);
                }
                Err(e) => {
                    warn!("⚠️ Couldn't load command module: {e}");
                }
            }
        }

        if descriptors.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(descriptors)
    }

    /// Rediscover all modules and swap in the new catalog
    ///
    /// On failure the previous catalog stays in place.
    pub fn reload(&self) -> Result<usize, CatalogError> {
        let descriptors = self.discover()?;
        let count = descriptors.len();
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(descriptors);
        info!("📚 Loaded {count} commands");
        Ok(count)
    }

    /// Current catalog snapshot
    pub fn snapshot(&self) -> Catalog {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Find a command by name, case-insensitively. First match wins.
    pub fn get(&self, name: &str) -> Option<CommandDescriptor> {
        let name = name.to_lowercase();
        self.snapshot().iter().find(|d| d.name == name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of loaded commands
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Names of all loaded commands, in registration order
    pub fn command_names(&self) -> Vec<String> {
        self.snapshot().iter().map(|d| d.name.clone()).collect()
    }
}
