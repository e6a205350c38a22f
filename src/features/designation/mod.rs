//! # Feature: Designation
//!
//! Marks Roblox users as threats. Thin layer over [`Database`] that turns redundant
//! mark/unmark requests into user-facing conditions instead of silent no-ops.
//!
//! There is no compare-and-swap: two concurrent designations of the same ID can both pass
//! the `is_marked` check, and the last write wins.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use log::info;
use thiserror::Error;

use crate::database::Database;

#[derive(Debug, Error)]
pub enum DesignationError {
    #[error("Roblox user {0} is already designated")]
    AlreadyMarked(u64),
    #[error("Roblox user {0} is not designated")]
    NotMarked(u64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct DesignationService {
    database: Database,
}

impl DesignationService {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn is_marked(&self, roblox_id: u64) -> anyhow::Result<bool> {
        self.database.is_marked(roblox_id).await
    }

    /// Mark a user, refusing if they are already marked
    pub async fn designate(&self, roblox_id: u64) -> Result<(), DesignationError> {
        if self.database.is_marked(roblox_id).await? {
            return Err(DesignationError::AlreadyMarked(roblox_id));
        }
        self.database.mark(roblox_id).await?;
        info!("🚩 Designated roblox user {roblox_id}");
        Ok(())
    }

    /// Unmark a user, refusing if they are not marked
    pub async fn undesignate(&self, roblox_id: u64) -> Result<(), DesignationError> {
        if !self.database.is_marked(roblox_id).await? {
            return Err(DesignationError::NotMarked(roblox_id));
        }
        self.database.unmark(roblox_id).await?;
        info!("🏳️ Undesignated roblox user {roblox_id}");
        Ok(())
    }
}
