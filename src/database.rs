//! # Database
//!
//! SQLite persistence for designation records. A row in `designations` means the Roblox
//! user is marked; no row means unmarked.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context as _, Result};
use log::{debug, info};
use sqlite::{Connection, State};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// `":memory:"` gives a throwaway database.
    pub async fn new(path: &str) -> Result<Self> {
        let connection =
            sqlite::open(path).with_context(|| format!("Failed to open database at {path}"))?;
        let database = Database {
            connection: Arc::new(Mutex::new(connection)),
        };
        database.init_tables().await?;
        info!("Database initialized at {path}");
        Ok(database)
    }

    async fn init_tables(&self) -> Result<()> {
        let connection = self.connection.lock().await;
        connection.execute(
            "CREATE TABLE IF NOT EXISTS designations (
                roblox_id INTEGER PRIMARY KEY NOT NULL
            )",
        )?;
        Ok(())
    }

    pub async fn is_marked(&self, roblox_id: u64) -> Result<bool> {
        let id = to_sql_id(roblox_id)?;
        let connection = self.connection.lock().await;
        let mut statement =
            connection.prepare("SELECT 1 FROM designations WHERE roblox_id = ? LIMIT 1")?;
        statement.bind((1, id))?;
        Ok(statement.next()? == State::Row)
    }

    /// Mark a user. Marking an already-marked user is a no-op at this level.
    pub async fn mark(&self, roblox_id: u64) -> Result<()> {
        let id = to_sql_id(roblox_id)?;
        let connection = self.connection.lock().await;
        let mut statement =
            connection.prepare("INSERT OR IGNORE INTO designations (roblox_id) VALUES (?)")?;
        statement.bind((1, id))?;
        statement.next()?;
        debug!("Marked roblox user {roblox_id}");
        Ok(())
    }

    pub async fn unmark(&self, roblox_id: u64) -> Result<()> {
        let id = to_sql_id(roblox_id)?;
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare("DELETE FROM designations WHERE roblox_id = ?")?;
        statement.bind((1, id))?;
        statement.next()?;
        debug!("Unmarked roblox user {roblox_id}");
        Ok(())
    }
}

/// SQLite integers are signed 64-bit
fn to_sql_id(roblox_id: u64) -> Result<i64> {
    i64::try_from(roblox_id).with_context(|| format!("Roblox ID {roblox_id} does not fit in SQLite"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mark_then_is_marked() {
        let db = Database::new(":memory:").await.unwrap();
        assert!(!db.is_marked(12345).await.unwrap());

        db.mark(12345).await.unwrap();
        assert!(db.is_marked(12345).await.unwrap());
        assert!(!db.is_marked(54321).await.unwrap());
    }

    #[tokio::test]
    async fn test_unmark_then_is_marked() {
        let db = Database::new(":memory:").await.unwrap();
        db.mark(7).await.unwrap();
        db.unmark(7).await.unwrap();
        assert!(!db.is_marked(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_twice_keeps_single_record() {
        let db = Database::new(":memory:").await.unwrap();
        db.mark(7).await.unwrap();
        db.mark(7).await.unwrap();
        db.unmark(7).await.unwrap();
        assert!(!db.is_marked(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_unmark_missing_is_noop() {
        let db = Database::new(":memory:").await.unwrap();
        db.unmark(99).await.unwrap();
        assert!(!db.is_marked(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_out_of_range_id_is_rejected() {
        let db = Database::new(":memory:").await.unwrap();
        assert!(db.mark(u64::MAX).await.is_err());
    }

    #[tokio::test]
    async fn test_records_persist_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warden.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new(path).await.unwrap();
            db.mark(1_000_000_001).await.unwrap();
        }

        let reopened = Database::new(path).await.unwrap();
        assert!(reopened.is_marked(1_000_000_001).await.unwrap());
    }
}
