//! SQLite connection and schema management

use std::path::Path;

use anyhow::{Context, Result};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{params, Connection};

use super::seed::default_skills;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS skills (
        key TEXT PRIMARY KEY,
        name TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        logo TEXT NOT NULL DEFAULT '',
        tags TEXT NOT NULL DEFAULT '[]'
    );
";

/// Owned SQLite connection.
///
/// The connection is serialized behind a mutex; each store operation holds
/// the guard for its whole statement sequence.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize skills schema")?;

        tracing::debug!(path = %path.display(), "Opened skills database");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock and borrow the connection.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Drop the skills table, recreate it, and insert the default entries.
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute_batch("DROP TABLE IF EXISTS skills;")?;
        tx.execute_batch(SCHEMA)?;

        let seeds = default_skills();
        for skill in &seeds {
            tx.execute(
                "INSERT INTO skills (key, name, description, logo, tags)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    skill.key,
                    skill.name,
                    skill.description,
                    skill.logo,
                    serde_json::to_string(&skill.tags)?
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!(count = seeds.len(), "Reset skills table");
        Ok(())
    }
}
