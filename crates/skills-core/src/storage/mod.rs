//! Persistence layer
//!
//! A single [`CatalogStore`] interface with two implementations:
//! - [`MemoryStore`]: process-lifetime records behind a reader/writer lock
//! - [`SqliteStore`]: durable records in a SQLite `skills` table

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::skill::{FieldValue, ReplaceFields, Skill};

mod database;
mod memory;
mod seed;
mod skills;

pub use database::Database;
pub use memory::MemoryStore;
pub use seed::default_skills;
pub use skills::SqliteStore;

/// Failure kinds reported by every store operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Skill {0} not found")]
    NotFound(String),
    #[error("Skill {0} already exists")]
    AlreadyExists(String),
    #[error("Storage error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Internal(format!("Failed to encode tags: {}", err))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Owner of the skill collection.
///
/// Mutations are serialized so that the existence check and the write of
/// each operation happen as one unit. Reads never observe a partially
/// written record.
pub trait CatalogStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> StoreResult<Vec<Skill>>;

    fn get(&self, key: &str) -> StoreResult<Skill>;

    /// Insert a new record. Fails with `AlreadyExists` on key collision.
    fn create(&self, skill: Skill) -> StoreResult<Skill>;

    /// Overwrite every mutable field of an existing record.
    fn replace(&self, key: &str, fields: ReplaceFields) -> StoreResult<Skill>;

    /// Overwrite exactly one field of an existing record.
    fn patch_field(&self, key: &str, value: FieldValue) -> StoreResult<Skill>;

    /// Remove a record. Deleting an absent key is `NotFound`.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Which store implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    Memory,
    #[default]
    Sqlite,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => f.write_str("memory"),
            Backend::Sqlite => f.write_str("sqlite"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Backend::Memory),
            "sqlite" | "db" => Ok(Backend::Sqlite),
            other => Err(format!("Unknown backend: {}", other)),
        }
    }
}

/// Construct the store selected by `backend`.
///
/// `path` is only used by the SQLite backend. With `seed`, an empty store is
/// populated with [`default_skills`].
pub fn open_store(backend: Backend, path: &Path, seed: bool) -> Result<Arc<dyn CatalogStore>> {
    let store: Arc<dyn CatalogStore> = match backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Sqlite => Arc::new(SqliteStore::new(Database::new(path)?)),
    };

    if seed && store.list()?.is_empty() {
        for skill in default_skills() {
            match store.create(skill) {
                Ok(_) | Err(StoreError::AlreadyExists(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!(backend = %backend, "Seeded empty catalog with default skills");
    }

    Ok(store)
}
