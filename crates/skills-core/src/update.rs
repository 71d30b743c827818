//! Update dispatch
//!
//! Every update-style operation follows the same protocol:
//! 1. validate the instruction (no mutation on failure)
//! 2. apply it through the [`CatalogStore`]
//! 3. re-read the record by key and return what the store now holds
//!
//! Store errors pass through unchanged. A failed re-read after a successful
//! mutation is reported separately as [`UpdateError::RereadFailed`].

use std::sync::Arc;

use thiserror::Error;

use crate::skill::{FieldValue, Skill, SkillFields, SkillUpdate};
use crate::storage::{CatalogStore, StoreError};
use crate::validation::{validate_update, ValidUpdate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The mutation succeeded but the record could not be read back.
    #[error("Skill {key} could not be re-read after update: {source}")]
    RereadFailed { key: String, source: StoreError },
}

impl UpdateError {
    /// True for faults that are not the caller's doing.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            UpdateError::RereadFailed { .. } | UpdateError::Store(StoreError::Internal(_))
        )
    }
}

/// Validate-mutate-reread front end for a catalog store.
#[derive(Clone)]
pub struct UpdateDispatcher {
    store: Arc<dyn CatalogStore>,
}

impl UpdateDispatcher {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Apply `update` to the record at `key` and return the refreshed record.
    pub fn apply(&self, key: &str, update: SkillUpdate) -> Result<Skill, UpdateError> {
        let field = update
            .field()
            .map(|f| f.as_str())
            .unwrap_or("all fields");
        let update = validate_update(update)?;

        match update {
            ValidUpdate::Field(value) => self.store.patch_field(key, value)?,
            ValidUpdate::Replace(fields) => self.store.replace(key, fields)?,
        };
        tracing::debug!(key = %key, field, "Applied skill update");

        self.store.get(key).map_err(|source| {
            tracing::warn!(key = %key, error = %source, "Re-read after update failed");
            UpdateError::RereadFailed {
                key: key.to_string(),
                source,
            }
        })
    }

    pub fn rename(&self, key: &str, name: impl Into<String>) -> Result<Skill, UpdateError> {
        self.apply(key, FieldValue::Name(name.into()).into())
    }

    pub fn describe(&self, key: &str, description: impl Into<String>) -> Result<Skill, UpdateError> {
        self.apply(key, FieldValue::Description(description.into()).into())
    }

    pub fn set_logo(&self, key: &str, logo: impl Into<String>) -> Result<Skill, UpdateError> {
        self.apply(key, FieldValue::Logo(logo.into()).into())
    }

    pub fn set_tags(&self, key: &str, tags: Vec<String>) -> Result<Skill, UpdateError> {
        self.apply(key, FieldValue::Tags(tags).into())
    }

    pub fn replace(&self, key: &str, fields: SkillFields) -> Result<Skill, UpdateError> {
        self.apply(key, fields.into())
    }
}
