//! In-memory catalog store

use parking_lot::RwLock;

use super::{CatalogStore, StoreError, StoreResult};
use crate::skill::{FieldValue, ReplaceFields, Skill};
use crate::validation::{validate_field, validate_new};

/// Records held for the lifetime of the process.
///
/// Every mutation holds the write lock across its existence check and its
/// write, so concurrent creates of one key admit exactly one winner.
#[derive(Default)]
pub struct MemoryStore {
    skills: RwLock<Vec<Skill>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `skills`, skipping duplicate keys.
    pub fn with_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.skills.write();
            for skill in skills {
                if !guard.iter().any(|s| s.key == skill.key) {
                    guard.push(skill);
                }
            }
        }
        store
    }

    fn update<F>(&self, key: &str, mutate: F) -> StoreResult<Skill>
    where
        F: FnOnce(&mut Skill),
    {
        let mut guard = self.skills.write();
        let skill = guard
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        mutate(skill);
        Ok(skill.clone())
    }
}

impl CatalogStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Skill>> {
        Ok(self.skills.read().clone())
    }

    fn get(&self, key: &str) -> StoreResult<Skill> {
        self.skills
            .read()
            .iter()
            .find(|s| s.key == key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn create(&self, skill: Skill) -> StoreResult<Skill> {
        validate_new(&skill)?;

        let mut guard = self.skills.write();
        if guard.iter().any(|s| s.key == skill.key) {
            return Err(StoreError::AlreadyExists(skill.key));
        }
        guard.push(skill.clone());
        tracing::debug!(key = %skill.key, "Created skill");
        Ok(skill)
    }

    fn replace(&self, key: &str, fields: ReplaceFields) -> StoreResult<Skill> {
        self.update(key, |skill| skill.apply_replace(fields))
    }

    fn patch_field(&self, key: &str, value: FieldValue) -> StoreResult<Skill> {
        validate_field(&value)?;
        self.update(key, |skill| skill.apply_field(value))
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut guard = self.skills.write();
        let index = guard
            .iter()
            .position(|s| s.key == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        guard.remove(index);
        tracing::debug!(key = %key, "Deleted skill");
        Ok(())
    }
}
