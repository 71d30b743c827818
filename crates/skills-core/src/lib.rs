//! Skills catalog core
//!
//! Record model, validation, the [`CatalogStore`] abstraction with in-memory
//! and SQLite implementations, and the [`UpdateDispatcher`] shared by every
//! update-style operation.

pub mod paths;
pub mod skill;
pub mod storage;
pub mod update;
pub mod validation;

pub use skill::{FieldValue, ReplaceFields, Skill, SkillField, SkillFields, SkillUpdate};
pub use storage::{open_store, Backend, CatalogStore, StoreError, StoreResult};
pub use update::{UpdateDispatcher, UpdateError};
