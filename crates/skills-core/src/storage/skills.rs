//! SQLite-backed catalog store
//!
//! Key uniqueness is enforced by the `PRIMARY KEY` constraint: creates insert
//! unconditionally and a constraint violation becomes `AlreadyExists`. This
//! holds even when several processes share one database file.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use super::database::Database;
use super::{CatalogStore, StoreError, StoreResult};
use crate::skill::{FieldValue, ReplaceFields, Skill};
use crate::validation::{validate_field, validate_new};

const SELECT_SKILL: &str = "SELECT key, name, description, logo, tags FROM skills";

/// Durable catalog store.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get reference to underlying database
    pub fn db(&self) -> &Database {
        &self.db
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<SkillRow> {
        Ok(SkillRow {
            key: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            logo: row.get(3)?,
            tags: row.get(4)?,
        })
    }

    fn fetch(conn: &Connection, key: &str) -> StoreResult<Option<Skill>> {
        let row = conn
            .query_row(
                &format!("{} WHERE key = ?1", SELECT_SKILL),
                [key],
                Self::map_row,
            )
            .optional()?;
        row.map(SkillRow::into_skill).transpose()
    }

    fn fetch_existing(conn: &Connection, key: &str) -> StoreResult<Skill> {
        Self::fetch(conn, key)?.ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

impl CatalogStore for SqliteStore {
    fn list(&self) -> StoreResult<Vec<Skill>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_SKILL))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(SkillRow::into_skill).collect()
    }

    fn get(&self, key: &str) -> StoreResult<Skill> {
        let conn = self.db.conn();
        Self::fetch_existing(&conn, key)
    }

    fn create(&self, skill: Skill) -> StoreResult<Skill> {
        validate_new(&skill)?;
        let tags = serde_json::to_string(&skill.tags)?;

        let conn = self.db.conn();
        let result = conn.execute(
            "INSERT INTO skills (key, name, description, logo, tags)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![skill.key, skill.name, skill.description, skill.logo, tags],
        );

        match result {
            Ok(_) => {
                tracing::debug!(key = %skill.key, "Inserted skill");
                Ok(skill)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(skill.key))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn replace(&self, key: &str, fields: ReplaceFields) -> StoreResult<Skill> {
        let tags = serde_json::to_string(&fields.tags)?;

        let conn = self.db.conn();
        let rows = conn.execute(
            "UPDATE skills SET name = ?1, description = ?2, logo = ?3, tags = ?4
             WHERE key = ?5",
            params![fields.name, fields.description, fields.logo, tags, key],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }

        Self::fetch_existing(&conn, key)
    }

    fn patch_field(&self, key: &str, value: FieldValue) -> StoreResult<Skill> {
        validate_field(&value)?;
        let column = value.field().column();
        let sql = format!("UPDATE skills SET {} = ?1 WHERE key = ?2", column);

        let conn = self.db.conn();
        let rows = match value {
            FieldValue::Name(v) | FieldValue::Description(v) | FieldValue::Logo(v) => {
                conn.execute(&sql, params![v, key])?
            }
            FieldValue::Tags(tags) => {
                conn.execute(&sql, params![serde_json::to_string(&tags)?, key])?
            }
        };
        if rows == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }

        Self::fetch_existing(&conn, key)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let rows = self
            .db
            .conn()
            .execute("DELETE FROM skills WHERE key = ?1", [key])?;
        if rows == 0 {
            return Err(StoreError::NotFound(key.to_string()));
        }
        tracing::debug!(key = %key, "Deleted skill");
        Ok(())
    }
}

/// Internal row type for skill queries
struct SkillRow {
    key: String,
    name: String,
    description: String,
    logo: String,
    tags: String,
}

impl SkillRow {
    fn into_skill(self) -> StoreResult<Skill> {
        let tags: Option<Vec<String>> = serde_json::from_str(&self.tags).map_err(|e| {
            StoreError::Internal(format!("Corrupt tags for skill {}: {}", self.key, e))
        })?;

        Ok(Skill {
            key: self.key,
            name: self.name,
            description: self.description,
            logo: self.logo,
            tags: tags.unwrap_or_default(),
        })
    }
}
