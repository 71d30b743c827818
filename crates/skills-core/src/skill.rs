//! Skill records and the update instructions that mutate them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry.
///
/// `key` is the primary key and never changes once the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skill {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
}

impl Skill {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = logo.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Overwrite every mutable field, keeping the key.
    pub(crate) fn apply_replace(&mut self, fields: ReplaceFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.logo = fields.logo;
        self.tags = fields.tags;
    }

    /// Overwrite the single field targeted by `update`.
    pub(crate) fn apply_field(&mut self, update: FieldValue) {
        match update {
            FieldValue::Name(name) => self.name = name,
            FieldValue::Description(description) => self.description = description,
            FieldValue::Logo(logo) => self.logo = logo,
            FieldValue::Tags(tags) => self.tags = tags,
        }
    }
}

/// `null` tags are stored as an empty list.
fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Mutable fields of a skill, as received for a full replace.
///
/// Every field is optional on the wire so that a missing field can be
/// rejected by validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Fully validated replacement payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceFields {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub tags: Vec<String>,
}

/// Names of the individually patchable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillField {
    Name,
    Description,
    Logo,
    Tags,
}

impl SkillField {
    pub const ALL: [SkillField; 4] = [
        SkillField::Name,
        SkillField::Description,
        SkillField::Logo,
        SkillField::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillField::Name => "name",
            SkillField::Description => "description",
            SkillField::Logo => "logo",
            SkillField::Tags => "tags",
        }
    }

    /// SQL column backing this field.
    pub(crate) fn column(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for SkillField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown skill field: {}", s))
    }
}

/// New value for exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(String),
    Description(String),
    Logo(String),
    Tags(Vec<String>),
}

impl FieldValue {
    pub fn field(&self) -> SkillField {
        match self {
            FieldValue::Name(_) => SkillField::Name,
            FieldValue::Description(_) => SkillField::Description,
            FieldValue::Logo(_) => SkillField::Logo,
            FieldValue::Tags(_) => SkillField::Tags,
        }
    }

    /// True when the value is the empty value for its type.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Name(v) | FieldValue::Description(v) | FieldValue::Logo(v) => v.is_empty(),
            FieldValue::Tags(tags) => tags.is_empty(),
        }
    }
}

/// A mutation instruction consumed by the update dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillUpdate {
    /// Overwrite one field.
    Field(FieldValue),
    /// Overwrite every mutable field.
    Replace(SkillFields),
}

impl SkillUpdate {
    /// Targeted field, or `None` for a full replace.
    pub fn field(&self) -> Option<SkillField> {
        match self {
            SkillUpdate::Field(value) => Some(value.field()),
            SkillUpdate::Replace(_) => None,
        }
    }
}

impl From<FieldValue> for SkillUpdate {
    fn from(value: FieldValue) -> Self {
        SkillUpdate::Field(value)
    }
}

impl From<SkillFields> for SkillUpdate {
    fn from(fields: SkillFields) -> Self {
        SkillUpdate::Replace(fields)
    }
}
