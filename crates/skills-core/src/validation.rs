//! Input validation for skill records and update instructions
//!
//! Validation never touches the store. Every failure is reported as
//! [`StoreError::InvalidInput`].

use crate::skill::{FieldValue, ReplaceFields, Skill, SkillField, SkillFields, SkillUpdate};
use crate::storage::StoreError;

/// Validator for a single-field patch.
pub type FieldValidator = fn(&FieldValue) -> Result<(), StoreError>;

/// Reject empty or whitespace-only keys.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "Skill key cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate a record about to be created.
pub fn validate_new(skill: &Skill) -> Result<(), StoreError> {
    validate_key(&skill.key)
}

/// Check that a full replace supplies every mutable field.
///
/// String fields must be non-empty; `tags` must be present but may be empty.
pub fn validate_replace(fields: SkillFields) -> Result<ReplaceFields, StoreError> {
    let name = required_text(fields.name, SkillField::Name)?;
    let description = required_text(fields.description, SkillField::Description)?;
    let logo = required_text(fields.logo, SkillField::Logo)?;
    let tags = fields.tags.ok_or_else(|| missing(SkillField::Tags))?;

    Ok(ReplaceFields {
        name,
        description,
        logo,
        tags,
    })
}

fn required_text(value: Option<String>, field: SkillField) -> Result<String, StoreError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(empty(field)),
        None => Err(missing(field)),
    }
}

fn missing(field: SkillField) -> StoreError {
    StoreError::InvalidInput(format!("Missing required field: {}", field))
}

fn empty(field: SkillField) -> StoreError {
    StoreError::InvalidInput(format!("Field {} cannot be empty", field))
}

fn non_empty_text(value: &FieldValue) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(empty(value.field()));
    }
    Ok(())
}

fn non_empty_tags(value: &FieldValue) -> Result<(), StoreError> {
    match value {
        FieldValue::Tags(tags) if tags.is_empty() => Err(StoreError::InvalidInput(
            "Tags cannot be empty".to_string(),
        )),
        FieldValue::Tags(_) => Ok(()),
        other => Err(StoreError::InvalidInput(format!(
            "Expected tags, got {}",
            other.field()
        ))),
    }
}

/// Validator applied to patches of `field`.
pub fn validator_for(field: SkillField) -> FieldValidator {
    match field {
        SkillField::Name | SkillField::Description | SkillField::Logo => non_empty_text,
        SkillField::Tags => non_empty_tags,
    }
}

/// Validate a single-field patch against its field's validator.
pub fn validate_field(value: &FieldValue) -> Result<(), StoreError> {
    validator_for(value.field())(value)
}

/// Validated form of a [`SkillUpdate`], ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidUpdate {
    Field(FieldValue),
    Replace(ReplaceFields),
}

/// Validate any update instruction.
pub fn validate_update(update: SkillUpdate) -> Result<ValidUpdate, StoreError> {
    match update {
        SkillUpdate::Field(value) => {
            validate_field(&value)?;
            Ok(ValidUpdate::Field(value))
        }
        SkillUpdate::Replace(fields) => validate_replace(fields).map(ValidUpdate::Replace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_fields() -> SkillFields {
        SkillFields {
            name: Some("Rust".to_string()),
            description: Some("Systems language".to_string()),
            logo: Some("https://example.com/rust.svg".to_string()),
            tags: Some(vec![]),
        }
    }

    #[test]
    fn blank_keys_are_rejected() {
        assert!(matches!(validate_key(""), Err(StoreError::InvalidInput(_))));
        assert!(matches!(validate_key("  "), Err(StoreError::InvalidInput(_))));
        assert!(validate_key("rust").is_ok());
    }

    #[test]
    fn replace_accepts_empty_tag_list() {
        let fields = validate_replace(full_fields()).unwrap();
        assert_eq!(fields.name, "Rust");
        assert!(fields.tags.is_empty());
    }

    #[test]
    fn replace_requires_every_field() {
        let cases = [
            SkillFields {
                name: None,
                ..full_fields()
            },
            SkillFields {
                description: Some(String::new()),
                ..full_fields()
            },
            SkillFields {
                logo: None,
                ..full_fields()
            },
            SkillFields {
                tags: None,
                ..full_fields()
            },
        ];

        for fields in cases {
            assert!(matches!(
                validate_replace(fields),
                Err(StoreError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn patches_reject_empty_values() {
        assert!(validate_field(&FieldValue::Name(String::new())).is_err());
        assert!(validate_field(&FieldValue::Description(String::new())).is_err());
        assert!(validate_field(&FieldValue::Logo(String::new())).is_err());
        assert!(validate_field(&FieldValue::Tags(vec![])).is_err());

        assert!(validate_field(&FieldValue::Name("Go".to_string())).is_ok());
        assert!(validate_field(&FieldValue::Tags(vec!["web".to_string()])).is_ok());
    }

    #[test]
    fn tags_validator_rejects_mismatched_value() {
        let validator = validator_for(SkillField::Tags);
        assert!(validator(&FieldValue::Name("Go".to_string())).is_err());
    }
}
