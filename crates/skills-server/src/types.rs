//! Request and response types for the API

use serde::{Deserialize, Serialize};

use skills_core::{FieldValue, SkillField, SkillFields};

use crate::error::AppError;

// ============================================================================
// Envelopes
// ============================================================================

/// Success body carrying data: `{"status":"success","data":...}`
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// Success body carrying a confirmation message
#[derive(Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

// ============================================================================
// Skill Types
// ============================================================================

/// Body for `PUT /skills/:key`
pub type ReplaceSkillRequest = SkillFields;

/// Body for `PATCH /skills/:key/actions/:field`
///
/// Only the member named by the path's field is read.
#[derive(Debug, Default, Deserialize)]
pub struct PatchSkillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PatchSkillRequest {
    /// Extract the value for `field`, rejecting a body that omits it.
    pub fn into_value(self, field: SkillField) -> Result<FieldValue, AppError> {
        let value = match field {
            SkillField::Name => self.name.map(FieldValue::Name),
            SkillField::Description => self.description.map(FieldValue::Description),
            SkillField::Logo => self.logo.map(FieldValue::Logo),
            SkillField::Tags => self.tags.map(FieldValue::Tags),
        };
        value.ok_or_else(|| AppError::BadRequest("Invalid request payload".to_string()))
    }
}

#[derive(Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_request_reads_only_named_field() {
        let req: PatchSkillRequest =
            serde_json::from_str(r#"{"name":"Golang","logo":"ignored.svg"}"#).unwrap();
        assert_eq!(
            req.into_value(SkillField::Name).unwrap(),
            FieldValue::Name("Golang".to_string())
        );
    }

    #[test]
    fn patch_request_without_field_is_bad_request() {
        let req: PatchSkillRequest = serde_json::from_str(r#"{"name":"Golang"}"#).unwrap();
        assert!(matches!(
            req.into_value(SkillField::Tags),
            Err(AppError::BadRequest(_))
        ));
    }
}
