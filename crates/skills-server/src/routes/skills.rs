//! Skill catalog endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use skills_core::{Skill, SkillField, SkillUpdate};

use crate::error::AppError;
use crate::types::{DataResponse, MessageResponse, PatchSkillRequest, ReplaceSkillRequest};
use crate::AppState;

/// Build the skills router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_skills).post(create_skill))
        .route(
            "/:key",
            get(get_skill).put(replace_skill).delete(delete_skill),
        )
        .route("/:key/actions/:field", patch(patch_skill))
}

/// List every skill
async fn list_skills(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Skill>>>, AppError> {
    let skills = state.store.list()?;
    Ok(Json(DataResponse::success(skills)))
}

/// Get a single skill by key
async fn get_skill(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DataResponse<Skill>>, AppError> {
    let skill = state.store.get(&key)?;
    Ok(Json(DataResponse::success(skill)))
}

/// Create a new skill
async fn create_skill(
    State(state): State<AppState>,
    payload: Result<Json<Skill>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Skill>>), AppError> {
    let Json(skill) = payload?;
    let created = state.store.create(skill)?;

    tracing::info!(key = %created.key, "Created skill");
    Ok((StatusCode::CREATED, Json(DataResponse::success(created))))
}

/// Replace every mutable field of a skill
async fn replace_skill(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<ReplaceSkillRequest>, JsonRejection>,
) -> Result<Json<DataResponse<Skill>>, AppError> {
    let Json(fields) = payload?;
    let skill = state.dispatcher.apply(&key, SkillUpdate::Replace(fields))?;
    Ok(Json(DataResponse::success(skill)))
}

/// Update a single field (`name`, `description`, `logo`, or `tags`)
async fn patch_skill(
    State(state): State<AppState>,
    Path((key, field)): Path<(String, String)>,
    payload: Result<Json<PatchSkillRequest>, JsonRejection>,
) -> Result<Json<DataResponse<Skill>>, AppError> {
    let field: SkillField = field
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown action: {}", field)))?;
    let Json(req) = payload?;

    let value = req.into_value(field)?;
    let skill = state.dispatcher.apply(&key, SkillUpdate::Field(value))?;
    Ok(Json(DataResponse::success(skill)))
}

/// Delete a skill
async fn delete_skill(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete(&key)?;

    tracing::info!(key = %key, "Deleted skill");
    Ok(Json(MessageResponse::success("Skill deleted")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use skills_core::storage::{default_skills, MemoryStore};
    use skills_core::Backend;

    use super::*;

    fn test_app() -> Router {
        let store = Arc::new(MemoryStore::with_skills(default_skills()));
        crate::router(AppState::new(store, Backend::Memory))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn list_returns_seeded_skills() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/v1/skills", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"][0]["key"], "go");
        assert_eq!(body["data"][1]["key"], "nodejs");
    }

    #[tokio::test]
    async fn create_get_patch_delete_lifecycle() {
        let app = test_app();
        let rust = json!({
            "key": "rust",
            "name": "Rust",
            "description": "Memory safe systems language",
            "logo": "https://example.com/rust.svg",
            "tags": ["programming language", "system"]
        });

        let (status, body) = send(&app, "POST", "/api/v1/skills", Some(rust.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"], rust);

        let (status, body) = send(&app, "GET", "/api/v1/skills/rust", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], rust);

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/skills/rust/actions/name",
            Some(json!({"name": "Rust Lang"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Rust Lang");
        assert_eq!(body["data"]["tags"], rust["tags"]);

        let (status, body) = send(&app, "DELETE", "/api/v1/skills/rust", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Skill deleted");

        let (status, body) = send(&app, "GET", "/api/v1/skills/rust", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Skill not found");
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let app = test_app();
        let (status, body) =
            send(&app, "POST", "/api/v1/skills", Some(json!({"key": "go"}))).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Skill already exists");
    }

    #[tokio::test]
    async fn empty_key_and_malformed_body_are_bad_requests() {
        let app = test_app();

        let (status, _) = send(&app, "POST", "/api/v1/skills", Some(json!({"key": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            send(&app, "POST", "/api/v1/skills", Some(json!({"name": "no key"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request payload");

        let (_, body) = send(&app, "GET", "/api/v1/skills", None).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn replace_requires_all_fields() {
        let app = test_app();

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/skills/go",
            Some(json!({"name": "Go", "description": "d", "logo": "l"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/skills/go",
            Some(json!({"name": "Go", "description": "d", "logo": "l", "tags": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"key": "go", "name": "Go", "description": "d", "logo": "l", "tags": []})
        );
    }

    #[tokio::test]
    async fn patch_rejects_empty_values_and_unknown_fields() {
        let app = test_app();

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/v1/skills/go/actions/tags",
            Some(json!({"tags": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/v1/skills/go/actions/logo",
            Some(json!({"name": "wrong member"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/v1/skills/go/actions/key",
            Some(json!({"key": "golang"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn mutations_on_missing_key_are_not_found() {
        let app = test_app();

        let (status, _) = send(
            &app,
            "PATCH",
            "/api/v1/skills/ghost/actions/description",
            Some(json!({"description": "boo"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/skills/ghost",
            Some(json!({"name": "n", "description": "d", "logo": "l", "tags": []})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/api/v1/skills/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ping_and_health_respond() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");

        let (_, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(body["backend"], "memory");
    }
}
