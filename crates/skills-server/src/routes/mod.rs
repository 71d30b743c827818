//! API routes

use axum::Router;

use crate::AppState;

mod skills;

/// Build the versioned API router
pub fn api_router() -> Router<AppState> {
    Router::new().nest("/skills", skills::router())
}
