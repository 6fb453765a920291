/// User listing endpoints
///
/// Backs the landing page, where a visitor picks which demo user to act as.

use crate::access::User;
use crate::api::{ApiError, AppState};
use crate::error::WorkflowError;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

/// Create user routes
pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
}

/// List all users
///
/// GET /api/users
async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let service = state.service.read().await;
    Json(service.users().into_iter().cloned().collect())
}

/// Get a single user
///
/// GET /api/users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    let service = state.service.read().await;
    service
        .user(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| WorkflowError::UserNotFound(id).into())
}
