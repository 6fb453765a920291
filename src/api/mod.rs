/// HTTP API Layer
///
/// JSON endpoints the web front end calls. Handlers resolve query parameters,
/// take the shared service lock, and translate `WorkflowError` into status codes:
/// - User listing and lookup
/// - Role-filtered dashboard and project detail
/// - Stage status updates and manufacturer / maintenance assignments

use crate::error::WorkflowError;
use crate::workflow::WorkflowService;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

// User listing endpoints
pub mod users;

// Dashboard, project detail, stage updates and assignments
pub mod projects;

pub use projects::create_project_routes;
pub use users::create_user_routes;

/// Application state containing shared resources
///
/// One lock guards the whole service: reads share it, every mutation holds the
/// write guard until it finishes.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RwLock<WorkflowService>>,
}

impl AppState {
    pub fn new(service: WorkflowService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
        }
    }
}

/// `?user_id=` identifying the acting user
#[derive(Debug, Deserialize)]
pub struct ActingUser {
    pub user_id: u64,
}

/// `WorkflowError` rendered as `{ "error": ... }` with a matching status code
#[derive(Debug)]
pub struct ApiError(pub WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WorkflowError::UserNotFound(_) | WorkflowError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            WorkflowError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            WorkflowError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            WorkflowError::StageDefinitionNotFound(_) | WorkflowError::SequenceNotFound(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
