/// Project endpoints: dashboard, detail, stage updates and assignments
///
/// Every route takes `?user_id=` for the acting user. Denials come back as 403
/// with the reason; the front end decides where to send the user next.

use crate::api::{ActingUser, ApiError, AppState};
use crate::project::Project;
use crate::stage::{ProjectType, StageStatus};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Dashboard row for one project
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub project_type: ProjectType,
    pub customer_id: u64,
    pub manufacturer_id: Option<u64>,
    pub maintenance_provider_id: Option<u64>,
    /// Name of the first incomplete stage, None once everything is done
    pub current_stage: Option<String>,
    pub progress_percentage: f64,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            project_type: project.project_type,
            customer_id: project.customer_id,
            manufacturer_id: project.manufacturer_id,
            maintenance_provider_id: project.maintenance_provider_id,
            current_stage: project.current_stage().map(|s| s.definition.name.clone()),
            progress_percentage: project.progress_percentage(),
        }
    }
}

/// Full project detail with derived progress
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub current_stage_index: Option<usize>,
    pub progress_percentage: f64,
    pub today: NaiveDate,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            project: project.clone(),
            current_stage_index: project.current_stage_index(),
            progress_percentage: project.progress_percentage(),
            today: Local::now().date_naive(),
        }
    }
}

/// Request body for a stage status change
#[derive(Debug, Deserialize)]
pub struct StageUpdateRequest {
    /// One of not_started, in_progress, completed, on_hold
    pub status: String,
    pub note: Option<String>,
}

/// Response for a stage status change
#[derive(Debug, Serialize)]
pub struct StageUpdateResponse {
    /// False when the stage index was out of range and nothing changed
    pub updated: bool,
    pub project: ProjectView,
}

#[derive(Debug, Deserialize)]
pub struct AssignManufacturerRequest {
    pub manufacturer_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct AssignMaintenanceRequest {
    pub provider_id: u64,
}

/// Create project routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/projects/{id}", get(view_project))
        .route("/api/projects/{id}/stages/{index}", post(update_stage_status))
        .route("/api/projects/{id}/manufacturer", post(assign_manufacturer))
        .route("/api/projects/{id}/maintenance", post(assign_maintenance_provider))
}

/// Projects visible to the acting user
///
/// GET /api/dashboard?user_id=2
async fn dashboard(
    State(state): State<AppState>,
    Query(acting): Query<ActingUser>,
) -> Result<Json<Vec<ProjectSummary>>, ApiError> {
    let service = state.service.read().await;
    let projects = service.dashboard(acting.user_id)?;
    Ok(Json(projects.into_iter().map(ProjectSummary::from).collect()))
}

/// Project detail
///
/// GET /api/projects/{id}?user_id=2
async fn view_project(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
    Query(acting): Query<ActingUser>,
) -> Result<Json<ProjectView>, ApiError> {
    let service = state.service.read().await;
    let project = service.view_project(acting.user_id, project_id)?;
    Ok(Json(ProjectView::from(project)))
}

/// Change one stage's status
///
/// POST /api/projects/{id}/stages/{index}?user_id=3
/// Body: { "status": "completed", "note": "done" }
async fn update_stage_status(
    State(state): State<AppState>,
    Path((project_id, stage_index)): Path<(u64, i64)>,
    Query(acting): Query<ActingUser>,
    Json(payload): Json<StageUpdateRequest>,
) -> Result<Json<StageUpdateResponse>, ApiError> {
    let status: StageStatus = payload.status.parse()?;

    let mut service = state.service.write().await;
    let updated = service.update_stage_status(
        acting.user_id,
        project_id,
        stage_index,
        status,
        payload.note.as_deref(),
    )?;
    let project = service.view_project(acting.user_id, project_id)?;

    Ok(Json(StageUpdateResponse {
        updated,
        project: ProjectView::from(project),
    }))
}

/// Assign a manufacturer (admins only)
///
/// POST /api/projects/{id}/manufacturer?user_id=1
/// Body: { "manufacturer_id": 3 }
async fn assign_manufacturer(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
    Query(acting): Query<ActingUser>,
    Json(payload): Json<AssignManufacturerRequest>,
) -> Result<Json<Option<ProjectSummary>>, ApiError> {
    let mut service = state.service.write().await;
    service.assign_manufacturer(acting.user_id, project_id, payload.manufacturer_id)?;
    Ok(Json(service.project(project_id).map(ProjectSummary::from)))
}

/// Assign a maintenance provider (admins only)
///
/// POST /api/projects/{id}/maintenance?user_id=1
/// Body: { "provider_id": 4 }
async fn assign_maintenance_provider(
    State(state): State<AppState>,
    Path(project_id): Path<u64>,
    Query(acting): Query<ActingUser>,
    Json(payload): Json<AssignMaintenanceRequest>,
) -> Result<Json<Option<ProjectSummary>>, ApiError> {
    let mut service = state.service.write().await;
    service.assign_maintenance_provider(acting.user_id, project_id, payload.provider_id)?;
    Ok(Json(service.project(project_id).map(ProjectSummary::from)))
}
