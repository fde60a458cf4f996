use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};

use crate::application::board_service::BoardService;
use crate::domain::project::{CreateProject, Project, ProjectId, UpdateProject};
use crate::http::types::ApiError;

use super::AppState;

pub fn router<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/projects", post(create_project::<S>).get(list_projects::<S>))
        .route("/api/projects/:id", put(update_project::<S>).delete(delete_project::<S>))
        .with_state(state)
}

async fn list_projects<S: BoardService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state.service.list_projects().await.map_err(ApiError::internal)?;
    Ok(Json(projects))
}

async fn create_project<S: BoardService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state.service.create_project(payload).await.map_err(ApiError::internal)?;
    tracing::info!(id = %project.id.0, name = %project.name, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project<S: BoardService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProject>,
) -> Result<Json<Project>, ApiError> {
    let id = ProjectId(super::parse_id(&id)?);
    let updated = state.service.update_project(id, payload).await.map_err(ApiError::internal)?;
    match updated {
        Some(project) => Ok(Json(project)),
        None => Err(ApiError::not_found("project")),
    }
}

/// 204 always; clearing `projectId` on referencing tasks happens inside the
/// store as part of the same delete.
async fn delete_project<S: BoardService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ProjectId(super::parse_id(&id)?);
    state.service.delete_project(id).await.map_err(ApiError::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
