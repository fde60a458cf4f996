use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};

use crate::application::board_service::BoardService;
use crate::domain::task::{CreateTask, Task, TaskId, UpdateTask};
use crate::http::types::ApiError;

use super::AppState;

pub fn router<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/tasks", post(create_task::<S>).get(list_tasks::<S>))
        .route("/api/tasks/:id", put(update_task::<S>).delete(delete_task::<S>))
        .with_state(state)
}

async fn list_tasks<S: BoardService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.service.list_tasks().await.map_err(ApiError::internal)?;
    Ok(Json(tasks))
}

async fn create_task<S: BoardService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.service.create_task(payload).await.map_err(ApiError::internal)?;
    tracing::info!(id = %task.id.0, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task<S: BoardService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTask>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId(super::parse_id(&id)?);
    let updated = state.service.update_task(id, payload).await.map_err(ApiError::internal)?;
    match updated {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::not_found("task")),
    }
}

/// 204 whether or not the id existed; delete is idempotent.
async fn delete_task<S: BoardService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = TaskId(super::parse_id(&id)?);
    state.service.delete_task(id).await.map_err(ApiError::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
