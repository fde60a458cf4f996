pub mod projects;
pub mod tasks;

use axum::{routing::get, Router};
use uuid::Uuid;

use crate::application::board_service::BoardService;
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: BoardService> {
    pub service: S,
}

pub fn app<S: BoardService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(tasks::router(state.clone()))
        .merge(projects::router(state))
}

fn parse_id(s: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(s).map_err(|_| ApiError::bad_request("invalid id"))
}
