use axum::body::to_bytes;
use axum::Router;
use serde_json::json;
use taskvista::application::board_service::BoardServiceImpl;
use taskvista::http::routing::{self, AppState};
use taskvista::infrastructure::memory_repo::MemoryBoardRepository;

fn app() -> Router {
    let service = BoardServiceImpl::new(MemoryBoardRepository::new());
    routing::app(AppState { service })
}

#[tokio::test]
async fn acceptance_task_crud_lifecycle() {
    let app = app();

    // create
    let payload = json!({ "title": "Write docs", "description": "First pass", "priority": "high" });
    let res = request(&app, "POST", "/api/tasks", Some(payload)).await;
    assert_eq!(res.status(), 201);
    let task = body_json(res).await;
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["dueDate"], serde_json::Value::Null);
    assert_eq!(task["createdAt"], task["updatedAt"]);

    // list
    let res = request(&app, "GET", "/api/tasks", None).await;
    assert_eq!(res.status(), 200);
    let listed = body_json(res).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // update
    let res = request(&app, "PUT", &format!("/api/tasks/{id}"), Some(json!({ "status": "completed" }))).await;
    assert_eq!(res.status(), 200);
    let updated = body_json(res).await;
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["title"], "Write docs");
    assert_eq!(updated["createdAt"], task["createdAt"]);

    // delete
    let res = request(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(res.status(), 204);

    // deleted record is gone from the snapshot
    let res = request(&app, "GET", "/api/tasks", None).await;
    let listed = body_json(res).await;
    assert!(listed.as_array().unwrap().is_empty());

    // delete again: still 204, idempotent
    let res = request(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(res.status(), 204);
}

#[tokio::test]
async fn acceptance_update_missing_task_is_404() {
    let app = app();
    let res = request(
        &app,
        "PUT",
        "/api/tasks/00000000-0000-0000-0000-000000000000",
        Some(json!({ "title": "nobody home" })),
    )
    .await;
    assert_eq!(res.status(), 404);
    let body = body_json(res).await;
    assert_eq!(body["message"], "task not found");
}

#[tokio::test]
async fn acceptance_malformed_input_is_400() {
    let app = app();

    let res = request(&app, "PUT", "/api/tasks/not-a-uuid", Some(json!({}))).await;
    assert_eq!(res.status(), 400);

    // Enum values are enforced at the boundary.
    let res = request(&app, "POST", "/api/tasks", Some(json!({ "title": "x", "priority": "whenever" }))).await;
    assert_eq!(res.status(), 422);
}

#[tokio::test]
async fn acceptance_project_delete_cascades_to_tasks() {
    let app = app();

    let res = request(&app, "POST", "/api/projects", Some(json!({ "name": "Launch", "color": "#10b981" }))).await;
    assert_eq!(res.status(), 201);
    let project = body_json(res).await;
    let project_id = project["id"].as_str().unwrap().to_string();

    let res = request(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Write spec", "projectId": project_id, "priority": "high", "status": "todo" })),
    )
    .await;
    assert_eq!(res.status(), 201);
    let task = body_json(res).await;
    assert_eq!(task["projectId"].as_str().unwrap(), project_id);

    let res = request(&app, "DELETE", &format!("/api/projects/{project_id}"), None).await;
    assert_eq!(res.status(), 204);

    let res = request(&app, "GET", "/api/projects", None).await;
    assert!(body_json(res).await.as_array().unwrap().is_empty());

    // The task survives with its project link cleared and the rest intact.
    let res = request(&app, "GET", "/api/tasks", None).await;
    let tasks = body_json(res).await;
    let survivor = &tasks.as_array().unwrap()[0];
    assert_eq!(survivor["projectId"], serde_json::Value::Null);
    assert_eq!(survivor["title"], "Write spec");
    assert_eq!(survivor["priority"], "high");
    assert_eq!(survivor["status"], "todo");
    assert_eq!(survivor["updatedAt"], task["updatedAt"]);
}

#[tokio::test]
async fn acceptance_project_update_and_missing_project_404() {
    let app = app();

    let res = request(&app, "POST", "/api/projects", Some(json!({ "name": "Ops", "color": "#3b82f6" }))).await;
    let project = body_json(res).await;
    let id = project["id"].as_str().unwrap().to_string();

    let res = request(&app, "PUT", &format!("/api/projects/{id}"), Some(json!({ "color": "#ef4444" }))).await;
    assert_eq!(res.status(), 200);
    let updated = body_json(res).await;
    assert_eq!(updated["name"], "Ops");
    assert_eq!(updated["color"], "#ef4444");
    assert_eq!(updated["createdAt"], project["createdAt"]);

    let res = request(
        &app,
        "PUT",
        "/api/projects/00000000-0000-0000-0000-000000000000",
        Some(json!({ "name": "ghost" })),
    )
    .await;
    assert_eq!(res.status(), 404);
}

async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> serde_json::Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}
