use crate::domain::project::{CreateProject, Project, ProjectId, UpdateProject};
use crate::domain::repository::BoardRepository;
use crate::domain::task::{CreateTask, Task, TaskId, UpdateTask};
use anyhow::Result;
use async_trait::async_trait;

/// Application seam between presentation code and the board store. Handlers
/// and the terminal client receive a service; they never touch a store
/// directly.
#[async_trait]
pub trait BoardService: Send + Sync + 'static {
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, input: CreateTask) -> Result<Task>;
    async fn update_task(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>>;
    async fn delete_task(&self, id: TaskId) -> Result<bool>;

    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, input: CreateProject) -> Result<Project>;
    async fn update_project(&self, id: ProjectId, input: UpdateProject) -> Result<Option<Project>>;
    async fn delete_project(&self, id: ProjectId) -> Result<bool>;
}

#[derive(Clone)]
pub struct BoardServiceImpl<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: BoardRepository> BoardService for BoardServiceImpl<R> {
    async fn list_tasks(&self) -> Result<Vec<Task>> { self.repo.list_tasks().await }
    async fn create_task(&self, input: CreateTask) -> Result<Task> { self.repo.create_task(input).await }
    async fn update_task(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> { self.repo.update_task(id, input).await }
    async fn delete_task(&self, id: TaskId) -> Result<bool> { self.repo.delete_task(id).await }

    async fn list_projects(&self) -> Result<Vec<Project>> { self.repo.list_projects().await }
    async fn create_project(&self, input: CreateProject) -> Result<Project> { self.repo.create_project(input).await }
    async fn update_project(&self, id: ProjectId, input: UpdateProject) -> Result<Option<Project>> { self.repo.update_project(id, input).await }
    async fn delete_project(&self, id: ProjectId) -> Result<bool> { self.repo.delete_project(id).await }
}
