use async_trait::async_trait;
use super::project::{CreateProject, Project, ProjectId, UpdateProject};
use super::task::{CreateTask, Task, TaskId, UpdateTask};

/// Contract shared by every board store. `update_*` returns `None` (and
/// changes nothing) when the id is absent; `delete_*` is idempotent and
/// reports whether a record was removed.
#[async_trait]
pub trait BoardRepository: Send + Sync + 'static {
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>>;
    async fn create_task(&self, input: CreateTask) -> anyhow::Result<Task>;
    async fn update_task(&self, id: TaskId, input: UpdateTask) -> anyhow::Result<Option<Task>>;
    async fn delete_task(&self, id: TaskId) -> anyhow::Result<bool>;

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>>;
    async fn create_project(&self, input: CreateProject) -> anyhow::Result<Project>;
    async fn update_project(&self, id: ProjectId, input: UpdateProject) -> anyhow::Result<Option<Project>>;
    /// Removes the project and clears `project_id` on every task that
    /// referenced it, as one atomic step.
    async fn delete_project(&self, id: ProjectId) -> anyhow::Result<bool>;
}
