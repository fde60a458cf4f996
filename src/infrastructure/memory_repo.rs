use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    project::{CreateProject, Project, ProjectId, UpdateProject},
    repository::BoardRepository,
    task::{CreateTask, Task, TaskId, UpdateTask},
};

#[derive(Debug, Default)]
struct Board {
    tasks: Vec<Task>,
    projects: Vec<Project>,
}

/// Volatile server-side store: two insertion-ordered collections behind one
/// mutex, lost on process exit. Each operation holds the lock for its full
/// duration, so the project-delete cascade is atomic with respect to other
/// calls; there are no transactions across operations and concurrent writers
/// race last-write-wins.
#[derive(Clone, Default)]
pub struct MemoryBoardRepository {
    board: Arc<Mutex<Board>>,
}

impl MemoryBoardRepository {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> std::sync::MutexGuard<'_, Board> {
        // A poisoned lock means a panic mid-mutation; propagating the inner
        // guard keeps the store usable for the remaining requests.
        self.board.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BoardRepository for MemoryBoardRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.lock().tasks.clone())
    }

    async fn create_task(&self, input: CreateTask) -> Result<Task> {
        let task = Task::new(input);
        self.lock().tasks.push(task.clone());
        tracing::debug!(id = %task.id.0, "task created");
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        let mut board = self.lock();
        let Some(task) = board.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.apply(input);
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: TaskId) -> Result<bool> {
        let mut board = self.lock();
        let before = board.tasks.len();
        board.tasks.retain(|t| t.id != id);
        Ok(board.tasks.len() < before)
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.lock().projects.clone())
    }

    async fn create_project(&self, input: CreateProject) -> Result<Project> {
        let project = Project::new(input);
        self.lock().projects.push(project.clone());
        tracing::debug!(id = %project.id.0, "project created");
        Ok(project)
    }

    async fn update_project(&self, id: ProjectId, input: UpdateProject) -> Result<Option<Project>> {
        let mut board = self.lock();
        let Some(project) = board.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.apply(input);
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool> {
        let mut board = self.lock();
        let before = board.projects.len();
        board.projects.retain(|p| p.id != id);
        let removed = board.projects.len() < before;
        // Cascade under the same lock acquisition: no task may keep a
        // dangling project reference. Other task fields stay untouched.
        for task in board.tasks.iter_mut().filter(|t| t.project_id.as_ref() == Some(&id)) {
            task.project_id = None;
        }
        Ok(removed)
    }
}
