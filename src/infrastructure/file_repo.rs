use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    project::{CreateProject, Project, ProjectId, UpdateProject},
    repository::BoardRepository,
    task::{CreateTask, Task, TaskId, UpdateTask},
};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    theme: Theme,
}

/// Client-side store: same contract as the server variant, but the whole
/// `{tasks, projects, theme}` snapshot is rewritten to one JSON file after
/// every mutation and rehydrated whole on open. The write happens before the
/// call returns; there is no batching and no versioning of the file format.
#[derive(Clone)]
pub struct FileBoardRepository {
    path: PathBuf,
    snapshot: Arc<Mutex<Snapshot>>,
}

impl FileBoardRepository {
    /// Opens the named storage slot, starting an empty board when the file
    /// does not exist yet. An unreadable or unparsable file is an error
    /// rather than a silent reset.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let snapshot = if path.exists() {
            serde_json::from_str(&std::fs::read_to_string(&path)?)?
        } else {
            Snapshot::default()
        };
        Ok(Self { path, snapshot: Arc::new(Mutex::new(snapshot)) })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn theme(&self) -> Theme {
        self.lock().theme
    }

    /// Flips light/dark and persists like any other mutation.
    pub fn toggle_theme(&self) -> Result<Theme, PersistError> {
        let mut snapshot = self.lock();
        snapshot.theme = snapshot.theme.toggled();
        let theme = snapshot.theme;
        Self::save(&self.path, &snapshot)?;
        Ok(theme)
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn save(path: &Path, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
        tracing::debug!(path = %path.display(), "snapshot written");
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for FileBoardRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.lock().tasks.clone())
    }

    async fn create_task(&self, input: CreateTask) -> Result<Task> {
        let task = Task::new(input);
        let mut snapshot = self.lock();
        snapshot.tasks.push(task.clone());
        Self::save(&self.path, &snapshot)?;
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, input: UpdateTask) -> Result<Option<Task>> {
        let mut snapshot = self.lock();
        let Some(task) = snapshot.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.apply(input);
        let task = task.clone();
        Self::save(&self.path, &snapshot)?;
        Ok(Some(task))
    }

    async fn delete_task(&self, id: TaskId) -> Result<bool> {
        let mut snapshot = self.lock();
        let before = snapshot.tasks.len();
        snapshot.tasks.retain(|t| t.id != id);
        let removed = snapshot.tasks.len() < before;
        if removed {
            Self::save(&self.path, &snapshot)?;
        }
        Ok(removed)
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.lock().projects.clone())
    }

    async fn create_project(&self, input: CreateProject) -> Result<Project> {
        let project = Project::new(input);
        let mut snapshot = self.lock();
        snapshot.projects.push(project.clone());
        Self::save(&self.path, &snapshot)?;
        Ok(project)
    }

    async fn update_project(&self, id: ProjectId, input: UpdateProject) -> Result<Option<Project>> {
        let mut snapshot = self.lock();
        let Some(project) = snapshot.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.apply(input);
        let project = project.clone();
        Self::save(&self.path, &snapshot)?;
        Ok(Some(project))
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool> {
        let mut snapshot = self.lock();
        let before = snapshot.projects.len();
        snapshot.projects.retain(|p| p.id != id);
        let removed = snapshot.projects.len() < before;
        for task in snapshot.tasks.iter_mut().filter(|t| t.project_id.as_ref() == Some(&id)) {
            task.project_id = None;
        }
        Self::save(&self.path, &snapshot)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::{Priority, Status};

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("taskvista-test-{}.json", uuid::Uuid::new_v4()))
    }

    fn sample_task(title: &str) -> CreateTask {
        CreateTask {
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: Priority::Medium,
            status: Status::Todo,
            project_id: None,
        }
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let path = scratch_path();
        let repo = FileBoardRepository::open(&path).unwrap();
        let created = repo.create_task(sample_task("persisted")).await.unwrap();
        repo.toggle_theme().unwrap();
        drop(repo);

        let reopened = FileBoardRepository::open(&path).unwrap();
        let tasks = reopened.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], created);
        assert_eq!(reopened.theme(), Theme::Dark);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let repo = FileBoardRepository::open(scratch_path()).unwrap();
        assert!(repo.list_tasks().await.unwrap().is_empty());
        assert!(repo.list_projects().await.unwrap().is_empty());
        assert_eq!(repo.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn project_delete_cascade_is_persisted() {
        let path = scratch_path();
        let repo = FileBoardRepository::open(&path).unwrap();
        let project = repo
            .create_project(CreateProject { name: "Launch".into(), color: "#10b981".into() })
            .await
            .unwrap();
        let mut input = sample_task("linked");
        input.project_id = Some(project.id.clone());
        repo.create_task(input).await.unwrap();

        assert!(repo.delete_project(project.id).await.unwrap());
        drop(repo);

        let reopened = FileBoardRepository::open(&path).unwrap();
        let tasks = reopened.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].project_id.is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_writes_nothing() {
        let path = scratch_path();
        let repo = FileBoardRepository::open(&path).unwrap();
        let updated = repo
            .update_task(TaskId::default(), UpdateTask { title: Some("ghost".into()), ..Default::default() })
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!path.exists());
    }
}
