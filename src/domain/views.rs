//! Pure view computations over a board snapshot: filtering, sorting and the
//! dashboard statistics. Nothing here mutates the store; every function is a
//! deterministic function of (tasks, projects, current date).

use chrono::NaiveDate;

use super::project::ProjectId;
use super::task::{Priority, Status, Task};

/// Project dimension of a task filter, as explicit variants rather than
/// `"all"` / `"none"` sentinel strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    Any,
    /// Only tasks with no project link.
    Unassigned,
    Project(ProjectId),
}

/// Conjunction of per-field predicates; `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub project: ProjectFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(search) = &self.search {
            if !task.title.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        match &self.project {
            ProjectFilter::Any => true,
            ProjectFilter::Unassigned => task.project_id.is_none(),
            ProjectFilter::Project(id) => task.project_id.as_ref() == Some(id),
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Status,
    CreatedAt,
}

/// Stable in-place sort. Due date ascending with undated tasks last;
/// priority descending (urgent first); status ascending through
/// todo -> in-progress -> completed; creation time descending (newest first).
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::DueDate => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortKey::Status => tasks.sort_by(|a, b| a.status.cmp(&b.status)),
        SortKey::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Per-status totals for the dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            Status::Todo => counts.todo += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Completed => counts.completed += 1,
        }
    }
    counts
}

/// round(completed / total * 100), 0 for an empty list.
pub fn completion_rate(tasks: &[Task]) -> u32 {
    percentage(
        tasks.iter().filter(|t| t.status == Status::Completed).count(),
        tasks.len(),
    )
}

/// Completion percentage within one project, 0 when the project has no tasks.
pub fn project_progress(tasks: &[Task], project: &ProjectId) -> u32 {
    let in_project: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.project_id.as_ref() == Some(project))
        .collect();
    percentage(
        in_project.iter().filter(|t| t.status == Status::Completed).count(),
        in_project.len(),
    )
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Tasks due on the given calendar day and not yet completed.
pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_date == Some(today) && t.status != Status::Completed)
        .collect()
}

/// Urgent-priority tasks that are not completed.
pub fn urgent_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.priority == Priority::Urgent && t.status != Status::Completed)
        .collect()
}

/// Newest tasks first by creation time, truncated to `limit`.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut all: Vec<&Task> = tasks.iter().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all.truncate(limit);
    all
}
