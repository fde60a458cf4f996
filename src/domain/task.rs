use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskId(pub Uuid);

impl Default for TaskId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

/// Ordered by urgency: `Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Ordered for display: `Todo < InProgress < Completed`. Any status may
/// follow any other; there is no transition graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
    pub project_id: Option<super::project::ProjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub project_id: Option<super::project::ProjectId>,
}

/// Shallow-merge patch. `due_date` and `project_id` are double-optional so a
/// JSON `null` clears the field while an absent field leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    #[serde(deserialize_with = "nullable")]
    pub project_id: Option<Option<super::project::ProjectId>>,
}

/// Wraps a present field (including an explicit `null`) in `Some`, so that a
/// missing field stays distinguishable from a clearing `null`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl Task {
    /// Builds a fresh record: generated id, both timestamps set to now.
    pub fn new(input: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::default(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            priority: input.priority,
            status: input.status,
            project_id: input.project_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges supplied fields over the record. `id` and `created_at` are
    /// never overwritten; `updated_at` is refreshed on every call, including
    /// status-only toggles.
    pub fn apply(&mut self, input: UpdateTask) {
        if let Some(t) = input.title { self.title = t; }
        if let Some(d) = input.description { self.description = d; }
        if let Some(d) = input.due_date { self.due_date = d; }
        if let Some(p) = input.priority { self.priority = p; }
        if let Some(s) = input.status { self.status = s; }
        if let Some(p) = input.project_id { self.project_id = p; }
        self.updated_at = Utc::now();
    }
}
