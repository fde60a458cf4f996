use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectId(pub Uuid);

impl Default for ProjectId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

/// A named, colored grouping for tasks. `color` is free-form (the UI offers
/// a palette but the store accepts any value). Projects carry no
/// `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl Project {
    pub fn new(input: CreateProject) -> Self {
        Self {
            id: ProjectId::default(),
            name: input.name,
            color: input.color,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, input: UpdateProject) {
        if let Some(n) = input.name { self.name = n; }
        if let Some(c) = input.color { self.color = c; }
    }
}
