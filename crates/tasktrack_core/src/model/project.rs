//! Project record: an optional named grouping for tasks.

use super::validation::{require_non_blank, ValidationError};
use super::Timestamp;
use serde::{Deserialize, Serialize};

/// Opaque project identifier.
pub type ProjectId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display color, usually a hex code. Not validated.
    pub color: String,
    pub created_at: Timestamp,
}

impl Project {
    pub fn from_new(id: ProjectId, data: NewProject, created_at: Timestamp) -> Self {
        Self {
            id,
            name: data.name,
            description: data.description,
            color: data.color,
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.name, ValidationError::EmptyProjectName)
    }

    pub fn apply(&mut self, update: ProjectUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.name, ValidationError::EmptyProjectName)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial project update; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}
