//! Wire shapes for the persisted record and the export document.

use super::{PersistError, PersistResult};
use crate::model::project::Project;
use crate::model::tag::Tag;
use crate::model::task::Task;
use crate::query::filter::TaskFilter;
use crate::query::sort::SortOption;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Schema version written alongside every persisted state.
///
/// Version `0` is the legacy import shape without filters or sort option.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Full in-memory state owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub filters: TaskFilter,
    #[serde(default)]
    pub sort_option: SortOption,
}

/// Version-tagged envelope as read back, before the state is decoded.
#[derive(Deserialize)]
struct RawRecord {
    version: u32,
    state: serde_json::Value,
}

/// Human-readable backup document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
}

impl ExportDocument {
    pub fn from_state(state: &StoreState) -> Self {
        Self {
            tasks: state.tasks.clone(),
            projects: state.projects.clone(),
            tags: state.tags.clone(),
        }
    }

    /// Converts into a fresh store state with default filters and sort.
    pub fn into_state(self) -> StoreState {
        StoreState {
            tasks: self.tasks,
            projects: self.projects,
            tags: self.tags,
            ..StoreState::default()
        }
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        ensure_unique("task", self.tasks.iter().map(|task| task.id.as_str()))?;
        ensure_unique("project", self.projects.iter().map(|p| p.id.as_str()))?;
        ensure_unique("tag", self.tags.iter().map(|tag| tag.id.as_str()))?;

        for task in &self.tasks {
            task.validate()
                .map_err(|err| format!("task `{}`: {err}", task.id))?;
            if task.is_completed() != task.completed_at.is_some() {
                return Err(format!(
                    "task `{}`: completedAt must be set exactly when status is completed",
                    task.id
                ));
            }
        }
        for project in &self.projects {
            project
                .validate()
                .map_err(|err| format!("project `{}`: {err}", project.id))?;
        }
        for tag in &self.tags {
            tag.validate()
                .map_err(|err| format!("tag `{}`: {err}", tag.id))?;
        }
        Ok(())
    }
}

pub(crate) fn encode_record(state: &StoreState) -> PersistResult<Vec<u8>> {
    #[derive(Serialize)]
    struct RecordRef<'a> {
        version: u32,
        state: &'a StoreState,
    }

    serde_json::to_vec(&RecordRef {
        version: CURRENT_SCHEMA_VERSION,
        state,
    })
    .map_err(PersistError::Encode)
}

pub(crate) fn decode_record(bytes: &[u8]) -> PersistResult<StoreState> {
    let raw: RawRecord =
        serde_json::from_slice(bytes).map_err(|err| PersistError::Corrupt(err.to_string()))?;
    if raw.version > CURRENT_SCHEMA_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: raw.version,
            latest_supported: CURRENT_SCHEMA_VERSION,
        });
    }
    serde_json::from_value(raw.state).map_err(|err| PersistError::Corrupt(err.to_string()))
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(format!("duplicate {kind} id `{id}`"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_record, encode_record, StoreState, CURRENT_SCHEMA_VERSION};
    use crate::persist::PersistError;
    use crate::query::sort::SortOption;

    #[test]
    fn encoded_record_carries_schema_version() {
        let bytes = encode_record(&StoreState::default()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(json["state"]["sortOption"]["field"], "dueDate");
        assert_eq!(json["state"]["sortOption"]["direction"], "asc");
    }

    #[test]
    fn legacy_version_zero_fills_defaults() {
        let legacy = br#"{"version":0,"state":{"tasks":[],"projects":[],"tags":[]}}"#;
        let state = decode_record(legacy).unwrap();
        assert!(state.tasks.is_empty());
        assert_eq!(state.sort_option, SortOption::default());
    }

    #[test]
    fn newer_version_is_rejected() {
        let future = br#"{"version":99,"state":{}}"#;
        let err = decode_record(future).unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion { found: 99, .. }
        ));
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let err = decode_record(b"not json").unwrap_err();
        assert!(matches!(err, PersistError::Corrupt(_)));
    }
}
