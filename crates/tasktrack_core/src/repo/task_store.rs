//! In-memory task/project/tag store that saves every mutation before applying it.
//!
//! # Invariants
//! - Ids are unique within their collection for the store lifetime.
//! - Deleting a project clears `project_id` on every referencing task.
//! - Deleting a tag removes its id from every task's tag set.
//! - Mutations are atomic: memory changes only after the candidate state
//!   is saved, so validation or save failures leave it untouched.

use crate::clock::Clock;
use crate::ids::IdGenerator;
use crate::model::project::{NewProject, Project, ProjectId, ProjectUpdate};
use crate::model::tag::{NewTag, Tag, TagId, TagUpdate};
use crate::model::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::model::validation::ValidationError;
use crate::persist::{
    BlobStore, ImportError, ImportSummary, PersistError, PersistenceGateway, StoreState,
};
use crate::query::filter::{TaskFilter, TaskFilterUpdate};
use crate::query::query_tasks;
use crate::query::sort::SortOption;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_ID_ATTEMPTS: usize = 8;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Project,
    Tag,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Tag => "tag",
        })
    }
}

#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound { kind: EntityKind, id: String },
    /// The id generator kept returning ids already in use.
    IdCollision(EntityKind),
    Persist(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::IdCollision(kind) => write!(f, "could not allocate a unique {kind} id"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::NotFound { .. } | Self::IdCollision(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// A task with its references resolved against live projects and tags.
///
/// Stale references are dropped rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView<'a> {
    pub task: &'a Task,
    pub project: Option<&'a Project>,
    pub tags: Vec<&'a Tag>,
}

pub struct TaskStore<B: BlobStore> {
    gateway: PersistenceGateway<B>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    state: StoreState,
}

impl<B: BlobStore> TaskStore<B> {
    /// Loads persisted state (or starts empty) and returns a ready store.
    ///
    /// # Errors
    /// - Returns `StoreError::Persist` when the persisted record is corrupt
    ///   or written by a newer schema version.
    pub fn init(
        gateway: PersistenceGateway<B>,
        ids: impl IdGenerator + 'static,
        clock: impl Clock + 'static,
    ) -> StoreResult<Self> {
        let state = gateway.load()?.unwrap_or_default();
        info!(
            "event=store_init module=store status=ok tasks={} projects={} tags={}",
            state.tasks.len(),
            state.projects.len(),
            state.tags.len()
        );
        Ok(Self {
            gateway,
            ids: Box::new(ids),
            clock: Box::new(clock),
            state,
        })
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        &self.gateway
    }

    pub fn into_gateway(self) -> PersistenceGateway<B> {
        self.gateway
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn tags(&self) -> &[Tag] {
        &self.state.tags
    }

    pub fn filters(&self) -> &TaskFilter {
        &self.state.filters
    }

    pub fn sort_option(&self) -> SortOption {
        self.state.sort_option
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.state.tasks.iter().find(|task| task.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.state.projects.iter().find(|project| project.id == id)
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.state.tags.iter().find(|tag| tag.id == id)
    }

    // ---- tasks ----

    /// Adds a pending task and returns its new id.
    pub fn add_task(&mut self, data: NewTask) -> StoreResult<TaskId> {
        data.validate()?;
        let id = self.allocate_id(EntityKind::Task)?;
        let mut next = self.state.clone();
        next.tasks
            .push(Task::from_new(id.clone(), data, self.clock.now_ms()));

        self.commit(next)?;
        info!("event=task_add module=store status=ok task_id={id}");
        Ok(id)
    }

    /// Merges supplied fields into the task.
    ///
    /// Status changes keep `completed_at` consistent: entering `Completed`
    /// stamps it, leaving `Completed` clears it.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> StoreResult<()> {
        let now = self.clock.now_ms();
        let index = self.task_index(id)?;
        let mut next = self.state.clone();
        let task = &mut next.tasks[index];
        task.apply(update, now);
        task.validate()?;

        self.commit(next)?;
        info!("event=task_update module=store status=ok task_id={id}");
        Ok(())
    }

    /// Removes a task. No other entity is affected.
    pub fn delete_task(&mut self, id: &str) -> StoreResult<()> {
        let index = self.task_index(id)?;
        let mut next = self.state.clone();
        next.tasks.remove(index);

        self.commit(next)?;
        info!("event=task_delete module=store status=ok task_id={id}");
        Ok(())
    }

    /// Marks a task completed with `completed_at = now`.
    pub fn complete_task(&mut self, id: &str) -> StoreResult<()> {
        let now = self.clock.now_ms();
        let index = self.task_index(id)?;
        let mut next = self.state.clone();
        next.tasks[index].complete(now);

        self.commit(next)?;
        info!("event=task_complete module=store status=ok task_id={id}");
        Ok(())
    }

    // ---- projects ----

    pub fn add_project(&mut self, data: NewProject) -> StoreResult<ProjectId> {
        data.validate()?;
        let id = self.allocate_id(EntityKind::Project)?;
        let mut next = self.state.clone();
        next.projects
            .push(Project::from_new(id.clone(), data, self.clock.now_ms()));

        self.commit(next)?;
        info!("event=project_add module=store status=ok project_id={id}");
        Ok(id)
    }

    pub fn update_project(&mut self, id: &str, update: ProjectUpdate) -> StoreResult<()> {
        let index = self.project_index(id)?;
        let mut next = self.state.clone();
        let project = &mut next.projects[index];
        project.apply(update);
        project.validate()?;

        self.commit(next)?;
        info!("event=project_update module=store status=ok project_id={id}");
        Ok(())
    }

    /// Removes a project and detaches every task that referenced it.
    pub fn delete_project(&mut self, id: &str) -> StoreResult<()> {
        let index = self.project_index(id)?;
        let mut next = self.state.clone();
        next.projects.remove(index);

        let mut detached = 0usize;
        for task in &mut next.tasks {
            if task.project_id.as_deref() == Some(id) {
                task.project_id = None;
                detached += 1;
            }
        }
        if next.filters.project_id.as_deref() == Some(id) {
            next.filters.project_id = None;
        }

        self.commit(next)?;
        info!("event=project_delete module=store status=ok project_id={id} detached_tasks={detached}");
        Ok(())
    }

    // ---- tags ----

    pub fn add_tag(&mut self, data: NewTag) -> StoreResult<TagId> {
        data.validate()?;
        let id = self.allocate_id(EntityKind::Tag)?;
        let mut next = self.state.clone();
        next.tags.push(Tag::from_new(id.clone(), data));

        self.commit(next)?;
        info!("event=tag_add module=store status=ok tag_id={id}");
        Ok(id)
    }

    pub fn update_tag(&mut self, id: &str, update: TagUpdate) -> StoreResult<()> {
        let index = self.tag_index(id)?;
        let mut next = self.state.clone();
        let tag = &mut next.tags[index];
        tag.apply(update);
        tag.validate()?;

        self.commit(next)?;
        info!("event=tag_update module=store status=ok tag_id={id}");
        Ok(())
    }

    /// Removes a tag and strips its id from every task.
    pub fn delete_tag(&mut self, id: &str) -> StoreResult<()> {
        let index = self.tag_index(id)?;
        let mut next = self.state.clone();
        next.tags.remove(index);

        let mut untagged = 0usize;
        for task in &mut next.tasks {
            if task.tags.remove(id) {
                untagged += 1;
            }
        }
        next.filters.tags.remove(id);

        self.commit(next)?;
        info!("event=tag_delete module=store status=ok tag_id={id} untagged_tasks={untagged}");
        Ok(())
    }

    // ---- query state ----

    /// Shallow-merges supplied fields into the stored filters.
    pub fn set_filters(&mut self, update: TaskFilterUpdate) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.filters.merge(update);
        self.commit(next)
    }

    pub fn reset_filters(&mut self) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.filters = TaskFilter::default();
        self.commit(next)
    }

    pub fn set_sort_option(&mut self, option: SortOption) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.sort_option = option;
        self.commit(next)
    }

    /// Stored tasks filtered by the stored filters, then sorted.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        query_tasks(&self.state.tasks, &self.state.filters, self.state.sort_option)
    }

    /// Resolves a task's project and tags, skipping stale references.
    pub fn resolve_task<'a>(&'a self, task: &'a Task) -> TaskView<'a> {
        TaskView {
            task,
            project: task.project_id.as_deref().and_then(|id| self.project(id)),
            tags: task.tags.iter().filter_map(|id| self.tag(id)).collect(),
        }
    }

    // ---- backup ----

    /// Pretty-printed `{ tasks, projects, tags }` document.
    pub fn export_data(&self) -> StoreResult<String> {
        Ok(PersistenceGateway::<B>::export_document(&self.state)?)
    }

    /// Replaces all persisted data with `payload`, then reloads from it.
    ///
    /// # Errors
    /// - `ImportError::InvalidFormat` leaves memory and storage untouched.
    pub fn import_data(&mut self, payload: &str) -> Result<ImportSummary, ImportError> {
        let summary = self.gateway.import_document(payload)?;
        self.reload().map_err(|err| match err {
            StoreError::Persist(err) => ImportError::Persist(err),
            other => ImportError::InvalidFormat(other.to_string()),
        })?;
        Ok(summary)
    }

    /// Re-reads the persisted record into memory, discarding current state.
    pub fn reload(&mut self) -> StoreResult<()> {
        self.state = self.gateway.load()?.unwrap_or_default();
        info!(
            "event=store_reload module=store status=ok tasks={}",
            self.state.tasks.len()
        );
        Ok(())
    }

    // ---- internals ----

    /// Saves `next` and only then makes it the in-memory state.
    fn commit(&mut self, next: StoreState) -> StoreResult<()> {
        if let Err(err) = self.gateway.save(&next) {
            warn!("event=state_save module=store status=error error={err}");
            return Err(StoreError::Persist(err));
        }
        self.state = next;
        Ok(())
    }

    fn allocate_id(&mut self, kind: EntityKind) -> StoreResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            let taken = match kind {
                EntityKind::Task => self.task(&candidate).is_some(),
                EntityKind::Project => self.project(&candidate).is_some(),
                EntityKind::Tag => self.tag(&candidate).is_some(),
            };
            if !taken {
                return Ok(candidate);
            }
        }
        Err(StoreError::IdCollision(kind))
    }

    fn task_index(&self, id: &str) -> StoreResult<usize> {
        self.state
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| not_found(EntityKind::Task, id))
    }

    fn project_index(&self, id: &str) -> StoreResult<usize> {
        self.state
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| not_found(EntityKind::Project, id))
    }

    fn tag_index(&self, id: &str) -> StoreResult<usize> {
        self.state
            .tags
            .iter()
            .position(|tag| tag.id == id)
            .ok_or_else(|| not_found(EntityKind::Tag, id))
    }
}

fn not_found(kind: EntityKind, id: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
