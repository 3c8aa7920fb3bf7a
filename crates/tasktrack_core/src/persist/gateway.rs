//! Snapshot/load/import/export entry points over a `BlobStore`.

use super::snapshot::{decode_record, encode_record, ExportDocument, StoreState};
use super::{BlobStore, ImportError, PersistError, PersistResult};
use log::{debug, error, info, warn};

/// Storage slot used when the caller does not pick one.
pub const DEFAULT_STORAGE_KEY: &str = "task-tracker-storage";

/// Counts of records written by a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks: usize,
    pub projects: usize,
    pub tags: usize,
}

pub struct PersistenceGateway<B: BlobStore> {
    blob: B,
    key: String,
}

impl<B: BlobStore> PersistenceGateway<B> {
    /// Creates a gateway writing under `DEFAULT_STORAGE_KEY`.
    pub fn new(blob: B) -> Self {
        Self::with_key(blob, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    pub fn into_inner(self) -> B {
        self.blob
    }

    /// Raw persisted bytes, if any.
    pub fn raw(&self) -> PersistResult<Option<Vec<u8>>> {
        self.blob.get(&self.key)
    }

    /// Loads the persisted state; `None` when nothing was saved yet.
    pub fn load(&self) -> PersistResult<Option<StoreState>> {
        let Some(bytes) = self.blob.get(&self.key)? else {
            debug!("event=state_load module=persist status=ok found=false");
            return Ok(None);
        };
        match decode_record(&bytes) {
            Ok(state) => {
                info!(
                    "event=state_load module=persist status=ok found=true tasks={} projects={} tags={}",
                    state.tasks.len(),
                    state.projects.len(),
                    state.tags.len()
                );
                Ok(Some(state))
            }
            Err(err) => {
                error!("event=state_load module=persist status=error error={err}");
                Err(err)
            }
        }
    }

    /// Replaces the persisted record with `state`.
    pub fn save(&mut self, state: &StoreState) -> PersistResult<()> {
        let bytes = encode_record(state)?;
        self.blob.set(&self.key, &bytes)?;
        debug!(
            "event=state_save module=persist status=ok bytes={}",
            bytes.len()
        );
        Ok(())
    }

    /// Renders `{ tasks, projects, tags }` as pretty-printed JSON.
    pub fn export_document(state: &StoreState) -> PersistResult<String> {
        serde_json::to_string_pretty(&ExportDocument::from_state(state)).map_err(PersistError::Encode)
    }

    /// Parses a backup document and wholesale-replaces the persisted record.
    ///
    /// Filters and sort option are reset to defaults. The caller must reload
    /// its in-memory state afterwards.
    ///
    /// # Errors
    /// - `ImportError::InvalidFormat` when parsing or validation fails; the
    ///   persisted record is left untouched.
    pub fn import_document(&mut self, payload: &str) -> Result<ImportSummary, ImportError> {
        let document = parse_document(payload).map_err(|message| {
            warn!("event=data_import module=persist status=error error_code=invalid_format");
            ImportError::InvalidFormat(message)
        })?;

        let summary = ImportSummary {
            tasks: document.tasks.len(),
            projects: document.projects.len(),
            tags: document.tags.len(),
        };
        self.save(&document.into_state())?;
        info!(
            "event=data_import module=persist status=ok tasks={} projects={} tags={}",
            summary.tasks, summary.projects, summary.tags
        );
        Ok(summary)
    }
}

fn parse_document(payload: &str) -> Result<ExportDocument, String> {
    let document: ExportDocument =
        serde_json::from_str(payload).map_err(|err| err.to_string())?;
    document.validate()?;
    Ok(document)
}
