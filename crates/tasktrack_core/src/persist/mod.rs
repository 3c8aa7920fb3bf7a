//! Persistence gateway over an opaque key-value blob store.
//!
//! # Responsibility
//! - Snapshot the full store state under one named key.
//! - Export/import the human-readable `{ tasks, projects, tags }` document.
//!
//! # Invariants
//! - Writes replace the whole record; there is no partial merge.
//! - A failed import never touches the persisted record.
//! - Records newer than `CURRENT_SCHEMA_VERSION` are rejected, not masked.

mod gateway;
mod memory;
mod snapshot;
mod sqlite;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use gateway::{ImportSummary, PersistenceGateway, DEFAULT_STORAGE_KEY};
pub use memory::MemoryBlobStore;
pub use snapshot::{ExportDocument, StoreState, CURRENT_SCHEMA_VERSION};
pub use sqlite::SqliteBlobStore;

pub type PersistResult<T> = Result<T, PersistError>;

/// Synchronous key-value blob store consumed by the gateway.
pub trait BlobStore {
    fn get(&self, key: &str) -> PersistResult<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> PersistResult<()>;
}

#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    /// Blob backend is not usable (for example a missing table).
    Backend(String),
    Encode(serde_json::Error),
    /// Persisted record exists but cannot be decoded.
    Corrupt(String),
    UnsupportedVersion {
        found: u32,
        latest_supported: u32,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "blob store unavailable: {message}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
            Self::Corrupt(message) => write!(f, "persisted state is corrupt: {message}"),
            Self::UnsupportedVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "persisted state version {found} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Backend(_) | Self::Corrupt(_) | Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Import failure surfaced to the user; prior state is preserved.
#[derive(Debug)]
pub enum ImportError {
    /// Payload does not parse or does not match the document shape.
    InvalidFormat(String),
    Persist(PersistError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(message) => write!(f, "invalid backup file: {message}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFormat(_) => None,
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<PersistError> for ImportError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}
