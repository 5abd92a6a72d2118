//! Storage port. Collections are kept as whole JSON documents under a
//! string key, and every mutation rewrites the full document.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::StoreError;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const EMPLOYEES_KEY: &str = "employees";
pub const ATTENDANCE_KEY: &str = "attendance";
pub const SESSION_KEY: &str = "session";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Outcome of reading a collection at start-up.
#[derive(Debug, PartialEq)]
pub enum Loaded<T> {
    /// The key has never been written.
    Missing,
    Found(Vec<T>),
    /// The document could not be read or decoded. It is left untouched and
    /// must not be overwritten by this process.
    Failed,
}

impl<T> Loaded<T> {
    /// Whether the collection may be written back.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found(items) => items,
            Self::Missing | Self::Failed => Vec::new(),
        }
    }
}

/// Reads a collection. Failures are logged; the caller starts empty and
/// stops persisting so the stored document survives for manual repair.
pub fn load_collection<T>(store: &dyn Storage, key: &str) -> Loaded<T>
where
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Loaded::Missing,
        Err(e) => {
            error!(error = %e, key, "Failed to read collection, persistence disabled");
            return Loaded::Failed;
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!(key, count = items.len(), "Collection loaded");
            Loaded::Found(items)
        }
        Err(e) => {
            error!(error = %e, key, "Corrupt collection, persistence disabled");
            Loaded::Failed
        }
    }
}

/// Rewrites a whole collection. Failures are logged and otherwise dropped,
/// the in-memory state stays authoritative.
pub fn persist_collection<T>(store: &dyn Storage, key: &str, items: &[T])
where
    T: Serialize,
{
    let payload = match serde_json::to_string(items) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, key, "Failed to serialize collection");
            return;
        }
    };

    if let Err(e) = store.set(key, &payload) {
        error!(error = %e, key, "Failed to persist collection");
    }
}
