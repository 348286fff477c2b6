pub mod json_backend;
pub mod memory;
pub mod snapshot;

use std::sync::Arc;

use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over durable key-value stores holding raw text values.
///
/// `load` never fails: a missing key and unreadable content both come back as `None`, the
/// latter logged by the backend.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot::{load_state, save_state, LoadReport, PersistedSnapshot};
