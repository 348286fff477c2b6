use std::{collections::BTreeMap, sync::Mutex};

use super::{KeyValueStore, Result};
use crate::errors::StorageError;

/// Volatile store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.values
            .lock()
            .map(|values| values.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut values) = self.values.lock() {
            values.clear();
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_overwrites_values() {
        let store = MemoryStore::new();
        assert_eq!(store.load("balance"), None);
        store.save("balance", "10").unwrap();
        store.save("balance", "12.5").unwrap();
        assert_eq!(store.load("balance").as_deref(), Some("12.5"));
        assert_eq!(store.keys(), vec!["balance".to_string()]);
        store.clear();
        assert!(store.keys().is_empty());
    }
}
