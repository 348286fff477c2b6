use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use super::{KeyValueStore, Result};
use crate::utils::persistence::write_atomic;

const VALUE_EXTENSION: &str = "json";

/// Filesystem-backed store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.value_path(key);
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!(key, path = %path.display(), error = %err, "unable to read stored value");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.value_path(key), value)?;
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::tmp_path;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("data")).expect("json store");
        (store, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.load("chartData"), None);
        store.save("chartData", "{\"labels\":[]}").expect("save value");
        assert_eq!(store.load("chartData").as_deref(), Some("{\"labels\":[]}"));
        assert!(store.value_path("chartData").ends_with("chartData.json"));
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.value_path("../outside");
        assert_eq!(path.parent(), Some(store.root()));
        assert!(store.value_path("///").ends_with("value.json"));
    }

    #[test]
    fn unreadable_value_loads_as_missing() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.value_path("balance"), [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(store.load("balance"), None);
    }

    #[test]
    fn failed_save_keeps_previous_value() {
        let (store, _guard) = store_with_temp_dir();
        store.save("balance", "100").unwrap();
        fs::create_dir_all(tmp_path(&store.value_path("balance"))).unwrap();
        assert!(store.save("balance", "200").is_err());
        assert_eq!(store.load("balance").as_deref(), Some("100"));
    }
}
