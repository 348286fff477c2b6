#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use finance_core::{
    errors::StorageError,
    storage::{KeyValueStore, MemoryStore},
    Dashboard, FixedClock,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Clock pinned to `month` (1-based) of 2025.
pub fn clock_in(month: u32) -> FixedClock {
    FixedClock::month_of(2025, month).expect("valid month")
}

/// In-memory store that counts writes and can be told to reject them.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    saves: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn put(&self, key: &str, value: &str) {
        self.inner.save(key, value).expect("seed store");
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.load(key)
    }
}

impl KeyValueStore for RecordingStore {
    fn load(&self, key: &str) -> Option<String> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        self.inner.save(key, value)
    }
}

/// Dashboard over a fresh recording store with the clock in `month`.
pub fn memory_dashboard(month: u32) -> (Dashboard, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    let dashboard = dashboard_over(Arc::clone(&store), month);
    (dashboard, store)
}

pub fn dashboard_over(store: Arc<RecordingStore>, month: u32) -> Dashboard {
    Dashboard::new(Box::new(store), Box::new(clock_in(month)))
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() <= 1e-6 * left.abs().max(right.abs()).max(1.0)
}
