use griddle_core::driver::VersionStore;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// In-memory stand-in for the host's persistent key-value facility.
///
/// Clones share the same entries, so a handle kept outside the database can
/// observe what the version manager persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryVersionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VersionStore for MemoryVersionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("version store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("version store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
