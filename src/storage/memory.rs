use crate::error::{Result, UpdateNotifierError};
use crate::storage::Storage;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage for testing and embedding without a filesystem
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty storage
    pub fn new() -> Self {
        MemoryStorage {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a storage pre-populated with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        MemoryStorage {
            entries: Mutex::new(map),
        }
    }

    /// Number of stored keys, including after a panic poisoned the lock
    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(map) => map.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> UpdateNotifierError {
    UpdateNotifierError::storage("Memory storage lock poisoned")
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.entries.lock().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.entries.lock().map_err(|_| poisoned())?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.entries.lock().map_err(|_| poisoned())?;
        map.remove(key);
        Ok(())
    }
}
