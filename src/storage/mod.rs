//! Key/value persistence abstraction
//!
//! The update-check service keeps its settings, last-check timestamp and
//! history as strings under well-known keys. The [Storage] trait hides where
//! those strings live so the decision logic can be tested without touching
//! the filesystem.
//!
//! - [memory::MemoryStorage]: in-process map for tests and embedding
//! - [file::FileStorage]: a JSON object file on disk
//!
//! ```rust
//! # use update_notifier::storage::{MemoryStorage, Storage};
//! let storage = MemoryStorage::new();
//! storage.set("greeting", "hello").unwrap();
//! assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// String-keyed storage of string values
///
/// Implementors must be `Send + Sync` so a checker can be shared behind a
/// lock. Methods take `&self`; implementations handle their own interior
/// mutability.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - The stored value
    /// * `Ok(None)` - Nothing stored under `key`
    /// * `Err` - If the backing store cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
