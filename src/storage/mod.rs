//! Key/value persistence targets for the credential store.
//!
//! Both targets implement [`StorageBackend`] so the store never branches on
//! which concrete backend it talks to.

mod json_file;

use std::collections::HashMap;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

pub use json_file::JsonFileBackend;

/// Minimal get/set/remove capability over string keys.
pub trait StorageBackend: fmt::Debug + Send {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        (**self).remove(key)
    }
}

/// Which target holds the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageTarget {
    /// Survives restarts.
    #[default]
    #[serde(rename = "local")]
    Durable,
    /// Discarded when the login session ends.
    #[serde(rename = "session")]
    Session,
}

impl StorageTarget {
    /// Tag written to the preference record.
    pub fn tag(self) -> &'static str {
        match self {
            StorageTarget::Durable => "local",
            StorageTarget::Session => "session",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "local" => Some(StorageTarget::Durable),
            "session" => Some(StorageTarget::Session),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            StorageTarget::Durable => StorageTarget::Session,
            StorageTarget::Session => StorageTarget::Durable,
        }
    }
}

impl fmt::Display for StorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// In-process map. Used for `--ephemeral` runs and as a test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for target in [StorageTarget::Durable, StorageTarget::Session] {
            assert_eq!(StorageTarget::from_tag(target.tag()), Some(target));
        }
        assert_eq!(StorageTarget::from_tag("cookie"), None);
    }

    #[test]
    fn memory_backend_remove_missing_key_is_ok() {
        let mut backend = MemoryBackend::new();
        backend.remove("absent").unwrap();
        backend.set("k", "v").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
        backend.remove("k").unwrap();
        assert!(backend.is_empty());
    }
}
