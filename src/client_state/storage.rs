//! Key/value storage backends.

use dashmap::DashMap;

/// String key/value store, shaped like browser local storage.
///
/// Implementations never fail; a backend that cannot write drops the
/// value.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Returns the stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Deletes `key`.
    fn remove(&self, key: &str);
}

/// Process-memory [`Storage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v1".to_string());
        storage.set("k", "v2".to_string());
        assert_eq!(storage.get("k").as_deref(), Some("v2"));
        storage.remove("k");
        assert_eq!(storage.get("k"), None);
    }
}
