//! Generic persisted, observable collection.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::storage::Storage;
use crate::domain::Casino;

/// Items addressable by a stable id.
pub trait Keyed {
    /// Stable identifier.
    fn key(&self) -> &str;
}

impl Keyed for Casino {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Stored layout: `{"ids": [...], "casinos": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    ids: Vec<String>,
    #[serde(rename = "casinos")]
    items: Vec<T>,
}

/// Ordered, duplicate-free collection mirrored into a [`Storage`] key.
///
/// - The stored snapshot is read once, at construction. A snapshot that
///   fails to parse is deleted and the collection starts empty.
/// - Every mutation writes the whole snapshot back; an empty collection
///   removes the key instead.
/// - Receivers from [`PersistedCollection::subscribe`] see each new
///   snapshot.
#[derive(Debug)]
pub struct PersistedCollection<T> {
    storage: Arc<dyn Storage>,
    key: &'static str,
    state: watch::Sender<Vec<T>>,
}

impl<T> PersistedCollection<T>
where
    T: Keyed + Clone + Serialize + DeserializeOwned,
{
    /// Loads the collection stored under `key`.
    pub fn load(storage: Arc<dyn Storage>, key: &'static str) -> Self {
        let items = match storage.get(key) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Snapshot<T>>(&raw) {
                Ok(snapshot) => snapshot.items,
                Err(err) => {
                    tracing::warn!(key, error = %err, "discarding unreadable stored state");
                    storage.remove(key);
                    Vec::new()
                }
            },
        };
        let (state, _) = watch::channel(items);
        Self {
            storage,
            key,
            state,
        }
    }

    /// Current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.state.borrow().clone()
    }

    /// Ids of the current items, in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.state
            .borrow()
            .iter()
            .map(|item| item.key().to_string())
            .collect()
    }

    /// Whether an item with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.state.borrow().iter().any(|item| item.key() == id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    /// Returns `true` when the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Appends `item` unless its id is present or `capacity` is reached.
    /// Returns whether it was added.
    pub fn insert(&self, item: T, capacity: Option<usize>) -> bool {
        let added = self.state.send_if_modified(|items| {
            let full = capacity.is_some_and(|cap| items.len() >= cap);
            if full || items.iter().any(|i| i.key() == item.key()) {
                return false;
            }
            items.push(item);
            true
        });
        if added {
            self.persist();
        }
        added
    }

    /// Removes the item with `id`. Returns whether one was removed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.state.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| item.key() != id);
            items.len() != before
        });
        if removed {
            self.persist();
        }
        removed
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.state.send_modify(Vec::clear);
        self.persist();
    }

    /// Receiver that observes every new snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.state.subscribe()
    }

    fn persist(&self) {
        let items = self.state.borrow();
        if items.is_empty() {
            self.storage.remove(self.key);
            return;
        }
        let snapshot = Snapshot {
            ids: items.iter().map(|item| item.key().to_string()).collect(),
            items: items.clone(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => self.storage.set(self.key, raw),
            Err(err) => tracing::warn!(key = self.key, error = %err, "could not store state"),
        }
    }
}
