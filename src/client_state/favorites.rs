//! Saved casinos.

use std::sync::Arc;

use tokio::sync::watch;

use super::persisted::PersistedCollection;
use super::storage::Storage;
use crate::domain::Casino;

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "casino-favorites";

/// Unbounded list of favorite casinos.
#[derive(Debug)]
pub struct Favorites {
    casinos: PersistedCollection<Casino>,
}

impl Favorites {
    /// Loads favorites from `storage`.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        Self {
            casinos: PersistedCollection::load(storage, FAVORITES_KEY),
        }
    }

    /// Adds `casino` unless already saved.
    pub fn add(&self, casino: Casino) -> bool {
        self.casinos.insert(casino, None)
    }

    /// Removes the casino with `id`.
    pub fn remove(&self, id: &str) -> bool {
        self.casinos.remove(id)
    }

    /// Adds or removes `casino`. Returns `true` when it is now a favorite.
    pub fn toggle(&self, casino: Casino) -> bool {
        if self.casinos.remove(&casino.id) {
            false
        } else {
            self.casinos.insert(casino, None)
        }
    }

    /// Removes every favorite.
    pub fn clear(&self) {
        self.casinos.clear();
    }

    /// Whether the casino with `id` is saved.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.casinos.contains(id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn count(&self) -> usize {
        self.casinos.len()
    }

    /// Saved casinos, oldest first.
    #[must_use]
    pub fn casinos(&self) -> Vec<Casino> {
        self.casinos.items()
    }

    /// Observes changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Casino>> {
        self.casinos.subscribe()
    }
}
