//! Side-by-side comparison list.

use std::sync::Arc;

use tokio::sync::watch;

use super::persisted::PersistedCollection;
use super::storage::Storage;
use crate::domain::Casino;

/// Storage key of the comparison list.
pub const COMPARE_KEY: &str = "casino-compare";

/// Most casinos that can be compared at once.
pub const MAX_COMPARE: usize = 4;

/// Up to [`MAX_COMPARE`] casinos, plus the open/closed state of the
/// comparison drawer.
#[derive(Debug)]
pub struct CompareList {
    casinos: PersistedCollection<Casino>,
    open: watch::Sender<bool>,
}

impl CompareList {
    /// Loads the list from `storage`. The drawer starts closed.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let (open, _) = watch::channel(false);
        Self {
            casinos: PersistedCollection::load(storage, COMPARE_KEY),
            open,
        }
    }

    /// Adds `casino` and opens the drawer. Duplicates and additions past
    /// the cap are ignored; the drawer opens either way.
    pub fn add(&self, casino: Casino) -> bool {
        let added = self.casinos.insert(casino, Some(MAX_COMPARE));
        self.open.send_replace(true);
        added
    }

    /// Removes the casino with `id`.
    pub fn remove(&self, id: &str) -> bool {
        self.casinos.remove(id)
    }

    /// Empties the list and closes the drawer.
    pub fn clear(&self) {
        self.casinos.clear();
        self.open.send_replace(false);
    }

    /// Whether another casino fits.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.casinos.len() < MAX_COMPARE
    }

    /// Whether the casino with `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.casinos.contains(id)
    }

    /// Number of casinos in the list.
    #[must_use]
    pub fn count(&self) -> usize {
        self.casinos.len()
    }

    /// Casinos in the list, in insertion order.
    #[must_use]
    pub fn casinos(&self) -> Vec<Casino> {
        self.casinos.items()
    }

    /// Whether the comparison drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Opens or closes the drawer.
    pub fn set_open(&self, open: bool) {
        self.open.send_replace(open);
    }

    /// Observes list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Casino>> {
        self.casinos.subscribe()
    }

    /// Observes the drawer state.
    #[must_use]
    pub fn subscribe_open(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_state::persisted::tests::storage;
    use crate::domain::casino::tests::casino;

    #[test]
    fn holds_at_most_four() {
        let list = CompareList::load(storage());
        for id in ["a", "b", "c", "d"] {
            assert!(list.add(casino(id, None)));
        }
        assert!(!list.can_add());
        assert!(!list.add(casino("e", None)));
        assert_eq!(list.count(), MAX_COMPARE);
        assert!(!list.contains("e"));
    }

    #[test]
    fn add_opens_and_clear_closes_drawer() {
        let list = CompareList::load(storage());
        assert!(!list.is_open());
        list.add(casino("a", None));
        assert!(list.is_open());
        list.clear();
        assert!(!list.is_open());
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn survives_reload() {
        let storage = storage();
        let list = CompareList::load(Arc::clone(&storage));
        list.add(casino("a", Some(4.2)));
        list.add(casino("b", Some(3.1)));
        list.remove("a");

        let reloaded = CompareList::load(storage);
        assert_eq!(reloaded.count(), 1);
        assert!(reloaded.contains("b"));
    }
}
