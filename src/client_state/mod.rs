//! Visitor-local UI state: favorites, comparison list, cookie consent.
//!
//! Each container owns a snapshot loaded once from a [`Storage`] backend
//! and writes it back after every mutation. Interested parties observe
//! changes through `tokio::sync::watch` receivers. Nothing here is shared
//! between visitors or synchronized across storage instances.

pub mod compare;
pub mod consent;
pub mod favorites;
pub mod persisted;
pub mod storage;

pub use compare::{COMPARE_KEY, CompareList, MAX_COMPARE};
pub use consent::{CONSENT_KEY, Consent, ConsentState, ConsentUpdate, CookieConsent};
pub use favorites::{FAVORITES_KEY, Favorites};
pub use persisted::{Keyed, PersistedCollection};
pub use storage::{MemoryStorage, Storage};
