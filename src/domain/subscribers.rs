//! Newsletter subscriber set.
//!
//! Addresses live in process memory only; a restart forgets them.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Result of a subscribe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The address was added.
    Subscribed,
    /// The address was already present.
    AlreadySubscribed,
}

/// Storage for newsletter subscribers.
#[async_trait]
pub trait SubscriberStore: Send + Sync + std::fmt::Debug {
    /// Adds an address. Addresses compare case-insensitively.
    async fn subscribe(&self, email: &str) -> SubscribeOutcome;

    /// Number of distinct subscribers.
    async fn count(&self) -> usize;
}

/// [`SubscriberStore`] backed by a `HashSet` behind a [`RwLock`].
#[derive(Debug, Default)]
pub struct InMemorySubscribers {
    emails: RwLock<HashSet<String>>,
}

impl InMemorySubscribers {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscribers {
    async fn subscribe(&self, email: &str) -> SubscribeOutcome {
        let normalized = email.trim().to_lowercase();
        let mut emails = self.emails.write().await;
        if emails.insert(normalized) {
            SubscribeOutcome::Subscribed
        } else {
            SubscribeOutcome::AlreadySubscribed
        }
    }

    async fn count(&self) -> usize {
        self.emails.read().await.len()
    }
}
