//! In-memory [`ContentStore`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Notify, Semaphore};

use super::query::Query;
use super::store::{ContentError, ContentStore};

#[derive(Debug)]
struct Canned {
    needle: String,
    param: Option<(String, Value)>,
    response: Value,
}

/// Answers queries whose text contains a registered needle (and, when
/// given, whose parameter matches). Unmatched queries return `null`.
#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    canned: Vec<Canned>,
    failing: bool,
    seen: Mutex<Vec<Query>>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails.
    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, needle: &str, response: Value) -> Self {
        self.canned.push(Canned {
            needle: needle.to_string(),
            param: None,
            response,
        });
        self
    }

    pub(crate) fn with_param(
        mut self,
        needle: &str,
        name: &str,
        value: impl Into<Value>,
        response: Value,
    ) -> Self {
        self.canned.push(Canned {
            needle: needle.to_string(),
            param: Some((name.to_string(), value.into())),
            response,
        });
        self
    }

    /// Queries received so far.
    pub(crate) fn seen(&self) -> Vec<Query> {
        self.seen.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(query.clone());
        }
        if self.failing {
            return Err(ContentError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        let hit = self.canned.iter().find(|c| {
            query.groq().contains(&c.needle)
                && c.param
                    .as_ref()
                    .is_none_or(|(name, value)| query.params().get(name) == Some(value))
        });
        Ok(hit.map_or(Value::Null, |c| c.response.clone()))
    }
}

/// Wraps a [`FakeStore`] and holds every query until [`GatedStore::open`]
/// is called. [`GatedStore::entered`] resolves once a query is waiting.
#[derive(Debug)]
pub(crate) struct GatedStore {
    inner: FakeStore,
    gate: Semaphore,
    entered: Notify,
}

impl GatedStore {
    pub(crate) fn new(inner: FakeStore) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            entered: Notify::new(),
        }
    }

    pub(crate) async fn entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn open(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl ContentStore for GatedStore {
    async fn fetch(&self, query: &Query) -> Result<Value, ContentError> {
        self.entered.notify_one();
        let _permit = self.gate.acquire().await;
        self.inner.fetch(query).await
    }
}
