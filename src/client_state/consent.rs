//! Cookie consent.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::storage::Storage;

/// Storage key of the consent record.
pub const CONSENT_KEY: &str = "cookie-consent";

/// Stored consent choice. `necessary` is always `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    /// Strictly necessary cookies.
    pub necessary: bool,
    /// Analytics cookies.
    pub analytics: bool,
    /// Marketing cookies.
    pub marketing: bool,
    /// When the choice was made, in Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Default for Consent {
    fn default() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
            timestamp: None,
        }
    }
}

/// Partial consent change. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentUpdate {
    /// New analytics choice.
    pub analytics: Option<bool>,
    /// New marketing choice.
    pub marketing: Option<bool>,
}

/// Consent plus banner visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentState {
    /// Current choice, if one was made.
    pub consent: Option<Consent>,
    /// Whether the banner should be shown.
    pub show_banner: bool,
}

/// Consent record backed by [`Storage`].
#[derive(Debug)]
pub struct CookieConsent {
    storage: Arc<dyn Storage>,
    state: watch::Sender<ConsentState>,
}

impl CookieConsent {
    /// Loads the stored choice. The banner shows when there is none or it
    /// cannot be read.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let consent = storage
            .get(CONSENT_KEY)
            .and_then(|raw| match serde_json::from_str::<Consent>(&raw) {
                Ok(consent) => Some(consent),
                Err(err) => {
                    tracing::warn!(error = %err, "unreadable cookie consent");
                    None
                }
            });
        let (state, _) = watch::channel(ConsentState {
            consent,
            show_banner: consent.is_none(),
        });
        Self { storage, state }
    }

    /// Accepts every category.
    pub fn accept_all(&self) {
        self.store(Consent {
            necessary: true,
            analytics: true,
            marketing: true,
            timestamp: None,
        });
    }

    /// Accepts necessary cookies only.
    pub fn accept_necessary(&self) {
        self.store(Consent::default());
    }

    /// Applies `update` on top of the current choice.
    pub fn update(&self, update: ConsentUpdate) {
        let current = self.consent().unwrap_or_default();
        self.store(Consent {
            necessary: true,
            analytics: update.analytics.unwrap_or(current.analytics),
            marketing: update.marketing.unwrap_or(current.marketing),
            timestamp: None,
        });
    }

    /// Forgets the choice and shows the banner again.
    pub fn reset(&self) {
        self.storage.remove(CONSENT_KEY);
        self.state.send_replace(ConsentState {
            consent: None,
            show_banner: true,
        });
    }

    /// Current choice.
    #[must_use]
    pub fn consent(&self) -> Option<Consent> {
        self.state.borrow().consent
    }

    /// Whether the banner should be shown.
    #[must_use]
    pub fn show_banner(&self) -> bool {
        self.state.borrow().show_banner
    }

    /// Shows or hides the banner without changing the choice.
    pub fn set_show_banner(&self, show: bool) {
        self.state.send_modify(|state| state.show_banner = show);
    }

    /// Whether analytics cookies are allowed.
    #[must_use]
    pub fn has_analytics_consent(&self) -> bool {
        self.consent().is_some_and(|c| c.analytics)
    }

    /// Whether marketing cookies are allowed.
    #[must_use]
    pub fn has_marketing_consent(&self) -> bool {
        self.consent().is_some_and(|c| c.marketing)
    }

    /// Observes changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConsentState> {
        self.state.subscribe()
    }

    fn store(&self, mut consent: Consent) {
        consent.necessary = true;
        consent.timestamp = Some(Utc::now().timestamp_millis());
        match serde_json::to_string(&consent) {
            Ok(raw) => self.storage.set(CONSENT_KEY, raw),
            Err(err) => tracing::warn!(error = %err, "could not store cookie consent"),
        }
        self.state.send_replace(ConsentState {
            consent: Some(consent),
            show_banner: false,
        });
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::client_state::persisted::tests::storage;

    #[test]
    fn banner_shows_without_stored_choice() {
        let consent = CookieConsent::load(storage());
        assert!(consent.show_banner());
        assert_eq!(consent.consent(), None);
    }

    #[test]
    fn unreadable_choice_shows_banner() {
        let storage = storage();
        storage.set(CONSENT_KEY, "nope".to_string());
        assert!(CookieConsent::load(storage).show_banner());
    }

    #[test]
    fn accept_all_persists_and_hides_banner() {
        let storage = storage();
        let consent = CookieConsent::load(Arc::clone(&storage));
        consent.accept_all();
        assert!(!consent.show_banner());
        assert!(consent.has_analytics_consent());
        assert!(consent.has_marketing_consent());

        let reloaded = CookieConsent::load(storage);
        assert!(!reloaded.show_banner());
        assert!(reloaded.consent().is_some_and(|c| c.timestamp.is_some()));
    }

    #[test]
    fn custom_update_keeps_necessary() {
        let consent = CookieConsent::load(storage());
        consent.update(ConsentUpdate {
            analytics: Some(true),
            marketing: None,
        });
        let Some(choice) = consent.consent() else {
            panic!("update should record a choice");
        };
        assert!(choice.necessary);
        assert!(choice.analytics);
        assert!(!choice.marketing);
    }

    #[test]
    fn reset_forgets_choice() {
        let storage = storage();
        let consent = CookieConsent::load(Arc::clone(&storage));
        consent.accept_necessary();
        consent.reset();
        assert!(consent.show_banner());
        assert_eq!(storage.get(CONSENT_KEY), None);
    }
}
