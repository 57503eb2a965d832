//! Casino document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ImageRef, Slug, nullable};

/// Highest rating a casino can carry.
pub const MAX_RATING: f64 = 5.0;

/// A casino listing as returned by the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Casino {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// URL slug.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Logo image.
    #[serde(default)]
    pub logo: Option<ImageRef>,
    /// Short description shown on cards.
    #[serde(default)]
    pub description: Option<String>,
    /// Editorial rating, 0 to 5.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Year the casino was established.
    #[serde(default)]
    pub established: Option<i32>,
    /// Minimum deposit in USD.
    #[serde(default)]
    pub min_deposit: Option<f64>,
    /// Typical withdrawal time, free text.
    #[serde(default)]
    pub withdrawal_time: Option<String>,
    /// Licensing authorities.
    #[serde(default, deserialize_with = "nullable")]
    pub licenses: Vec<String>,
    /// Outbound affiliate tracking URL.
    #[serde(default)]
    pub affiliate_url: Option<String>,
    /// Whether the casino is promoted as a top pick.
    #[serde(default)]
    pub featured: Option<bool>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Casino {
    /// Returns `true` when the casino is flagged as featured.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Rating clamped into `0..=5`, or `0` when unrated.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0).clamp(0.0, MAX_RATING)
    }
}

/// Projection of a casino embedded in other documents (bonus, review).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasinoRef {
    /// Document id.
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// URL slug.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Logo image.
    #[serde(default)]
    pub logo: Option<ImageRef>,
    /// Editorial rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Outbound affiliate tracking URL.
    #[serde(default)]
    pub affiliate_url: Option<String>,
}

/// Picks the highest-rated casino; the first one wins on ties.
#[must_use]
pub fn highest_rated(casinos: &[Casino]) -> Option<&Casino> {
    casinos.iter().fold(None, |best: Option<&Casino>, current| match best {
        Some(prev) if current.rating_or_zero() <= prev.rating_or_zero() => Some(prev),
        _ => Some(current),
    })
}
