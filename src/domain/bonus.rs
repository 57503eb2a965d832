//! Bonus document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::casino::CasinoRef;
use super::common::{Slug, nullable};

/// Bonus category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusType {
    /// First-deposit welcome offer.
    #[serde(rename = "welcome")]
    Welcome,
    /// Offer on subsequent deposits.
    #[serde(rename = "reload")]
    Reload,
    /// Free spins package.
    #[serde(rename = "freespins")]
    FreeSpins,
    /// Credit granted without a deposit.
    #[serde(rename = "no-deposit")]
    NoDeposit,
    /// Losses refunded as bonus money.
    #[serde(rename = "cashback")]
    Cashback,
}

impl BonusType {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome Bonus",
            Self::Reload => "Reload Bonus",
            Self::FreeSpins => "Free Spins",
            Self::NoDeposit => "No Deposit",
            Self::Cashback => "Cashback",
        }
    }
}

/// A bonus offer attached to a casino.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Offer headline, e.g. "100% up to $500".
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// URL slug.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Casino offering the bonus.
    #[serde(default)]
    pub casino: Option<CasinoRef>,
    /// Bonus category.
    #[serde(rename = "type", default)]
    pub bonus_type: Option<BonusType>,
    /// Human-readable value, e.g. "$500 + 100 Free Spins".
    #[serde(default)]
    pub value: Option<String>,
    /// Wagering multiplier (35 means 35x).
    #[serde(default)]
    pub wagering_requirement: Option<f64>,
    /// Minimum qualifying deposit in USD.
    #[serde(default)]
    pub min_deposit: Option<f64>,
    /// Promo code to claim the offer.
    #[serde(default)]
    pub code: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Terms and conditions text.
    #[serde(default)]
    pub terms: Option<String>,
    /// Whether the bonus is promoted.
    #[serde(default)]
    pub featured: Option<bool>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_embedded_casino() {
        let json = r#"{
            "_id": "b1",
            "title": "100% up to $500",
            "slug": {"current": "lucky-welcome"},
            "casino": {"_id": "c1", "name": "Lucky", "slug": {"current": "lucky"}},
            "type": "no-deposit",
            "wageringRequirement": 35
        }"#;
        let Ok(bonus) = serde_json::from_str::<Bonus>(json) else {
            panic!("bonus should deserialize");
        };
        assert_eq!(bonus.bonus_type, Some(BonusType::NoDeposit));
        assert_eq!(bonus.casino.map(|c| c.name), Some("Lucky".to_string()));
        assert_eq!(bonus.wagering_requirement, Some(35.0));
    }

    #[test]
    fn labels() {
        assert_eq!(BonusType::FreeSpins.label(), "Free Spins");
        assert_eq!(BonusType::Welcome.label(), "Welcome Bonus");
    }
}
