//! Payment method document.

use serde::{Deserialize, Serialize};

use super::common::{ImageRef, Slug, nullable};

/// Payment method category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Credit or debit card.
    Card,
    /// Electronic wallet.
    Ewallet,
    /// Cryptocurrency.
    Crypto,
    /// Bank transfer.
    Bank,
    /// Prepaid voucher.
    Prepaid,
}

impl PaymentType {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Ewallet => "E-Wallet",
            Self::Crypto => "Cryptocurrency",
            Self::Bank => "Bank Transfer",
            Self::Prepaid => "Prepaid",
        }
    }
}

/// A deposit/withdrawal method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
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
    /// Category tag.
    #[serde(rename = "type", default)]
    pub payment_type: Option<PaymentType>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Typical processing time, free text.
    #[serde(default)]
    pub processing_time: Option<String>,
    /// Fee summary, free text.
    #[serde(default)]
    pub fees: Option<String>,
}
