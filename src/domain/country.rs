//! Country document.

use serde::{Deserialize, Serialize};

use super::common::{ImageRef, nullable};

/// Online gambling legal status in a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalStatus {
    /// Regulated and permitted.
    Legal,
    /// Permitted with restrictions.
    Restricted,
    /// Prohibited.
    Prohibited,
    /// No specific regulation.
    Unregulated,
}

impl LegalStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::Restricted => "Restricted",
            Self::Prohibited => "Prohibited",
            Self::Unregulated => "Unregulated",
        }
    }
}

/// A country guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Country name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// ISO 3166-1 alpha-2 code, upper case.
    #[serde(default, deserialize_with = "nullable")]
    pub code: String,
    /// Flag image.
    #[serde(default)]
    pub flag: Option<ImageRef>,
    /// Legal status tag.
    #[serde(default)]
    pub legal_status: Option<LegalStatus>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
}

impl Country {
    /// Path segment used in URLs (lower-cased code).
    #[must_use]
    pub fn path_code(&self) -> String {
        self.code.to_lowercase()
    }
}
