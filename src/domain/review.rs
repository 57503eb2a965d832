//! Casino review document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::casino::CasinoRef;
use super::common::{Seo, Slug, nullable};
use super::portable_text::PortableTextBlock;

/// Per-category scores, each 0 to 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRatings {
    /// Overall score.
    #[serde(default)]
    pub overall: Option<f64>,
    /// Game selection.
    #[serde(default)]
    pub games: Option<f64>,
    /// Customer support.
    #[serde(default)]
    pub support: Option<f64>,
    /// Payout speed and reliability.
    #[serde(default)]
    pub payout: Option<f64>,
    /// Mobile experience.
    #[serde(default)]
    pub mobile: Option<f64>,
}

impl ReviewRatings {
    /// Labelled category scores that are present, in display order.
    #[must_use]
    pub fn categories(&self) -> Vec<(&'static str, f64)> {
        [
            ("Overall", self.overall),
            ("Games", self.games),
            ("Support", self.support),
            ("Payouts", self.payout),
            ("Mobile", self.mobile),
        ]
        .into_iter()
        .filter_map(|(label, score)| score.map(|s| (label, s)))
        .collect()
    }
}

/// An in-depth review of a single casino.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// URL slug.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Headline.
    #[serde(default, deserialize_with = "nullable")]
    pub headline: String,
    /// Review body.
    #[serde(default, deserialize_with = "nullable")]
    pub body: Vec<PortableTextBlock>,
    /// Reviewer name.
    #[serde(default)]
    pub author: Option<String>,
    /// One-paragraph verdict.
    #[serde(default)]
    pub verdict: Option<String>,
    /// Date the casino was last tested.
    #[serde(default)]
    pub last_tested: Option<String>,
    /// Category scores.
    #[serde(default)]
    pub ratings: Option<ReviewRatings>,
    /// Strengths.
    #[serde(default, deserialize_with = "nullable")]
    pub pros: Vec<String>,
    /// Weaknesses.
    #[serde(default, deserialize_with = "nullable")]
    pub cons: Vec<String>,
    /// Reviewed casino.
    #[serde(default)]
    pub casino: Option<CasinoRef>,
    /// SEO overrides.
    #[serde(default)]
    pub seo: Option<Seo>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn categories_skip_missing_scores() {
        let ratings = ReviewRatings {
            overall: Some(4.5),
            payout: Some(3.0),
            ..ReviewRatings::default()
        };
        assert_eq!(ratings.categories(), vec![("Overall", 4.5), ("Payouts", 3.0)]);
    }

    #[test]
    fn null_and_missing_lists_default_to_empty() {
        let json = r#"{"_id": "r1", "headline": "Solid pick", "pros": null}"#;
        let Ok(review) = serde_json::from_str::<Review>(json) else {
            panic!("review should deserialize");
        };
        assert!(review.pros.is_empty());
        assert!(review.body.is_empty());
    }
}
