//! Blog post document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{ImageRef, Slug, nullable};
use super::portable_text::PortableTextBlock;

/// An editorial article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Headline.
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// URL slug.
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    /// Teaser text for listings.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Article body; empty on listing queries.
    #[serde(default, deserialize_with = "nullable")]
    pub body: Vec<PortableTextBlock>,
    /// Cover image.
    #[serde(default)]
    pub cover_image: Option<ImageRef>,
    /// Author name.
    #[serde(default)]
    pub author: Option<String>,
    /// Publication timestamp.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}
