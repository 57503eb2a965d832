//! Field shapes shared by several document types.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as `T::default()`.
///
/// Projections return `null` for fields missing on a document, so plain
/// `#[serde(default)]` is not enough for non-optional strings and lists.
///
/// # Errors
///
/// Propagates the inner deserializer error for values of the wrong shape.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slug field as stored by the content store (`{ "current": "..." }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug {
    /// URL-safe identifier.
    #[serde(default)]
    pub current: String,
}

impl Slug {
    /// Creates a slug from a string.
    #[must_use]
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.current
    }
}

/// Reference to an image asset (`{ "asset": { "_ref": "image-..." } }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Asset reference wrapper.
    pub asset: AssetRef,
}

/// Inner asset reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Asset document id, e.g. `image-abc123-800x600-png`.
    #[serde(rename = "_ref")]
    pub reference: String,
}

impl ImageRef {
    /// Builds a CDN URL for this asset at the requested size.
    ///
    /// Asset ids have the form `image-<hash>-<w>x<h>-<ext>`. Returns `None`
    /// when the reference does not follow that layout.
    #[must_use]
    pub fn url(&self, project_id: &str, dataset: &str, width: u32, height: u32) -> Option<String> {
        let rest = self.asset.reference.strip_prefix("image-")?;
        let (id_and_dims, ext) = rest.rsplit_once('-')?;
        let (id, dims) = id_and_dims.rsplit_once('-')?;
        if id.is_empty() || !dims.contains('x') || ext.is_empty() {
            return None;
        }
        Some(format!(
            "https://cdn.sanity.io/images/{project_id}/{dataset}/{id}-{dims}.{ext}?w={width}&h={height}&fit=crop&auto=format"
        ))
    }
}

/// Per-document SEO overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    /// Overrides the `<title>`.
    #[serde(default)]
    pub meta_title: Option<String>,
    /// Overrides the meta description.
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Social sharing image.
    #[serde(default)]
    pub og_image: Option<ImageRef>,
    /// Emits `noindex, nofollow` when set.
    #[serde(default)]
    pub no_index: Option<bool>,
}
