//! Portable text: the store's structured rich-text format.
//!
//! A body is a list of blocks. Text blocks (`_type == "block"`) carry a
//! style, optional list membership and a run of spans; marks on a span are
//! either decorators (`strong`, `em`, `code`) or keys into the block's
//! `markDefs` (link annotations). Inline images use `_type == "image"`.

use serde::{Deserialize, Serialize};

use super::common::{AssetRef, nullable};

/// One entry of a portable text body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortableTextBlock {
    /// `block` for text, `image` for inline images.
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub block_type: String,
    /// Stable key within the body.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Text style: `normal`, `h2`..`h4`, `blockquote`.
    #[serde(default)]
    pub style: Option<String>,
    /// `bullet` or `number` when the block is a list item.
    #[serde(default)]
    pub list_item: Option<String>,
    /// List nesting level, starting at 1.
    #[serde(default)]
    pub level: Option<u32>,
    /// Text runs.
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Span>,
    /// Annotation definitions referenced by span marks.
    #[serde(default, deserialize_with = "nullable")]
    pub mark_defs: Vec<MarkDef>,
    /// Image asset, for `image` entries.
    #[serde(default)]
    pub asset: Option<AssetRef>,
    /// Alternative text, for `image` entries.
    #[serde(default)]
    pub alt: Option<String>,
}

/// A run of text with uniform marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Text content.
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    /// Decorators and annotation keys.
    #[serde(default, deserialize_with = "nullable")]
    pub marks: Vec<String>,
}

/// Annotation definition (currently only links).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDef {
    /// Key referenced from [`Span::marks`].
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Annotation type, e.g. `link`.
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    pub mark_type: String,
    /// Link target.
    #[serde(default)]
    pub href: Option<String>,
    /// Open the link in a new tab.
    #[serde(default)]
    pub open_in_new_tab: Option<bool>,
}

impl PortableTextBlock {
    /// Returns `true` for text blocks.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.block_type == "block"
    }

    /// Concatenated text of all spans.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }

    /// Looks up an annotation by key.
    #[must_use]
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }
}

/// Plain-text rendering of a whole body, paragraphs separated by blank lines.
#[must_use]
pub fn to_plain_text(blocks: &[PortableTextBlock]) -> String {
    blocks
        .iter()
        .filter(|block| block.is_text())
        .map(PortableTextBlock::plain_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
