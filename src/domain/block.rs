//! Page-builder blocks.
//!
//! Generic CMS pages are an ordered list of blocks. The set of block kinds
//! is closed: anything the renderer does not know deserializes into
//! [`PageBlock::Unknown`] instead of failing the whole page. Unrecognised
//! setting values fall back to their defaults, and a known block that
//! still cannot be decoded becomes [`PageBlock::Unknown`] too.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::casino::Casino;
use super::common::{ImageRef, nullable};
use super::portable_text::PortableTextBlock;

/// Default number of casinos shown by an automatic casino list.
pub const DEFAULT_CASINO_LIST_LIMIT: u32 = 6;

/// A single page-builder block.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBlock {
    /// Large banner with title, subtitle and optional call to action.
    Hero(HeroBlock),
    /// Portable text section.
    RichText(RichTextBlock),
    /// Grid of casino cards, curated or query-driven.
    CasinoList(CasinoListBlock),
    /// Side-by-side casino table.
    ComparisonTable(ComparisonTableBlock),
    /// Two-column pros and cons.
    ProsCons(ProsConsBlock),
    /// Single call-to-action button.
    Cta(CtaBlock),
    /// Question and answer list.
    Faq(FaqBlock),
    /// Highlighted note.
    InfoBox(InfoBoxBlock),
    /// Any block type this build does not render.
    Unknown {
        /// Block key.
        key: String,
        /// The unrecognised `_type`.
        block_type: String,
    },
}

impl PageBlock {
    /// The block's `_key`.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Hero(b) => &b.key,
            Self::RichText(b) => &b.key,
            Self::CasinoList(b) => &b.key,
            Self::ComparisonTable(b) => &b.key,
            Self::ProsCons(b) => &b.key,
            Self::Cta(b) => &b.key,
            Self::Faq(b) => &b.key,
            Self::InfoBox(b) => &b.key,
            Self::Unknown { key, .. } => key,
        }
    }

    /// The store `_type` name for this block.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Hero(_) => "heroBlock",
            Self::RichText(_) => "richTextBlock",
            Self::CasinoList(_) => "casinoListBlock",
            Self::ComparisonTable(_) => "comparisonTableBlock",
            Self::ProsCons(_) => "prosConsBlock",
            Self::Cta(_) => "ctaBlock",
            Self::Faq(_) => "faqBlock",
            Self::InfoBox(_) => "infoBoxBlock",
            Self::Unknown { block_type, .. } => block_type,
        }
    }
}

impl<'de> Deserialize<'de> for PageBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let text = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let (key, block_type) = (text("_key"), text("_type"));
        let parsed = match block_type.as_str() {
            "heroBlock" => serde_json::from_value(value).map(Self::Hero),
            "richTextBlock" => serde_json::from_value(value).map(Self::RichText),
            "casinoListBlock" => serde_json::from_value(value).map(Self::CasinoList),
            "comparisonTableBlock" => serde_json::from_value(value).map(Self::ComparisonTable),
            "prosConsBlock" => serde_json::from_value(value).map(Self::ProsCons),
            "ctaBlock" => serde_json::from_value(value).map(Self::Cta),
            "faqBlock" => serde_json::from_value(value).map(Self::Faq),
            "infoBoxBlock" => serde_json::from_value(value).map(Self::InfoBox),
            _ => return Ok(Self::Unknown { key, block_type }),
        };
        Ok(parsed.unwrap_or_else(|err| {
            tracing::warn!(
                block_type = %block_type,
                key = %key,
                error = %err,
                "malformed page block skipped"
            );
            Self::Unknown { key, block_type }
        }))
    }
}

/// Deserializes a setting, falling back to its default for `null` or any
/// value outside the known set.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserializes the comparison columns, dropping unrecognised entries.
/// A list with no usable entries counts as unset.
fn known_columns<'de, D>(deserializer: D) -> Result<Option<Vec<ComparisonColumn>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items: Vec<Value> = serde_json::from_value(value).unwrap_or_default();
    let columns: Vec<ComparisonColumn> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    Ok((!columns.is_empty()).then_some(columns))
}

/// Where the hero image sits relative to the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    /// Full-bleed background.
    #[default]
    Background,
    /// Image to the right of the text.
    Right,
    /// Image to the left of the text.
    Left,
}

/// Link with a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
    /// Button label.
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    /// Target URL.
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

/// Hero banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Headline.
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// Sub-headline.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Banner image.
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Image placement.
    #[serde(default, deserialize_with = "lenient")]
    pub image_position: ImagePosition,
    /// Call to action.
    #[serde(default)]
    pub cta: Option<LinkButton>,
    /// Darken the background image (defaults to on).
    #[serde(default)]
    pub overlay: Option<bool>,
}

/// Portable text section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Body.
    #[serde(default, deserialize_with = "nullable")]
    pub content: Vec<PortableTextBlock>,
}

/// How a casino list chooses its entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Query the store using [`CasinoListFilter`].
    #[default]
    Automatic,
    /// Use the hand-picked casinos.
    Manual,
}

/// Selection rule for automatic casino lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CasinoListFilter {
    /// Every published casino, by name.
    #[default]
    All,
    /// Featured casinos, best rated first.
    Featured,
    /// Best rated first.
    TopRated,
    /// Most recently published first.
    Newest,
}

/// Grid of casino cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasinoListBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Section title.
    #[serde(default)]
    pub title: Option<String>,
    /// Section subtitle.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Manual or automatic selection.
    #[serde(default, deserialize_with = "lenient")]
    pub display_mode: DisplayMode,
    /// Hand-picked casinos for manual mode.
    #[serde(default, deserialize_with = "present_items")]
    pub manual_casinos: Vec<Casino>,
    /// Automatic selection rule.
    #[serde(default, deserialize_with = "lenient")]
    pub filter: CasinoListFilter,
    /// Automatic selection size.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Grid columns (2, 3 or 4).
    #[serde(default)]
    pub columns: Option<u8>,
    /// Show a link to the full casino index (defaults to on).
    #[serde(default)]
    pub show_view_all_link: Option<bool>,
}

impl CasinoListBlock {
    /// Whether the block should be filled from the store.
    ///
    /// Manual mode with no usable picks falls back to the automatic query.
    #[must_use]
    pub fn needs_query(&self) -> bool {
        self.display_mode == DisplayMode::Automatic || self.manual_casinos.is_empty()
    }

    /// Effective automatic selection size.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_CASINO_LIST_LIMIT)
    }

    /// Effective column count, clamped to 2..=4.
    #[must_use]
    pub fn effective_columns(&self) -> u8 {
        self.columns.unwrap_or(3).clamp(2, 4)
    }
}

/// Column shown in a comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonColumn {
    /// Star rating.
    Rating,
    /// Welcome bonus.
    Bonus,
    /// Minimum deposit.
    MinDeposit,
    /// Withdrawal speed.
    PayoutSpeed,
    /// Licensing authority.
    License,
}

impl ComparisonColumn {
    /// Column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "Rating",
            Self::Bonus => "Welcome Bonus",
            Self::MinDeposit => "Min Deposit",
            Self::PayoutSpeed => "Payout Speed",
            Self::License => "License",
        }
    }
}

/// Side-by-side casino table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTableBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Section title.
    #[serde(default)]
    pub title: Option<String>,
    /// Casinos to compare.
    #[serde(default, deserialize_with = "present_items")]
    pub casinos: Vec<Casino>,
    /// Columns; `rating` and `bonus` when unset.
    #[serde(default, deserialize_with = "known_columns")]
    pub columns: Option<Vec<ComparisonColumn>>,
    /// Mark the best rated casino (defaults to on).
    #[serde(default)]
    pub highlight_winner: Option<bool>,
}

impl ComparisonTableBlock {
    /// Effective column list.
    #[must_use]
    pub fn effective_columns(&self) -> Vec<ComparisonColumn> {
        self.columns
            .clone()
            .unwrap_or_else(|| vec![ComparisonColumn::Rating, ComparisonColumn::Bonus])
    }
}

/// Pros and cons lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsConsBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Section title.
    #[serde(default)]
    pub title: Option<String>,
    /// Strengths.
    #[serde(default, deserialize_with = "nullable")]
    pub pros: Vec<String>,
    /// Weaknesses.
    #[serde(default, deserialize_with = "nullable")]
    pub cons: Vec<String>,
}

/// Button colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Brand colour.
    Primary,
    /// Highlight colour.
    #[default]
    Accent,
    /// Neutral.
    Secondary,
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// Small.
    Sm,
    /// Medium.
    Md,
    /// Large.
    #[default]
    Lg,
}

/// Call-to-action button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Label.
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    /// Target.
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    /// Colour scheme.
    #[serde(default, deserialize_with = "lenient")]
    pub variant: ButtonVariant,
    /// Size.
    #[serde(default, deserialize_with = "lenient")]
    pub size: ButtonSize,
    /// Center the button (defaults to on).
    #[serde(default)]
    pub centered: Option<bool>,
}

/// One FAQ entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// Entry key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Question.
    #[serde(default, deserialize_with = "nullable")]
    pub question: String,
    /// Answer.
    #[serde(default, deserialize_with = "nullable")]
    pub answer: String,
}

/// FAQ section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Section title.
    #[serde(default)]
    pub title: Option<String>,
    /// Entries.
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<FaqItem>,
}

/// Info box tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoVariant {
    /// Neutral information.
    #[default]
    Info,
    /// Caution.
    Warning,
    /// Positive.
    Success,
    /// Critical.
    Danger,
}

/// Highlighted note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBoxBlock {
    /// Block key.
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    pub key: String,
    /// Heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text.
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
    /// Tone.
    #[serde(default, deserialize_with = "lenient")]
    pub variant: InfoVariant,
}

/// Deserializes a dereferenced list, dropping `null` entries left by
/// references to deleted or unpublished documents.
fn present_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<PageBlock> {
        let Ok(blocks) = serde_json::from_str::<Vec<PageBlock>>(json) else {
            panic!("blocks should deserialize: {json}");
        };
        blocks
    }

    #[test]
    fn known_blocks_dispatch_on_type() {
        let blocks = parse(
            r#"[
                {"_type": "heroBlock", "_key": "h", "title": "Welcome", "subtitle": null},
                {"_type": "ctaBlock", "_key": "c", "text": "Play", "url": "/go/x", "variant": null},
                {"_type": "faqBlock", "_key": "f", "items": [{"_key": "1", "question": "Q", "answer": "A"}]}
            ]"#,
        );
        assert!(matches!(blocks.first(), Some(PageBlock::Hero(h)) if h.title == "Welcome"));
        let Some(PageBlock::Cta(cta)) = blocks.get(1) else {
            panic!("expected cta block");
        };
        assert_eq!(cta.variant, ButtonVariant::Accent);
        assert_eq!(cta.size, ButtonSize::Lg);
        assert!(matches!(blocks.get(2), Some(PageBlock::Faq(f)) if f.items.len() == 1));
    }

    #[test]
    fn unknown_block_type_is_preserved() {
        let blocks = parse(r#"[{"_type": "videoBlock", "_key": "v1", "url": "x"}]"#);
        assert_eq!(
            blocks.first(),
            Some(&PageBlock::Unknown {
                key: "v1".to_string(),
                block_type: "videoBlock".to_string(),
            })
        );
        assert_eq!(blocks.first().map(PageBlock::type_name), Some("videoBlock"));
    }

    #[test]
    fn casino_list_drops_broken_references() {
        let blocks = parse(
            r#"[{
                "_type": "casinoListBlock",
                "_key": "l",
                "displayMode": "manual",
                "manualCasinos": [null, {"_id": "c1", "name": "A", "slug": {"current": "a"}}],
                "filter": "top-rated"
            }]"#,
        );
        let Some(PageBlock::CasinoList(list)) = blocks.first() else {
            panic!("expected casino list");
        };
        assert_eq!(list.manual_casinos.len(), 1);
        assert_eq!(list.filter, CasinoListFilter::TopRated);
        assert!(!list.needs_query());
        assert_eq!(list.effective_limit(), DEFAULT_CASINO_LIST_LIMIT);
    }

    #[test]
    fn manual_list_without_picks_needs_query() {
        let block = CasinoListBlock {
            display_mode: DisplayMode::Manual,
            ..CasinoListBlock::default()
        };
        assert!(block.needs_query());
    }

    #[test]
    fn unrecognised_settings_fall_back_to_defaults() {
        let blocks = parse(
            r#"[
                {"_type": "heroBlock", "_key": "h", "title": "Hi", "imagePosition": "center"},
                {"_type": "comparisonTableBlock", "_key": "t", "columns": ["rtp", "license"]},
                {"_type": "comparisonTableBlock", "_key": "u", "columns": ["rtp"]},
                {"_type": "infoBoxBlock", "_key": "i", "content": "x", "variant": 3}
            ]"#,
        );
        let Some(PageBlock::Hero(hero)) = blocks.first() else {
            panic!("expected hero block");
        };
        assert_eq!(hero.image_position, ImagePosition::Background);
        let Some(PageBlock::ComparisonTable(table)) = blocks.get(1) else {
            panic!("expected comparison table");
        };
        assert_eq!(table.effective_columns(), vec![ComparisonColumn::License]);
        let Some(PageBlock::ComparisonTable(table)) = blocks.get(2) else {
            panic!("expected comparison table");
        };
        assert_eq!(
            table.effective_columns(),
            vec![ComparisonColumn::Rating, ComparisonColumn::Bonus]
        );
        assert!(matches!(blocks.get(3), Some(PageBlock::InfoBox(b)) if b.variant == InfoVariant::Info));
    }

    #[test]
    fn undecodable_known_block_becomes_unknown() {
        let blocks = parse(
            r#"[
                {"_type": "faqBlock", "_key": "f", "items": "not a list"},
                {"_type": "ctaBlock", "_key": "c", "text": "Play", "url": "/go/x"}
            ]"#,
        );
        assert_eq!(
            blocks.first(),
            Some(&PageBlock::Unknown {
                key: "f".to_string(),
                block_type: "faqBlock".to_string(),
            })
        );
        assert!(matches!(blocks.get(1), Some(PageBlock::Cta(_))));
    }

    #[test]
    fn comparison_columns_default() {
        let block = ComparisonTableBlock::default();
        assert_eq!(
            block.effective_columns(),
            vec![ComparisonColumn::Rating, ComparisonColumn::Bonus]
        );
    }
}
