//! Content-authoring schema: the document and object types editors work
//! with, their fields and validation rules.
//!
//! The catalog is static data. It is served as JSON for studio tooling and
//! can check a raw document against its rules with [`SchemaType::validate`].

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Top-level document types stored in the content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// Casino listing.
    Casino,
    /// Bonus offer.
    Bonus,
    /// Country guide.
    Country,
    /// Payment method.
    PaymentMethod,
    /// Blog article.
    BlogPost,
    /// Page-builder page.
    Page,
    /// Casino review.
    Review,
}

impl DocumentType {
    /// Every document type, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Casino,
        Self::Bonus,
        Self::Country,
        Self::PaymentMethod,
        Self::BlogPost,
        Self::Page,
        Self::Review,
    ];

    /// The `_type` value used by the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Casino => "casino",
            Self::Bonus => "bonus",
            Self::Country => "country",
            Self::PaymentMethod => "paymentMethod",
            Self::BlogPost => "blogPost",
            Self::Page => "page",
            Self::Review => "review",
        }
    }

    /// Parses a store `_type` value.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a schema type is a stored document or an embeddable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Top-level document.
    Document,
    /// Object embedded in documents.
    Object,
}

/// Field value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Single-line text.
    String,
    /// Multi-line text.
    Text,
    /// Number.
    Number,
    /// Boolean.
    Boolean,
    /// URL.
    Url,
    /// Slug object.
    Slug,
    /// Image asset.
    Image,
    /// Date (no time).
    Date,
    /// Date and time.
    Datetime,
    /// Reference to another document.
    Reference,
    /// Ordered list.
    Array,
    /// Nested object.
    Object,
    /// Portable text body.
    PortableText,
    /// Named object type from the catalog (see [`FieldDef::of`]).
    Named,
}

/// Validation rule on a field.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum Rule {
    /// Value must be present and non-empty.
    Required,
    /// Numeric minimum, or minimum item count for arrays.
    Min {
        /// Bound.
        value: f64,
    },
    /// Numeric maximum, maximum item count for arrays, or maximum string
    /// length.
    Max {
        /// Bound.
        value: f64,
    },
    /// Exact string length.
    Length {
        /// Expected length.
        value: usize,
    },
    /// String must be upper case.
    Uppercase,
    /// Soft string length limit; violations are warnings.
    MaxLengthWarning {
        /// Bound.
        value: usize,
        /// Message for editors.
        message: &'static str,
    },
}

/// One entry of a fixed choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListOption {
    /// Label shown to editors.
    pub title: &'static str,
    /// Stored value.
    pub value: &'static str,
}

/// Field definition.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    /// Field name in the stored JSON.
    pub name: &'static str,
    /// Label shown to editors.
    pub title: &'static str,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// Allowed values for choice fields.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ListOption>,
    /// Target or member type names for references, arrays and named objects.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub of: Vec<&'static str>,
    /// Validation rules.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl FieldDef {
    fn new(name: &'static str, title: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            title,
            field_type,
            description: None,
            options: Vec::new(),
            of: Vec::new(),
            rules: Vec::new(),
        }
    }

    fn required(mut self) -> Self {
        self.rules.push(Rule::Required);
        self
    }

    fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    fn range(self, min: f64, max: f64) -> Self {
        self.rule(Rule::Min { value: min }).rule(Rule::Max { value: max })
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn options(mut self, options: &[(&'static str, &'static str)]) -> Self {
        self.options = options
            .iter()
            .map(|&(title, value)| ListOption { title, value })
            .collect();
        self
    }

    fn of(mut self, types: &[&'static str]) -> Self {
        self.of = types.to_vec();
        self
    }

    /// Returns `true` when the field carries a [`Rule::Required`].
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks publishing.
    Error,
    /// Advisory only.
    Warning,
}

/// A validation finding on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    /// Offending field.
    pub field: &'static str,
    /// Human-readable problem.
    pub message: String,
    /// Severity.
    pub severity: Severity,
}

/// A document or object type in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SchemaType {
    /// Type name (`_type`).
    pub name: &'static str,
    /// Label shown to editors.
    pub title: &'static str,
    /// Document or object.
    pub kind: SchemaKind,
    /// Field definitions, in editor order.
    pub fields: Vec<FieldDef>,
}

impl SchemaType {
    fn document(name: &'static str, title: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            name,
            title,
            kind: SchemaKind::Document,
            fields,
        }
    }

    fn object(name: &'static str, title: &'static str, fields: Vec<FieldDef>) -> Self {
        Self {
            name,
            title,
            kind: SchemaKind::Object,
            fields,
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks a raw JSON document against this type's rules.
    ///
    /// Only the type's own fields are checked; nested objects are not
    /// descended into.
    #[must_use]
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        for field in &self.fields {
            let value = document.get(field.name).filter(|v| !v.is_null());
            let Some(value) = value else {
                if field.is_required() {
                    violations.push(error(field.name, "is required".to_string()));
                }
                continue;
            };
            if field.is_required() && is_blank(value) {
                violations.push(error(field.name, "is required".to_string()));
                continue;
            }
            if !field.options.is_empty() {
                if let Some(s) = value.as_str() {
                    if !field.options.iter().any(|o| o.value == s) {
                        violations.push(error(field.name, format!("`{s}` is not an allowed value")));
                    }
                }
            }
            for rule in &field.rules {
                if let Some(violation) = check_rule(field.name, rule, value) {
                    violations.push(violation);
                }
            }
        }
        violations
    }
}

fn error(field: &'static str, message: String) -> Violation {
    Violation {
        field,
        message,
        severity: Severity::Error,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.get("current").is_some_and(|c| c.as_str().is_some_and(str::is_empty)),
        _ => false,
    }
}

#[allow(clippy::cast_precision_loss)]
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => Some(items.len() as f64),
        Value::String(s) => Some(s.chars().count() as f64),
        _ => None,
    }
}

fn check_rule(field: &'static str, rule: &Rule, value: &Value) -> Option<Violation> {
    match rule {
        Rule::Required => None,
        Rule::Min { value: min } => measure(value)
            .filter(|m| m < min)
            .map(|_| error(field, format!("must be at least {min}"))),
        Rule::Max { value: max } => measure(value)
            .filter(|m| m > max)
            .map(|_| error(field, format!("must be at most {max}"))),
        Rule::Length { value: len } => value
            .as_str()
            .filter(|s| s.chars().count() != *len)
            .map(|_| error(field, format!("must be exactly {len} characters"))),
        Rule::Uppercase => value
            .as_str()
            .filter(|s| s.chars().any(char::is_lowercase))
            .map(|_| error(field, "must be upper case".to_string())),
        Rule::MaxLengthWarning { value: max, message } => value
            .as_str()
            .filter(|s| s.chars().count() > *max)
            .map(|_| Violation {
                field,
                message: (*message).to_string(),
                severity: Severity::Warning,
            }),
    }
}

const BONUS_TYPES: &[(&str, &str)] = &[
    ("Welcome Bonus", "welcome"),
    ("Reload Bonus", "reload"),
    ("Free Spins", "freespins"),
    ("No Deposit", "no-deposit"),
    ("Cashback", "cashback"),
];

const LEGAL_STATUSES: &[(&str, &str)] = &[
    ("Legal", "legal"),
    ("Restricted", "restricted"),
    ("Prohibited", "prohibited"),
    ("Unregulated", "unregulated"),
];

const PAYMENT_TYPES: &[(&str, &str)] = &[
    ("Credit/Debit Card", "card"),
    ("E-Wallet", "ewallet"),
    ("Cryptocurrency", "crypto"),
    ("Bank Transfer", "bank"),
    ("Prepaid", "prepaid"),
];

const PAGE_BLOCKS: &[&str] = &[
    "heroBlock",
    "richTextBlock",
    "casinoListBlock",
    "comparisonTableBlock",
    "prosConsBlock",
    "ctaBlock",
    "faqBlock",
    "infoBoxBlock",
];

fn published_at() -> FieldDef {
    FieldDef::new("publishedAt", "Published At", FieldType::Datetime)
}

fn slug() -> FieldDef {
    FieldDef::new("slug", "Slug", FieldType::Slug).required()
}

fn rating(name: &'static str, title: &'static str) -> FieldDef {
    FieldDef::new(name, title, FieldType::Number).range(0.0, 5.0)
}

fn documents() -> Vec<SchemaType> {
    use FieldType as T;
    vec![
        SchemaType::document(
            "casino",
            "Casino",
            vec![
                FieldDef::new("name", "Name", T::String).required(),
                slug(),
                FieldDef::new("logo", "Logo", T::Image),
                FieldDef::new("description", "Description", T::Text),
                rating("rating", "Rating").describe("Rating from 0 to 5"),
                FieldDef::new("affiliateUrl", "Affiliate URL", T::Url)
                    .describe("The affiliate tracking URL for this casino"),
                FieldDef::new("countries", "Accepted Countries", T::Array)
                    .of(&["country"])
                    .describe("Countries where this casino accepts players"),
                FieldDef::new("paymentMethods", "Payment Methods", T::Array)
                    .of(&["paymentMethod"])
                    .describe("Payment methods accepted by this casino"),
                FieldDef::new("featured", "Featured", T::Boolean),
                published_at(),
            ],
        ),
        SchemaType::document(
            "bonus",
            "Bonus",
            vec![
                FieldDef::new("title", "Title", T::String)
                    .required()
                    .describe("e.g., \"100% up to $500\""),
                slug(),
                FieldDef::new("casino", "Casino", T::Reference)
                    .of(&["casino"])
                    .required(),
                FieldDef::new("type", "Bonus Type", T::String)
                    .options(BONUS_TYPES)
                    .required(),
                FieldDef::new("value", "Value", T::String),
                FieldDef::new("wageringRequirement", "Wagering Requirement", T::Number)
                    .describe("e.g., 35 means 35x wagering"),
                FieldDef::new("minDeposit", "Minimum Deposit", T::Number)
                    .describe("Minimum deposit in USD"),
                FieldDef::new("code", "Bonus Code", T::String),
                FieldDef::new("description", "Description", T::Text),
                FieldDef::new("terms", "Terms & Conditions", T::Text),
                FieldDef::new("featured", "Featured", T::Boolean),
                published_at(),
            ],
        ),
        SchemaType::document(
            "country",
            "Country",
            vec![
                FieldDef::new("name", "Name", T::String).required(),
                FieldDef::new("code", "Country Code", T::String)
                    .required()
                    .rule(Rule::Length { value: 2 })
                    .rule(Rule::Uppercase)
                    .describe("ISO 3166-1 alpha-2 code"),
                FieldDef::new("flag", "Flag", T::Image),
                FieldDef::new("legalStatus", "Legal Status", T::String).options(LEGAL_STATUSES),
                FieldDef::new("overview", "Overview", T::Text),
            ],
        ),
        SchemaType::document(
            "paymentMethod",
            "Payment Method",
            vec![
                FieldDef::new("name", "Name", T::String).required(),
                slug(),
                FieldDef::new("logo", "Logo", T::Image),
                FieldDef::new("type", "Type", T::String).options(PAYMENT_TYPES),
                FieldDef::new("description", "Description", T::Text),
                FieldDef::new("processingTime", "Processing Time", T::String),
                FieldDef::new("fees", "Fees", T::String),
            ],
        ),
        SchemaType::document(
            "blogPost",
            "Blog Post",
            vec![
                FieldDef::new("title", "Title", T::String).required(),
                slug(),
                FieldDef::new("excerpt", "Excerpt", T::Text),
                FieldDef::new("body", "Body", T::PortableText),
                FieldDef::new("coverImage", "Cover Image", T::Image),
                FieldDef::new("author", "Author", T::String),
                published_at(),
            ],
        ),
        SchemaType::document(
            "page",
            "Page",
            vec![
                FieldDef::new("title", "Title", T::String).required(),
                slug(),
                FieldDef::new("blocks", "Content Blocks", T::Array).of(PAGE_BLOCKS),
                FieldDef::new("seo", "SEO", T::Named).of(&["seo"]),
                published_at(),
            ],
        ),
        SchemaType::document(
            "review",
            "Review",
            vec![
                FieldDef::new("casino", "Casino", T::Reference)
                    .of(&["casino"])
                    .required(),
                slug(),
                FieldDef::new("headline", "Headline", T::String).required(),
                FieldDef::new("body", "Body", T::PortableText),
                FieldDef::new("author", "Author", T::String),
                FieldDef::new("verdict", "Verdict", T::Text),
                FieldDef::new("lastTested", "Last Tested", T::Date),
                FieldDef::new("ratings", "Ratings", T::Object)
                    .describe("overall, games, support, payout, mobile; each 0 to 5"),
                FieldDef::new("pros", "Pros", T::Array).of(&["string"]),
                FieldDef::new("cons", "Cons", T::Array).of(&["string"]),
                FieldDef::new("seo", "SEO", T::Named).of(&["seo"]),
                published_at(),
            ],
        ),
    ]
}

fn objects() -> Vec<SchemaType> {
    use FieldType as T;
    vec![
        SchemaType::object(
            "seo",
            "SEO",
            vec![
                FieldDef::new("metaTitle", "Meta Title", T::String).rule(Rule::MaxLengthWarning {
                    value: 70,
                    message: "Keep under 60 characters for best results",
                }),
                FieldDef::new("metaDescription", "Meta Description", T::Text).rule(
                    Rule::MaxLengthWarning {
                        value: 170,
                        message: "Keep under 160 characters for best results",
                    },
                ),
                FieldDef::new("ogImage", "Social Image", T::Image),
                FieldDef::new("noIndex", "Hide from search engines", T::Boolean),
            ],
        ),
        SchemaType::object(
            "heroBlock",
            "Hero",
            vec![
                FieldDef::new("title", "Title", T::String).required(),
                FieldDef::new("subtitle", "Subtitle", T::Text),
                FieldDef::new("image", "Image", T::Image),
                FieldDef::new("imagePosition", "Image Position", T::String).options(&[
                    ("Background (Full)", "background"),
                    ("Right Side", "right"),
                    ("Left Side", "left"),
                ]),
                FieldDef::new("cta", "Call to Action", T::Object),
                FieldDef::new("overlay", "Dark Overlay", T::Boolean),
            ],
        ),
        SchemaType::object(
            "richTextBlock",
            "Rich Text",
            vec![FieldDef::new("content", "Content", T::PortableText)],
        ),
        SchemaType::object(
            "casinoListBlock",
            "Casino List",
            vec![
                FieldDef::new("title", "Title", T::String),
                FieldDef::new("subtitle", "Subtitle", T::String),
                FieldDef::new("displayMode", "Display Mode", T::String).options(&[
                    ("Automatic (by filters)", "automatic"),
                    ("Manual Selection", "manual"),
                ]),
                FieldDef::new("manualCasinos", "Casinos", T::Array).of(&["casino"]),
                FieldDef::new("filter", "Filter", T::String).options(&[
                    ("All Casinos", "all"),
                    ("Featured Only", "featured"),
                    ("Highest Rated", "top-rated"),
                    ("Newest", "newest"),
                ]),
                FieldDef::new("limit", "Limit", T::Number).range(1.0, 20.0),
                FieldDef::new("columns", "Columns", T::Number).range(2.0, 4.0),
                FieldDef::new("showViewAllLink", "Show \"View All\" Link", T::Boolean),
            ],
        ),
        SchemaType::object(
            "comparisonTableBlock",
            "Comparison Table",
            vec![
                FieldDef::new("title", "Title", T::String),
                FieldDef::new("casinos", "Casinos", T::Array)
                    .of(&["casino"])
                    .range(2.0, 5.0),
                FieldDef::new("columns", "Columns", T::Array).options(&[
                    ("Rating", "rating"),
                    ("Welcome Bonus", "bonus"),
                    ("Min Deposit", "minDeposit"),
                    ("Payout Speed", "payoutSpeed"),
                    ("License", "license"),
                ]),
                FieldDef::new("highlightWinner", "Highlight Winner", T::Boolean),
            ],
        ),
        SchemaType::object(
            "prosConsBlock",
            "Pros & Cons",
            vec![
                FieldDef::new("title", "Title", T::String),
                FieldDef::new("pros", "Pros", T::Array).of(&["string"]),
                FieldDef::new("cons", "Cons", T::Array).of(&["string"]),
            ],
        ),
        SchemaType::object(
            "ctaBlock",
            "Call to Action",
            vec![
                FieldDef::new("text", "Button Text", T::String).required(),
                FieldDef::new("url", "Button URL", T::String).required(),
                FieldDef::new("variant", "Variant", T::String).options(&[
                    ("Primary (Red)", "primary"),
                    ("Accent (Gold)", "accent"),
                    ("Secondary (Gray)", "secondary"),
                ]),
                FieldDef::new("size", "Size", T::String).options(&[
                    ("Small", "sm"),
                    ("Medium", "md"),
                    ("Large", "lg"),
                ]),
                FieldDef::new("centered", "Centered", T::Boolean),
            ],
        ),
        SchemaType::object(
            "faqBlock",
            "FAQ",
            vec![
                FieldDef::new("title", "Title", T::String),
                FieldDef::new("items", "Questions", T::Array)
                    .of(&["faqItem"])
                    .rule(Rule::Min { value: 1.0 }),
            ],
        ),
        SchemaType::object(
            "infoBoxBlock",
            "Info Box",
            vec![
                FieldDef::new("title", "Title", T::String),
                FieldDef::new("content", "Content", T::Text).required(),
                FieldDef::new("variant", "Variant", T::String).options(&[
                    ("Info (Blue)", "info"),
                    ("Warning (Yellow)", "warning"),
                    ("Success (Green)", "success"),
                    ("Danger (Red)", "danger"),
                ]),
            ],
        ),
    ]
}

static CATALOG: LazyLock<Vec<SchemaType>> = LazyLock::new(|| {
    let mut types = documents();
    types.extend(objects());
    types
});

/// The full schema catalog: documents first, then objects.
#[must_use]
pub fn catalog() -> &'static [SchemaType] {
    &CATALOG
}

/// Looks up a schema type by name.
#[must_use]
pub fn schema_type(name: &str) -> Option<&'static SchemaType> {
    catalog().iter().find(|t| t.name == name)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lookup(name: &str) -> &'static SchemaType {
        let Some(schema) = schema_type(name) else {
            panic!("{name} should be in the catalog");
        };
        schema
    }

    #[test]
    fn every_document_type_has_a_schema() {
        for doc_type in DocumentType::ALL {
            assert_eq!(lookup(doc_type.as_str()).kind, SchemaKind::Document);
        }
        assert_eq!(lookup("ctaBlock").kind, SchemaKind::Object);
    }

    #[test]
    fn document_type_round_trips_type_name() {
        assert_eq!(
            DocumentType::from_type_name("paymentMethod"),
            Some(DocumentType::PaymentMethod)
        );
        assert_eq!(DocumentType::from_type_name("sanity.imageAsset"), None);
    }

    #[test]
    fn valid_casino_passes() {
        let doc = json!({"name": "Lucky", "slug": {"current": "lucky"}, "rating": 4.2});
        assert!(lookup("casino").validate(&doc).is_empty());
    }

    #[test]
    fn missing_required_and_out_of_range_are_reported() {
        let doc = json!({"slug": {"current": ""}, "rating": 7});
        let violations = lookup("casino").validate(&doc);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "slug", "rating"]);
    }

    #[test]
    fn country_code_rules() {
        let doc = json!({"name": "Germany", "code": "deu"});
        let violations = lookup("country").validate(&doc);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.field == "code"));
    }

    #[test]
    fn bonus_type_must_be_listed() {
        let doc = json!({
            "title": "Big",
            "slug": {"current": "big"},
            "casino": {"_ref": "c1"},
            "type": "mystery"
        });
        let violations = lookup("bonus").validate(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().map(|v| v.field), Some("type"));
    }

    #[test]
    fn long_meta_title_is_a_warning() {
        let doc = json!({"metaTitle": "x".repeat(80)});
        let violations = lookup("seo").validate(&doc);
        assert_eq!(violations.first().map(|v| v.severity), Some(Severity::Warning));
    }
}
