//! schema.org structured data.

use maud::{Markup, PreEscaped, html};
use serde_json::{Value, json};

use super::RenderContext;
use crate::domain::{Bonus, Casino, Review};

const CONTEXT: &str = "https://schema.org";

/// Renders one `<script type="application/ld+json">` per document.
///
/// `<` is escaped so string values cannot close the script element.
pub fn scripts(documents: &[Value]) -> Markup {
    html! {
        @for doc in documents {
            script type="application/ld+json" {
                (PreEscaped(doc.to_string().replace('<', "\\u003c")))
            }
        }
    }
}

/// The site publisher.
pub fn organization(ctx: &RenderContext<'_>) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "name": ctx.site_name(),
        "url": ctx.site_url(),
        "logo": ctx.absolute("/logo.png"),
        "sameAs": [],
    })
}

/// The site with its casino search action.
pub fn website(ctx: &RenderContext<'_>) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "WebSite",
        "name": ctx.site_name(),
        "url": ctx.site_url(),
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": ctx.absolute("/casinos?q={search_term_string}"),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// A casino as an Organization, with its aggregate rating when rated.
pub fn casino(ctx: &RenderContext<'_>, casino: &Casino) -> Value {
    let url = ctx.absolute(&format!("/casinos/{}", casino.slug.as_str()));
    let mut doc = json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "@id": format!("{url}#organization"),
        "name": casino.name,
        "url": url,
        "description": casino.description,
    });
    if let (Some(rating), Some(obj)) = (casino.rating.filter(|r| *r > 0.0), doc.as_object_mut()) {
        obj.insert(
            "aggregateRating".to_string(),
            json!({
                "@type": "AggregateRating",
                "ratingValue": rating,
                "bestRating": 5,
                "worstRating": 0,
                "ratingCount": 1,
            }),
        );
    }
    doc
}

/// Editorial rating of a casino; `None` when the casino is unrated.
pub fn casino_review(ctx: &RenderContext<'_>, casino: &Casino) -> Option<Value> {
    let rating = casino.rating.filter(|r| *r > 0.0)?;
    Some(review_document(ctx, &casino.name, rating, None))
}

/// Full review article.
pub fn review(ctx: &RenderContext<'_>, review: &Review) -> Option<Value> {
    let casino = review.casino.as_ref()?;
    let rating = review
        .ratings
        .as_ref()
        .and_then(|r| r.overall)
        .or(casino.rating)?;
    Some(review_document(ctx, &casino.name, rating, review.author.as_deref()))
}

fn review_document(ctx: &RenderContext<'_>, item: &str, rating: f64, author: Option<&str>) -> Value {
    let author = author.map_or_else(
        || json!({ "@type": "Organization", "name": ctx.site_name() }),
        |name| json!({ "@type": "Person", "name": name }),
    );
    json!({
        "@context": CONTEXT,
        "@type": "Review",
        "itemReviewed": { "@type": "Organization", "name": item },
        "reviewRating": {
            "@type": "Rating",
            "ratingValue": rating,
            "bestRating": 5,
            "worstRating": 0,
        },
        "author": author,
        "publisher": { "@type": "Organization", "name": ctx.site_name() },
    })
}

/// A bonus as an Offer.
pub fn bonus(ctx: &RenderContext<'_>, bonus: &Bonus) -> Value {
    let mut doc = json!({
        "@context": CONTEXT,
        "@type": "Offer",
        "name": bonus.title,
        "description": bonus.description,
        "url": ctx.absolute(&format!("/bonuses/{}", bonus.slug.as_str())),
        "seller": {
            "@type": "Organization",
            "name": bonus.casino.as_ref().map(|c| c.name.as_str()),
        },
    });
    if let (Some(value), Some(obj)) = (bonus.value.as_deref(), doc.as_object_mut()) {
        obj.insert(
            "priceSpecification".to_string(),
            json!({
                "@type": "PriceSpecification",
                "price": 0,
                "priceCurrency": "USD",
                "description": value,
            }),
        );
    }
    doc
}

/// Breadcrumb trail of `(name, path)` pairs.
pub fn breadcrumbs(ctx: &RenderContext<'_>, items: &[(&str, &str)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": name,
                "item": ctx.absolute(path),
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// Generic web page.
pub fn web_page(ctx: &RenderContext<'_>, title: &str, description: &str, path: &str) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "WebPage",
        "name": title,
        "description": description,
        "url": ctx.absolute(path),
        "isPartOf": {
            "@type": "WebSite",
            "name": ctx.site_name(),
            "url": ctx.site_url(),
        },
    })
}
