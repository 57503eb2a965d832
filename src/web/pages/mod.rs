//! Page handlers, one file per section of the site.

pub(super) mod blog;
pub(super) mod bonuses;
pub(super) mod casinos;
pub(super) mod countries;
pub(super) mod generic;
pub(super) mod home;
pub(super) mod info;
pub(super) mod payment_methods;
pub(super) mod reviews;
pub(super) mod sitemap;
pub(super) mod tools;

use maud::{Markup, html};

/// Page heading with an optional lead paragraph.
fn page_header(title: &str, lead: Option<&str>) -> Markup {
    html! {
        h1 class="page-title" { (title) }
        @if let Some(lead) = lead {
            p class="lead" { (lead) }
        }
    }
}

/// Visible breadcrumb trail of `(name, path)` pairs; the last is current.
fn breadcrumb_nav(items: &[(&str, &str)]) -> Markup {
    let last = items.len().saturating_sub(1);
    html! {
        nav class="meta" aria-label="Breadcrumb" style="margin-bottom:1rem" {
            @for (index, (name, path)) in items.iter().enumerate() {
                @if index == last {
                    span aria-current="page" { (name) }
                } @else {
                    a href=(path) { (name) }
                    " / "
                }
            }
        }
    }
}

/// `dt`/`dd` fact grid, skipping empty values.
fn facts(entries: &[(&str, Option<String>)]) -> Markup {
    html! {
        dl class="facts" {
            @for (label, value) in entries {
                @if let Some(value) = value {
                    div {
                        dt { (label) }
                        dd { (value) }
                    }
                }
            }
        }
    }
}
