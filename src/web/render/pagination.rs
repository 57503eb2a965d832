//! Numbered pagination control.

use maud::{Markup, html};

/// One slot in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Link to a page.
    Page(u32),
    /// Gap marker.
    Ellipsis,
}

/// Page slots: first, last, the current page and its neighbours, with
/// ellipses over gaps.
#[must_use]
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let mut items = vec![PageItem::Page(1)];
    if current > 3 {
        items.push(PageItem::Ellipsis);
    }
    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total.saturating_sub(1));
    items.extend((start..=end).map(PageItem::Page));
    if current + 2 < total {
        items.push(PageItem::Ellipsis);
    }
    if total > 1 {
        items.push(PageItem::Page(total));
    }
    items
}

/// URL of `page` under `base_path`, preserving `params`.
///
/// Page 1 carries no `page` parameter.
#[must_use]
pub fn page_href(base_path: &str, page: u32, params: &[(&str, String)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter().filter(|(key, _)| *key != "page") {
        query.append_pair(key, value);
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }
    let query = query.finish();
    if query.is_empty() {
        base_path.to_string()
    } else {
        format!("{base_path}?{query}")
    }
}

/// Renders the control; nothing when there is a single page.
pub fn pagination(base_path: &str, current: u32, total: u32, params: &[(&str, String)]) -> Markup {
    if total <= 1 {
        return html! {};
    }
    let current = current.clamp(1, total);
    html! {
        nav class="pagination" aria-label="Pagination" {
            @if current > 1 {
                a href=(page_href(base_path, current - 1, params)) rel="prev" { "‹ Prev" }
            } @else {
                span class="disabled" { "‹ Prev" }
            }
            @for item in page_items(current, total) {
                @match item {
                    PageItem::Page(page) if page == current => {
                        a class="current" href=(page_href(base_path, page, params)) aria-current="page" { (page) }
                    }
                    PageItem::Page(page) => {
                        a href=(page_href(base_path, page, params)) { (page) }
                    }
                    PageItem::Ellipsis => {
                        span { "…" }
                    }
                }
            }
            @if current < total {
                a href=(page_href(base_path, current + 1, params)) rel="next" { "Next ›" }
            } @else {
                span class="disabled" { "Next ›" }
            }
        }
    }
}
