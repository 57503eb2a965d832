//! Shared HTML components: page shell, navigation, cards and small
//! widgets.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::RenderContext;
use crate::domain::{Bonus, Casino, ImageRef};

/// Inline CSS for every page.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#0b0d17;--card:#141829;--elevated:#1c2136;--fg:#f4f5fa;--fg2:#a8adc4;--fg3:#6b7190;--primary:#7c5cff;--accent:#f5b63a;--success:#22c55e;--warning:#f59e0b;--danger:#ef4444;--border:#262b44}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column}
a{color:var(--primary);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}
.container{max-width:1200px;width:100%;margin:0 auto;padding:0 1rem}
main{flex:1;padding:2.5rem 0}

.site-header{background:var(--card);border-bottom:1px solid var(--border);position:sticky;top:0;z-index:50}
.site-header .container{display:flex;align-items:center;justify-content:space-between;height:4rem}
.logo{font-size:1.25rem;font-weight:700;color:var(--fg)}
.logo span{color:var(--primary)}
.nav{display:flex;gap:1.75rem}
.nav a{color:var(--fg2);font-weight:500}
.btn{display:inline-block;padding:.6rem 1.25rem;border-radius:8px;font-weight:600;border:1px solid transparent;cursor:pointer}
.btn:hover{text-decoration:none}
.btn-accent{background:var(--accent);color:var(--bg)}
.btn-primary{background:var(--primary);color:#fff}
.btn-secondary{background:var(--card);color:var(--fg);border-color:var(--border)}
.btn-sm{padding:.35rem .8rem;font-size:.85rem}
.btn-lg{padding:.9rem 2rem;font-size:1.1rem}

.page-title{font-size:2.25rem;font-weight:700;margin-bottom:.5rem}
.lead{color:var(--fg2);margin-bottom:2rem}
.section{margin:3rem 0}
.section h2{font-size:1.75rem;margin-bottom:1rem}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1.5rem}
.grid.cols-2{grid-template-columns:repeat(2,1fr)}
.grid.cols-3{grid-template-columns:repeat(3,1fr)}
.grid.cols-4{grid-template-columns:repeat(4,1fr)}
@media(max-width:768px){.grid.cols-2,.grid.cols-3,.grid.cols-4{grid-template-columns:1fr}.nav{display:none}}

.card{background:var(--card);border:1px solid var(--border);border-radius:12px;padding:1.5rem}
.card h3{font-size:1.15rem;margin:.5rem 0}
.card .meta{color:var(--fg3);font-size:.85rem}
.card-head{display:flex;align-items:center;gap:.75rem}
.logo-img{width:48px;height:48px;border-radius:8px;background:var(--elevated);object-fit:contain;display:flex;align-items:center;justify-content:center;font-weight:700;color:var(--primary);flex-shrink:0}
.badge{display:inline-block;font-size:.72rem;padding:.15rem .55rem;border-radius:100px;background:var(--elevated);color:var(--fg2);border:1px solid var(--border);text-transform:uppercase;letter-spacing:.03em}
.badge-premium{background:var(--accent);color:var(--bg);border-color:var(--accent)}
.badge-success{color:var(--success)}
.badge-warning{color:var(--warning)}
.badge-danger{color:var(--danger)}
.rating{color:var(--accent);white-space:nowrap}
.rating .value{color:var(--fg2);margin-left:.35rem;font-size:.9rem}
.empty{text-align:center;padding:3rem;background:var(--card);border:1px solid var(--border);border-radius:12px;color:var(--fg2)}
.count{font-size:.9rem;color:var(--fg2);margin-bottom:1rem}

.filters{display:flex;flex-wrap:wrap;gap:.5rem;margin-bottom:1.5rem}
.filters a{padding:.35rem .9rem;border-radius:100px;border:1px solid var(--border);color:var(--fg2);font-size:.9rem}
.filters a.active{background:var(--primary);border-color:var(--primary);color:#fff}

table.compare{width:100%;border-collapse:collapse;background:var(--card);border:1px solid var(--border);border-radius:12px;overflow:hidden}
table.compare th,table.compare td{padding:.9rem 1rem;text-align:left;border-bottom:1px solid var(--border)}
table.compare th{background:var(--elevated);font-size:.75rem;text-transform:uppercase;color:var(--fg3);letter-spacing:.05em}
table.compare tr.highlight{background:rgba(124,92,255,.1)}
.rank{display:inline-flex;width:2rem;height:2rem;border-radius:50%;align-items:center;justify-content:center;background:var(--elevated);font-weight:700}
.rank.first{background:var(--accent);color:var(--bg)}
.table-wrap{overflow-x:auto}

.pagination{display:flex;justify-content:center;align-items:center;gap:.4rem;margin-top:2rem}
.pagination a,.pagination span{padding:.45rem .8rem;border-radius:8px;color:var(--fg2)}
.pagination a.current{background:var(--primary);color:#fff}
.pagination .disabled{opacity:.4}

.hero{padding:5rem 0;text-align:center;background:linear-gradient(135deg,rgba(124,92,255,.18),rgba(245,182,58,.08));border-radius:16px;margin-bottom:2rem;position:relative;overflow:hidden}
.hero h1{font-size:3rem;line-height:1.15;margin-bottom:1rem}
.hero p{font-size:1.2rem;color:var(--fg2);max-width:40rem;margin:0 auto 2rem}
.hero.image-left,.hero.image-right{display:flex;align-items:center;gap:2rem;text-align:left;padding:3rem}
.hero.image-right{flex-direction:row-reverse}
.hero .hero-bg{position:absolute;inset:0;width:100%;height:100%;object-fit:cover;z-index:0}
.hero .hero-overlay{position:absolute;inset:0;background:rgba(11,13,23,.65);z-index:1}
.hero .hero-body{position:relative;z-index:2}

.prose{color:var(--fg2);line-height:1.75}
.prose h2,.prose h3,.prose h4{color:var(--fg);margin:1.75rem 0 .75rem}
.prose p{margin:0 0 1rem}
.prose ul,.prose ol{margin:0 0 1rem 1.5rem}
.prose blockquote{border-left:4px solid var(--accent);padding-left:1rem;font-style:italic;margin:1rem 0}
.prose code{background:var(--elevated);padding:.1rem .35rem;border-radius:4px;font-size:.9em}
.prose img{border-radius:8px;margin:2rem 0}

.pros-cons{display:grid;grid-template-columns:1fr 1fr;gap:1.5rem}
.pros li::marker{content:"+ ";color:var(--success)}
.cons li::marker{content:"- ";color:var(--danger)}
.pros ul,.cons ul{margin-left:1.25rem}
.faq details{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:1rem 1.25rem;margin-bottom:.75rem}
.faq summary{cursor:pointer;font-weight:600}
.faq details p{margin-top:.75rem;color:var(--fg2)}
.info-box{border-left:4px solid var(--primary);background:var(--card);padding:1.25rem 1.5rem;border-radius:8px}
.info-box.warning{border-color:var(--warning)}
.info-box.success{border-color:var(--success)}
.info-box.danger{border-color:var(--danger)}
.cta{margin:1rem 0}
.cta.centered{text-align:center}
.facts{display:grid;grid-template-columns:repeat(auto-fill,minmax(180px,1fr));gap:1rem;margin:1.5rem 0}
.facts div{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:1rem}
.facts dt{font-size:.8rem;color:var(--fg3);text-transform:uppercase}
.facts dd{font-weight:600}
.code{font-family:ui-monospace,Menlo,monospace;background:var(--elevated);padding:.2rem .5rem;border-radius:6px;border:1px dashed var(--accent)}
form.stack{display:grid;gap:1rem;max-width:36rem}
form.stack input,form.stack textarea{width:100%;padding:.7rem .9rem;border-radius:8px;border:1px solid var(--border);background:var(--card);color:var(--fg)}

.site-footer{background:var(--card);border-top:1px solid var(--border);padding:3rem 0 2rem;margin-top:auto}
.footer-cols{display:grid;grid-template-columns:2fr 1fr 1fr 1fr;gap:2rem}
.footer-cols h3{font-size:1rem;margin-bottom:.75rem}
.footer-cols ul{list-style:none}
.footer-cols li{margin:.35rem 0}
.footer-cols a{color:var(--fg2);font-size:.9rem}
.responsible{margin-top:2rem;padding-top:1.5rem;border-top:1px solid var(--border);display:flex;justify-content:space-between;gap:1rem;color:var(--fg3);font-size:.85rem}
@media(max-width:768px){.footer-cols{grid-template-columns:1fr 1fr}.pros-cons{grid-template-columns:1fr}.responsible{flex-direction:column}}
"#;

/// `Content-Security-Policy` for rendered pages.
pub const CSP_HEADER: &str = "default-src 'self'; img-src 'self' https: data:; style-src 'unsafe-inline'; script-src 'self' 'unsafe-inline'; connect-src 'self'; frame-ancestors 'none'; base-uri 'self'";

const NAV_LINKS: [(&str, &str); 4] = [
    ("/casinos", "Casinos"),
    ("/bonuses", "Bonuses"),
    ("/countries", "Countries"),
    ("/blog", "Blog"),
];

const FOOTER_CASINO_LINKS: [(&str, &str); 4] = [
    ("/casinos", "All Casinos"),
    ("/bonuses", "Bonuses"),
    ("/countries", "By Country"),
    ("/payment-methods", "Payment Methods"),
];

const FOOTER_INFO_LINKS: [(&str, &str); 4] = [
    ("/about", "About Us"),
    ("/contact", "Contact"),
    ("/blog", "Blog"),
    ("/responsible-gambling", "Responsible Gambling"),
];

const FOOTER_LEGAL_LINKS: [(&str, &str); 2] =
    [("/privacy", "Privacy Policy"), ("/terms", "Terms of Service")];

/// Per-page `<head>` metadata.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// Page title, without the site name.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Site path used for the canonical URL.
    pub path: String,
    /// Absolute social sharing image URL.
    pub og_image: Option<String>,
    /// Emits `noindex, nofollow`.
    pub no_index: bool,
    /// `og:type`: `website` or `article`.
    pub og_type: &'static str,
}

impl PageMeta {
    /// Metadata for a `website` page.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: path.into(),
            og_image: None,
            no_index: false,
            og_type: "website",
        }
    }

    /// Marks the page as an article.
    #[must_use]
    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }

    /// Sets the sharing image.
    #[must_use]
    pub fn with_image(mut self, url: Option<String>) -> Self {
        self.og_image = url;
        self
    }

    /// Sets the `noindex` flag.
    #[must_use]
    pub fn with_no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }
}

/// Renders the full HTML document around `body`.
pub fn page_shell(ctx: &RenderContext<'_>, meta: &PageMeta, head_extra: Markup, body: Markup) -> Markup {
    let site_name = ctx.site_name();
    let title = if meta.title.is_empty() || meta.title == site_name {
        site_name.to_string()
    } else {
        format!("{} | {site_name}", meta.title)
    };
    let canonical = ctx.absolute(&meta.path);
    let og_image = meta
        .og_image
        .clone()
        .unwrap_or_else(|| ctx.absolute("/og-default.png"));

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(canonical);
                @if meta.no_index {
                    meta name="robots" content="noindex, nofollow";
                } @else {
                    meta name="robots" content="index, follow";
                }

                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(canonical);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(meta.og_type);
                meta property="og:image" content=(og_image);
                meta property="og:image:width" content="1200";
                meta property="og:image:height" content="630";

                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(meta.title);
                meta name="twitter:description" content=(meta.description);
                meta name="twitter:image" content=(og_image);

                style { (PreEscaped(PAGE_CSS)) }
                (head_extra)
            }
            body {
                (site_header())
                main { div class="container" { (body) } }
                (site_footer(site_name))
            }
        }
    }
}

fn site_header() -> Markup {
    html! {
        header class="site-header" {
            div class="container" {
                a class="logo" href="/" { span { "Casino" } " Guide" }
                nav class="nav" {
                    @for (href, label) in NAV_LINKS {
                        a href=(href) { (label) }
                    }
                }
                a class="btn btn-accent btn-sm" href="/casinos" { "Find Casino" }
            }
        }
    }
}

fn footer_column(title: &str, links: &[(&str, &str)]) -> Markup {
    html! {
        div {
            h3 { (title) }
            ul {
                @for (href, label) in links {
                    li { a href=(href) { (label) } }
                }
            }
        }
    }
}

fn site_footer(site_name: &str) -> Markup {
    let year = chrono::Utc::now().format("%Y");
    html! {
        footer class="site-footer" {
            div class="container" {
                div class="footer-cols" {
                    div {
                        a class="logo" href="/" { span { "Casino" } " Guide" }
                        p class="meta" { "Your trusted guide to online casinos and bonuses." }
                    }
                    (footer_column("Casinos", &FOOTER_CASINO_LINKS))
                    (footer_column("Information", &FOOTER_INFO_LINKS))
                    (footer_column("Legal", &FOOTER_LEGAL_LINKS))
                }
                div class="responsible" {
                    span { "18+ | Gambling can be addictive. Please play responsibly." }
                    span { "© " (year) " " (site_name) ". All rights reserved." }
                }
            }
        }
    }
}

/// Star rating out of five, with the numeric value.
pub fn rating(value: Option<f64>) -> Markup {
    let Some(value) = value else {
        return html! { span class="meta" { "-" } };
    };
    let value = value.clamp(0.0, 5.0);
    // Rounded to the nearest half star.
    let halves = (value * 2.0).round() as u8;
    let full = halves / 2;
    let half = halves % 2 == 1;
    let empty = 5 - full - u8::from(half);
    html! {
        span class="rating" aria-label=(format!("Rated {value:.1} out of 5")) {
            @for _ in 0..full { "★" }
            @if half { "⯪" }
            @for _ in 0..empty { "☆" }
            span class="value" { (format!("{value:.1}")) }
        }
    }
}

/// Logo image, or the first letter of `name` when there is none.
pub fn logo(ctx: &RenderContext<'_>, image: Option<&ImageRef>, name: &str, size: u32) -> Markup {
    let url = image.and_then(|img| ctx.image_url(img, size, size));
    html! {
        @if let Some(url) = url {
            img class="logo-img" src=(url) alt=(format!("{name} logo")) width=(size) height=(size) loading="lazy";
        } @else {
            span class="logo-img" { (initial(name)) }
        }
    }
}

fn initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// Small label pill.
pub fn badge(label: &str, variant: &str) -> Markup {
    html! {
        span class=(format!("badge badge-{variant}")) { (label) }
    }
}

/// Outbound "Visit" link through the tracked redirect.
pub fn visit_button(slug: &str, label: &str) -> Markup {
    html! {
        a class="btn btn-accent btn-sm" href=(format!("/go/{slug}")) rel="nofollow sponsored" { (label) }
    }
}

/// Casino summary card.
pub fn casino_card(ctx: &RenderContext<'_>, casino: &Casino, rank: Option<usize>) -> Markup {
    let slug = casino.slug.as_str();
    html! {
        article class="card" data-casino-id=(casino.id) {
            div class="card-head" {
                @if let Some(rank) = rank {
                    span class=(if rank == 1 { "rank first" } else { "rank" }) { (rank) }
                }
                (logo(ctx, casino.logo.as_ref(), &casino.name, 48))
                div {
                    h3 { a href=(format!("/casinos/{slug}")) { (casino.name) } }
                    (rating(casino.rating))
                }
            }
            @if casino.is_featured() {
                p { (badge("Featured", "premium")) }
            }
            @if let Some(description) = casino.description.as_deref() {
                p class="meta" { (truncate(description, 140)) }
            }
            p { (visit_button(slug, "Visit Casino")) }
        }
    }
}

/// Bonus summary card.
pub fn bonus_card(ctx: &RenderContext<'_>, bonus: &Bonus) -> Markup {
    let casino = bonus.casino.as_ref();
    html! {
        article class="card" {
            div class="card-head" {
                @if let Some(casino) = casino {
                    (logo(ctx, casino.logo.as_ref(), &casino.name, 48))
                }
                div {
                    @if let Some(kind) = bonus.bonus_type {
                        (badge(kind.label(), "default"))
                    }
                    h3 { a href=(format!("/bonuses/{}", bonus.slug.as_str())) { (bonus.title) } }
                    @if let Some(casino) = casino {
                        p class="meta" { (casino.name) }
                    }
                }
            }
            @if let Some(value) = bonus.value.as_deref() {
                p { strong { (value) } }
            }
            p class="meta" {
                @if let Some(wagering) = bonus.wagering_requirement {
                    (format!("{wagering}x wagering"))
                }
                @if let Some(min) = bonus.min_deposit {
                    " · " (format!("Min deposit ${min}"))
                }
            }
            @if let Some(code) = bonus.code.as_deref() {
                p { "Code: " span class="code" { (code) } }
            }
            @if let Some(casino) = casino {
                p { (visit_button(casino.slug.as_str(), "Claim Bonus")) }
            }
        }
    }
}

/// Truncates to at most `max_len` bytes on a character boundary,
/// appending `...` when shortened.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", s.get(..end).unwrap_or_default())
}

/// Whether `href` is safe to emit in a link.
pub fn is_safe_href(href: &str) -> bool {
    let lower = href.trim_start().to_ascii_lowercase();
    lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || lower.starts_with('/')
        || lower.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 2), "h...");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn unsafe_hrefs_rejected() {
        assert!(is_safe_href("https://example.com"));
        assert!(is_safe_href("/casinos"));
        assert!(!is_safe_href("javascript:alert(1)"));
        assert!(!is_safe_href(" JavaScript:alert(1)"));
    }

    #[test]
    fn rating_rounds_to_half_stars() {
        let html = rating(Some(3.6)).into_string();
        assert!(html.contains("★★★⯪☆"));
        assert!(html.contains("3.6"));
        assert!(rating(None).into_string().contains('-'));
    }

    #[test]
    fn shell_emits_canonical_and_noindex() {
        let config = test_config(&[("SITE_URL", "https://guide.test/")]);
        let ctx = RenderContext::new(&config);
        let meta = PageMeta::new("Casinos", "All casinos", "/casinos").with_no_index(true);
        let html = page_shell(&ctx, &meta, html! {}, html! { p { "<b>body</b>" } }).into_string();
        assert!(html.contains(r#"<link rel="canonical" href="https://guide.test/casinos">"#));
        assert!(html.contains(r#"content="noindex, nofollow""#));
        assert!(html.contains("<title>Casinos | Casino Guide</title>"));
        assert!(html.contains("&lt;b&gt;body&lt;/b&gt;"));
    }
}
