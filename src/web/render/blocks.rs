//! Page-builder block rendering.

use maud::{Markup, html};

use super::RenderContext;
use super::components::{casino_card, is_safe_href, logo, rating, visit_button};
use super::portable_text;
use crate::domain::PageBlock;
use crate::domain::block::{
    ButtonSize, ButtonVariant, CasinoListBlock, ComparisonColumn, ComparisonTableBlock, CtaBlock,
    FaqBlock, HeroBlock, ImagePosition, InfoBoxBlock, InfoVariant, ProsConsBlock,
};
use crate::domain::casino::highest_rated;
use crate::domain::Casino;

/// Renders blocks in order.
pub fn render_blocks(ctx: &RenderContext<'_>, blocks: &[PageBlock]) -> Markup {
    html! {
        @for block in blocks {
            (render_block(ctx, block))
        }
    }
}

/// Renders one block. Unknown block types render nothing.
pub fn render_block(ctx: &RenderContext<'_>, block: &PageBlock) -> Markup {
    match block {
        PageBlock::Hero(hero) => render_hero(ctx, hero),
        PageBlock::RichText(text) => html! {
            section class="section" { (portable_text::render(ctx, &text.content)) }
        },
        PageBlock::CasinoList(list) => casino_list(ctx, list),
        PageBlock::ComparisonTable(table) => comparison_table(ctx, table),
        PageBlock::ProsCons(pros_cons) => pros_and_cons(pros_cons),
        PageBlock::Cta(cta) => call_to_action(cta),
        PageBlock::Faq(faq) => faq_section(faq),
        PageBlock::InfoBox(info) => info_box(info),
        PageBlock::Unknown { key, block_type } => {
            tracing::warn!(block_type = %block_type, key = %key, "unknown page block type");
            html! {}
        }
    }
}

/// Hero banner.
pub fn render_hero(ctx: &RenderContext<'_>, hero: &HeroBlock) -> Markup {
    let image = hero.image.as_ref().and_then(|img| ctx.image_url(img, 1600, 900));
    let position = match hero.image_position {
        ImagePosition::Background => "background",
        ImagePosition::Left => "image-left",
        ImagePosition::Right => "image-right",
    };
    let cta = hero.cta.as_ref().filter(|c| !c.text.is_empty() && is_safe_href(&c.url));
    let text = html! {
        div class="hero-body" {
            h1 { (hero.title) }
            @if let Some(subtitle) = hero.subtitle.as_deref() {
                p { (subtitle) }
            }
            @if let Some(cta) = cta {
                a class="btn btn-accent btn-lg" href=(cta.url) { (cta.text) }
            }
        }
    };
    html! {
        section class=(format!("hero {position}")) {
            @match (hero.image_position, image) {
                (ImagePosition::Background, Some(url)) => {
                    img class="hero-bg" src=(url) alt="" loading="eager";
                    @if hero.overlay.unwrap_or(true) {
                        div class="hero-overlay" {}
                    }
                    (text)
                }
                (_, Some(url)) => {
                    img src=(url) alt=(hero.title) width="640" height="360";
                    (text)
                }
                (_, None) => { (text) }
            }
        }
    }
}

fn section_heading(title: Option<&str>, subtitle: Option<&str>) -> Markup {
    html! {
        @if let Some(title) = title {
            h2 { (title) }
        }
        @if let Some(subtitle) = subtitle {
            p class="lead" { (subtitle) }
        }
    }
}

fn casino_list(ctx: &RenderContext<'_>, list: &CasinoListBlock) -> Markup {
    html! {
        section class="section" {
            (section_heading(list.title.as_deref(), list.subtitle.as_deref()))
            @if list.manual_casinos.is_empty() {
                div class="empty" { p { "No casinos found." } }
            } @else {
                div class=(format!("grid cols-{}", list.effective_columns())) {
                    @for casino in &list.manual_casinos {
                        (casino_card(ctx, casino, None))
                    }
                }
            }
            @if list.show_view_all_link.unwrap_or(true) {
                p class="cta centered" {
                    a class="btn btn-secondary" href="/casinos" { "View All Casinos →" }
                }
            }
        }
    }
}

fn comparison_cell(casino: &Casino, column: ComparisonColumn) -> Markup {
    match column {
        ComparisonColumn::Rating => rating(casino.rating),
        ComparisonColumn::Bonus => html! { "See website" },
        ComparisonColumn::MinDeposit => {
            html! { (casino.min_deposit.map_or_else(|| "-".to_string(), |m| format!("${m}"))) }
        }
        ComparisonColumn::PayoutSpeed => html! { (casino.withdrawal_time.as_deref().unwrap_or("-")) },
        ComparisonColumn::License => {
            html! { (if casino.licenses.is_empty() { "-".to_string() } else { casino.licenses.join(", ") }) }
        }
    }
}

fn comparison_table(ctx: &RenderContext<'_>, table: &ComparisonTableBlock) -> Markup {
    if table.casinos.is_empty() {
        return html! {};
    }
    let columns = table.effective_columns();
    let winner = table
        .highlight_winner
        .unwrap_or(true)
        .then(|| highest_rated(&table.casinos))
        .flatten();
    html! {
        section class="section" {
            (section_heading(table.title.as_deref(), None))
            div class="table-wrap" {
                table class="compare" {
                    thead {
                        tr {
                            th { "Casino" }
                            @for column in &columns {
                                th { (column.label()) }
                            }
                            th { "Action" }
                        }
                    }
                    tbody {
                        @for casino in &table.casinos {
                            @let is_winner = winner.is_some_and(|w| w.id == casino.id);
                            tr class=[is_winner.then_some("highlight")] {
                                td {
                                    div class="card-head" {
                                        (logo(ctx, casino.logo.as_ref(), &casino.name, 40))
                                        a href=(format!("/casinos/{}", casino.slug.as_str())) { (casino.name) }
                                        @if is_winner {
                                            span class="badge badge-premium" { "Best Choice" }
                                        }
                                    }
                                }
                                @for column in &columns {
                                    td { (comparison_cell(casino, *column)) }
                                }
                                td { (visit_button(casino.slug.as_str(), "Visit")) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn pros_and_cons(block: &ProsConsBlock) -> Markup {
    html! {
        section class="section" {
            (section_heading(block.title.as_deref(), None))
            div class="pros-cons" {
                div class="card pros" {
                    h3 { "Pros" }
                    ul { @for pro in &block.pros { li { (pro) } } }
                }
                div class="card cons" {
                    h3 { "Cons" }
                    ul { @for con in &block.cons { li { (con) } } }
                }
            }
        }
    }
}

fn call_to_action(cta: &CtaBlock) -> Markup {
    if cta.text.is_empty() || !is_safe_href(&cta.url) {
        return html! {};
    }
    let variant = match cta.variant {
        ButtonVariant::Primary => "btn-primary",
        ButtonVariant::Accent => "btn-accent",
        ButtonVariant::Secondary => "btn-secondary",
    };
    let size = match cta.size {
        ButtonSize::Sm => "btn-sm",
        ButtonSize::Md => "",
        ButtonSize::Lg => "btn-lg",
    };
    let class = if size.is_empty() {
        format!("btn {variant}")
    } else {
        format!("btn {variant} {size}")
    };
    let wrapper = if cta.centered.unwrap_or(true) { "cta centered" } else { "cta" };
    html! {
        div class=(wrapper) {
            a class=(class) href=(cta.url) { (cta.text) }
        }
    }
}

fn faq_section(faq: &FaqBlock) -> Markup {
    html! {
        section class="section faq" {
            (section_heading(faq.title.as_deref(), None))
            @for item in &faq.items {
                details {
                    summary { (item.question) }
                    p { (item.answer) }
                }
            }
        }
    }
}

fn info_box(info: &InfoBoxBlock) -> Markup {
    let variant = match info.variant {
        InfoVariant::Info => "info",
        InfoVariant::Warning => "warning",
        InfoVariant::Success => "success",
        InfoVariant::Danger => "danger",
    };
    html! {
        aside class=(format!("info-box {variant}")) {
            @if let Some(title) = info.title.as_deref() {
                h3 { (title) }
            }
            p { (info.content) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::block::{DisplayMode, FaqItem, LinkButton, RichTextBlock};
    use crate::domain::casino::tests::casino;
    use crate::test_support::test_config;

    fn render(block: &PageBlock) -> String {
        let config = test_config(&[]);
        render_block(&RenderContext::new(&config), block).into_string()
    }

    #[test]
    fn unknown_block_renders_nothing() {
        let block = PageBlock::Unknown {
            key: "k".to_string(),
            block_type: "videoBlock".to_string(),
        };
        assert!(render(&block).is_empty());
    }

    #[test]
    fn known_blocks_render() {
        let hero = PageBlock::Hero(HeroBlock {
            title: "Welcome".to_string(),
            cta: Some(LinkButton {
                text: "Start".to_string(),
                url: "/casinos".to_string(),
            }),
            ..HeroBlock::default()
        });
        let html = render(&hero);
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains(r#"href="/casinos""#));

        let faq = PageBlock::Faq(FaqBlock {
            title: Some("FAQ".to_string()),
            items: vec![FaqItem {
                question: "Is it safe?".to_string(),
                answer: "Yes.".to_string(),
                ..FaqItem::default()
            }],
            ..FaqBlock::default()
        });
        assert!(render(&faq).contains("<summary>Is it safe?</summary>"));

        let info = PageBlock::InfoBox(InfoBoxBlock {
            content: "Careful".to_string(),
            variant: InfoVariant::Warning,
            ..InfoBoxBlock::default()
        });
        assert!(render(&info).contains(r#"class="info-box warning""#));

        let text = PageBlock::RichText(RichTextBlock::default());
        assert!(render(&text).contains("prose"));
    }

    #[test]
    fn casino_list_uses_clamped_columns() {
        let block = PageBlock::CasinoList(CasinoListBlock {
            display_mode: DisplayMode::Manual,
            manual_casinos: vec![casino("a", Some(4.0))],
            columns: Some(9),
            show_view_all_link: Some(false),
            ..CasinoListBlock::default()
        });
        let html = render(&block);
        assert!(html.contains("grid cols-4"));
        assert!(!html.contains("View All Casinos"));
    }

    #[test]
    fn comparison_table_marks_winner() {
        let block = PageBlock::ComparisonTable(ComparisonTableBlock {
            casinos: vec![casino("a", Some(3.9)), casino("b", Some(4.7))],
            ..ComparisonTableBlock::default()
        });
        let html = render(&block);
        assert_eq!(html.matches("Best Choice").count(), 1);
        assert!(html.contains("Welcome Bonus"));

        let plain = PageBlock::ComparisonTable(ComparisonTableBlock {
            casinos: vec![casino("a", Some(3.9))],
            highlight_winner: Some(false),
            ..ComparisonTableBlock::default()
        });
        assert!(!render(&plain).contains("Best Choice"));
    }

    #[test]
    fn cta_with_unsafe_url_is_dropped() {
        let block = PageBlock::Cta(CtaBlock {
            text: "Click".to_string(),
            url: "javascript:void(0)".to_string(),
            ..CtaBlock::default()
        });
        assert!(render(&block).is_empty());
    }
}
