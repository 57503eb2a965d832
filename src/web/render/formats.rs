//! List presentation strategies.
//!
//! Casino and bonus listings render either as a card grid or as a dense
//! comparison table. The choice comes from the `format` query parameter
//! and falls back to the site-wide default.

use maud::{Markup, html};

use super::RenderContext;
use super::components::{badge, bonus_card, casino_card, logo, rating, visit_button};
use crate::config::SiteFormat;
use crate::domain::casino::highest_rated;
use crate::domain::{Bonus, BonusType, Casino};

/// How a list of casinos or bonuses is laid out.
pub trait ListFormat: Send + Sync + std::fmt::Debug {
    /// Renders casinos; `total` adds a "Showing N of T" line.
    fn casino_list(&self, ctx: &RenderContext<'_>, casinos: &[Casino], total: Option<u32>) -> Markup;

    /// Renders bonuses; `total` adds a "Showing N of T" line.
    fn bonus_list(&self, ctx: &RenderContext<'_>, bonuses: &[Bonus], total: Option<u32>) -> Markup;
}

/// Card grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardGrid;

/// Ranked table with the best entry highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonTable;

static CARD_GRID: CardGrid = CardGrid;
static COMPARISON_TABLE: ComparisonTable = ComparisonTable;

/// The strategy for a resolved format.
#[must_use]
pub fn format_for(format: SiteFormat) -> &'static dyn ListFormat {
    match format {
        SiteFormat::Default => &CARD_GRID,
        SiteFormat::Comparison => &COMPARISON_TABLE,
    }
}

/// Resolves the `format` query value against the site default.
///
/// Unknown values fall back to the default.
#[must_use]
pub fn resolve_format(requested: Option<&str>, site_default: SiteFormat) -> SiteFormat {
    requested.and_then(SiteFormat::parse).unwrap_or(site_default)
}

fn empty(noun: &str) -> Markup {
    html! { div class="empty" { p { "No " (noun) " found." } } }
}

fn showing(shown: usize, total: Option<u32>, noun: &str) -> Markup {
    html! {
        @if let Some(total) = total {
            p class="count" { "Showing " (shown) " of " (total) " " (noun) }
        }
    }
}

impl ListFormat for CardGrid {
    fn casino_list(&self, ctx: &RenderContext<'_>, casinos: &[Casino], total: Option<u32>) -> Markup {
        if casinos.is_empty() {
            return empty("casinos");
        }
        html! {
            (showing(casinos.len(), total, "casinos"))
            div class="grid cols-3" {
                @for casino in casinos {
                    (casino_card(ctx, casino, None))
                }
            }
        }
    }

    fn bonus_list(&self, ctx: &RenderContext<'_>, bonuses: &[Bonus], total: Option<u32>) -> Markup {
        if bonuses.is_empty() {
            return empty("bonuses");
        }
        html! {
            (showing(bonuses.len(), total, "bonuses"))
            div class="grid cols-3" {
                @for bonus in bonuses {
                    (bonus_card(ctx, bonus))
                }
            }
        }
    }
}

/// The bonus to highlight: a no-deposit offer, else a featured one,
/// else the first.
#[must_use]
pub fn best_bonus(bonuses: &[Bonus]) -> Option<&Bonus> {
    bonuses
        .iter()
        .find(|b| b.bonus_type == Some(BonusType::NoDeposit))
        .or_else(|| bonuses.iter().find(|b| b.featured.unwrap_or(false)))
        .or_else(|| bonuses.first())
}

fn rank_cell(rank: usize) -> Markup {
    html! {
        td { span class=(if rank == 1 { "rank first" } else { "rank" }) { (rank) } }
    }
}

fn bonus_type_variant(kind: BonusType) -> &'static str {
    match kind {
        BonusType::NoDeposit => "success",
        BonusType::Welcome => "premium",
        _ => "default",
    }
}

impl ListFormat for ComparisonTable {
    fn casino_list(&self, ctx: &RenderContext<'_>, casinos: &[Casino], total: Option<u32>) -> Markup {
        let Some(best) = highest_rated(casinos) else {
            return empty("casinos");
        };
        html! {
            (showing(casinos.len(), total, "casinos"))
            div class="table-wrap" {
                table class="compare" {
                    thead {
                        tr {
                            th { "#" }
                            th { "Casino" }
                            th { "Rating" }
                            th { "Min Deposit" }
                            th { "Payout Speed" }
                            th { "Action" }
                        }
                    }
                    tbody {
                        @for (index, casino) in casinos.iter().enumerate() {
                            tr class=[(casino.id == best.id).then_some("highlight")] {
                                (rank_cell(index + 1))
                                td {
                                    div class="card-head" {
                                        (logo(ctx, casino.logo.as_ref(), &casino.name, 48))
                                        div {
                                            a href=(format!("/casinos/{}", casino.slug.as_str())) { (casino.name) }
                                            @if casino.is_featured() {
                                                " " (badge("Featured", "premium"))
                                            }
                                        }
                                    }
                                }
                                td { (rating(casino.rating)) }
                                td { (casino.min_deposit.map_or_else(|| "-".to_string(), |m| format!("${m}"))) }
                                td { (casino.withdrawal_time.as_deref().unwrap_or("-")) }
                                td { (visit_button(casino.slug.as_str(), "Play Now")) }
                            }
                        }
                    }
                }
            }
        }
    }

    fn bonus_list(&self, ctx: &RenderContext<'_>, bonuses: &[Bonus], total: Option<u32>) -> Markup {
        let Some(best) = best_bonus(bonuses) else {
            return empty("bonuses");
        };
        html! {
            (showing(bonuses.len(), total, "bonuses"))
            div class="table-wrap" {
                table class="compare" {
                    thead {
                        tr {
                            th { "#" }
                            th { "Casino" }
                            th { "Bonus" }
                            th { "Type" }
                            th { "Wagering" }
                            th { "Min Dep." }
                            th { "Code" }
                            th { "Action" }
                        }
                    }
                    tbody {
                        @for (index, bonus) in bonuses.iter().enumerate() {
                            @let casino = bonus.casino.as_ref();
                            tr class=[(bonus.id == best.id).then_some("highlight")] {
                                (rank_cell(index + 1))
                                td {
                                    div class="card-head" {
                                        @if let Some(casino) = casino {
                                            (logo(ctx, casino.logo.as_ref(), &casino.name, 40))
                                            span { (casino.name) }
                                        } @else {
                                            span class="logo-img" { "?" }
                                        }
                                    }
                                }
                                td {
                                    a href=(format!("/bonuses/{}", bonus.slug.as_str())) { (bonus.title) }
                                    @if bonus.featured.unwrap_or(false) {
                                        " " (badge("Hot", "premium"))
                                    }
                                }
                                td {
                                    @if let Some(kind) = bonus.bonus_type {
                                        (badge(kind.label(), bonus_type_variant(kind)))
                                    }
                                }
                                td { (bonus.wagering_requirement.map_or_else(|| "-".to_string(), |w| format!("{w}x"))) }
                                td { (bonus.min_deposit.map_or_else(|| "-".to_string(), |m| format!("${m}"))) }
                                td {
                                    @if let Some(code) = bonus.code.as_deref() {
                                        span class="code" { (code) }
                                    } @else {
                                        "-"
                                    }
                                }
                                td {
                                    @if let Some(casino) = casino {
                                        (visit_button(casino.slug.as_str(), "Claim"))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::casino::tests::casino;
    use crate::test_support::test_config;

    #[test]
    fn query_parameter_beats_site_default() {
        assert_eq!(resolve_format(Some("comparison"), SiteFormat::Default), SiteFormat::Comparison);
        assert_eq!(resolve_format(Some("default"), SiteFormat::Comparison), SiteFormat::Default);
    }

    #[test]
    fn unknown_format_falls_back_to_site_default() {
        assert_eq!(resolve_format(Some("tiles"), SiteFormat::Comparison), SiteFormat::Comparison);
        assert_eq!(resolve_format(None, SiteFormat::Default), SiteFormat::Default);
    }

    #[test]
    fn comparison_highlights_highest_rated() {
        let config = test_config(&[]);
        let ctx = RenderContext::new(&config);
        let casinos = [casino("low", Some(3.0)), casino("top", Some(4.8))];
        let html = format_for(SiteFormat::Comparison)
            .casino_list(&ctx, &casinos, Some(20))
            .into_string();
        assert_eq!(html.matches(r#"class="highlight""#).count(), 1);
        let highlighted = html.split(r#"class="highlight""#).nth(1).unwrap_or_default();
        assert!(highlighted.contains("Casino top"));
        assert!(html.contains("Showing 2 of 20 casinos"));
    }

    #[test]
    fn empty_lists_render_a_notice() {
        let config = test_config(&[]);
        let ctx = RenderContext::new(&config);
        for format in [SiteFormat::Default, SiteFormat::Comparison] {
            let html = format_for(format).casino_list(&ctx, &[], None).into_string();
            assert!(html.contains("No casinos found."));
            let html = format_for(format).bonus_list(&ctx, &[], None).into_string();
            assert!(html.contains("No bonuses found."));
        }
    }

    #[test]
    fn card_grid_links_each_casino() {
        let config = test_config(&[]);
        let ctx = RenderContext::new(&config);
        let html = CardGrid
            .casino_list(&ctx, &[casino("a", None), casino("b", None)], None)
            .into_string();
        assert!(html.contains(r#"href="/casinos/a""#));
        assert!(html.contains(r#"href="/go/b""#));
        assert!(!html.contains("Showing"));
    }
}
