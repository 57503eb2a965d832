//! Portable text to HTML.

use maud::{Markup, html};

use super::RenderContext;
use super::components::is_safe_href;
use crate::domain::ImageRef;
use crate::domain::portable_text::{PortableTextBlock, Span};

enum Segment<'a> {
    Block(&'a PortableTextBlock),
    List(&'a str, &'a [PortableTextBlock]),
}

/// Splits a body into single blocks and runs of same-kind list items.
fn segments(blocks: &[PortableTextBlock]) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = blocks;
    while let Some((first, tail)) = rest.split_first() {
        if let Some(kind) = first.list_item.as_deref() {
            let run = rest
                .iter()
                .take_while(|b| b.list_item.as_deref() == Some(kind))
                .count();
            let (items, tail) = rest.split_at(run);
            out.push(Segment::List(kind, items));
            rest = tail;
        } else {
            out.push(Segment::Block(first));
            rest = tail;
        }
    }
    out
}

/// Renders a portable text body.
///
/// Consecutive list items of the same kind are grouped into one `<ul>`
/// or `<ol>`.
pub fn render(ctx: &RenderContext<'_>, blocks: &[PortableTextBlock]) -> Markup {
    html! {
        div class="prose" {
            @for segment in segments(blocks) {
                @match segment {
                    Segment::Block(b) => { (block(ctx, b)) }
                    Segment::List(kind, items) => { (list(ctx, kind, items)) }
                }
            }
        }
    }
}

fn list(ctx: &RenderContext<'_>, kind: &str, items: &[PortableTextBlock]) -> Markup {
    html! {
        @if kind == "number" {
            ol { @for item in items { li { (spans(ctx, item)) } } }
        } @else {
            ul { @for item in items { li { (spans(ctx, item)) } } }
        }
    }
}

fn block(ctx: &RenderContext<'_>, block: &PortableTextBlock) -> Markup {
    match block.block_type.as_str() {
        "block" => {
            let content = spans(ctx, block);
            match block.style.as_deref().unwrap_or("normal") {
                "h2" => html! { h2 { (content) } },
                "h3" => html! { h3 { (content) } },
                "h4" => html! { h4 { (content) } },
                "blockquote" => html! { blockquote { (content) } },
                _ => html! { p { (content) } },
            }
        }
        "image" => image(ctx, block),
        other => {
            tracing::debug!(block_type = other, "skipping unsupported portable text block");
            html! {}
        }
    }
}

fn image(ctx: &RenderContext<'_>, block: &PortableTextBlock) -> Markup {
    let url = block.asset.as_ref().and_then(|asset| {
        let image = ImageRef { asset: asset.clone() };
        ctx.image_url(&image, 800, 450)
    });
    html! {
        @if let Some(url) = url {
            img src=(url) alt=(block.alt.as_deref().unwrap_or_default()) width="800" height="450" loading="lazy";
        }
    }
}

fn spans(ctx: &RenderContext<'_>, block: &PortableTextBlock) -> Markup {
    html! {
        @for span in &block.children {
            (marked(ctx, block, span, &span.marks))
        }
    }
}

/// Wraps `span` in its marks, outermost first.
fn marked(ctx: &RenderContext<'_>, block: &PortableTextBlock, span: &Span, marks: &[String]) -> Markup {
    let Some((mark, inner)) = marks.split_first() else {
        return html! { (span.text) };
    };
    let content = marked(ctx, block, span, inner);
    match mark.as_str() {
        "strong" => html! { strong { (content) } },
        "em" => html! { em { (content) } },
        "code" => html! { code { (content) } },
        "underline" => html! { u { (content) } },
        "strike-through" => html! { s { (content) } },
        key => match block.mark_def(key) {
            Some(def) if def.mark_type == "link" => {
                let href = def.href.as_deref().filter(|h| is_safe_href(h));
                let new_tab = def.open_in_new_tab.unwrap_or(false);
                html! {
                    @if let Some(href) = href {
                        @if new_tab {
                            a href=(href) target="_blank" rel="noopener noreferrer" { (content) }
                        } @else {
                            a href=(href) { (content) }
                        }
                    } @else {
                        (content)
                    }
                }
            }
            _ => content,
        },
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::test_config;

    fn parse(json: &str) -> Vec<PortableTextBlock> {
        let Ok(blocks) = serde_json::from_str(json) else {
            panic!("portable text should parse");
        };
        blocks
    }

    fn render_json(json: &str) -> String {
        let config = test_config(&[]);
        render(&RenderContext::new(&config), &parse(json)).into_string()
    }

    #[test]
    fn headings_and_quotes() {
        let html = render_json(
            r#"[
              {"_type":"block","_key":"a","style":"h2","children":[{"text":"Title","marks":[]}]},
              {"_type":"block","_key":"b","style":"blockquote","children":[{"text":"Quote","marks":[]}]},
              {"_type":"block","_key":"c","children":[{"text":"Body","marks":[]}]}
            ]"#,
        );
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<blockquote>Quote</blockquote>"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn list_items_are_grouped() {
        let html = render_json(
            r#"[
              {"_type":"block","_key":"a","listItem":"bullet","children":[{"text":"one","marks":[]}]},
              {"_type":"block","_key":"b","listItem":"bullet","children":[{"text":"two","marks":[]}]},
              {"_type":"block","_key":"c","listItem":"number","children":[{"text":"three","marks":[]}]}
            ]"#,
        );
        assert!(html.contains("<ul><li>one</li><li>two</li></ul>"));
        assert!(html.contains("<ol><li>three</li></ol>"));
    }

    #[test]
    fn marks_and_links() {
        let html = render_json(
            r#"[{"_type":"block","_key":"a","children":[
                {"text":"bold","marks":["strong"]},
                {"text":"site","marks":["l1","em"]},
                {"text":"bad","marks":["l2"]}
              ],
              "markDefs":[
                {"_key":"l1","_type":"link","href":"https://x.test","openInNewTab":true},
                {"_key":"l2","_type":"link","href":"javascript:alert(1)"}
              ]}]"#,
        );
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(
            r#"<a href="https://x.test" target="_blank" rel="noopener noreferrer"><em>site</em></a>"#
        ));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("bad"));
    }

    #[test]
    fn text_is_escaped() {
        let html = render_json(
            r#"[{"_type":"block","_key":"a","children":[{"text":"<script>","marks":[]}]}]"#,
        );
        assert!(html.contains("&lt;script&gt;"));
    }
}
