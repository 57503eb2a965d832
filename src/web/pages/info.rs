//! Static editorial pages.

use axum::extract::State;
use axum::http::Uri;
use axum::response::Response;
use maud::{Markup, PreEscaped, html};

use super::page_header;
use crate::app_state::AppState;
use crate::web::render::RenderContext;
use crate::web::render::components::{PageMeta, page_shell};
use crate::web::render::json_ld;
use crate::web::{HTML, PageError, serve_cached};

/// A heading with paragraphs and an optional bullet list.
struct Section {
    heading: &'static str,
    paragraphs: &'static [&'static str],
    bullets: &'static [&'static str],
}

struct StaticPage {
    path: &'static str,
    title: &'static str,
    description: &'static str,
    lead: &'static str,
    sections: &'static [Section],
}

static ABOUT: StaticPage = StaticPage {
    path: "/about",
    title: "About Us",
    description: "Who we are and how we review online casinos.",
    lead: "Independent reviews of online casinos, written by players for players.",
    sections: &[
        Section {
            heading: "Our Mission",
            paragraphs: &[
                "We help players find safe, licensed online casinos with fair bonuses and fast payouts. Every listing is researched and tested by our editorial team.",
            ],
            bullets: &[],
        },
        Section {
            heading: "How We Review",
            paragraphs: &["Each casino is scored against the same checklist:"],
            bullets: &[
                "Licensing and regulation",
                "Game selection and software providers",
                "Bonus offers and wagering requirements",
                "Payment methods and withdrawal times",
                "Customer support quality",
                "Mobile compatibility",
                "Security and fair play measures",
            ],
        },
        Section {
            heading: "Affiliate Disclosure",
            paragraphs: &[
                "Some links on this site are affiliate links. We may earn a commission when you sign up through them, at no extra cost to you. Commissions never influence our ratings.",
            ],
            bullets: &[],
        },
    ],
};

static PRIVACY: StaticPage = StaticPage {
    path: "/privacy",
    title: "Privacy Policy",
    description: "How we collect, use and protect your information.",
    lead: "This policy explains what information we collect and how we use it.",
    sections: &[
        Section {
            heading: "Information You Provide",
            paragraphs: &[],
            bullets: &[
                "Email address (if you subscribe to our newsletter)",
                "Any information you provide in communications with us",
            ],
        },
        Section {
            heading: "Information Collected Automatically",
            paragraphs: &[],
            bullets: &[
                "IP address and approximate location",
                "Browser type and version",
                "Pages visited and time spent on pages",
                "Referring website",
                "Device information",
            ],
        },
        Section {
            heading: "How We Use Information",
            paragraphs: &[],
            bullets: &[
                "Provide, maintain, and improve our services",
                "Send you updates and marketing communications (with your consent)",
                "Analyze website usage and trends",
                "Respond to your comments and questions",
            ],
        },
        Section {
            heading: "Cookies",
            paragraphs: &[
                "Necessary cookies are always on. Analytics and marketing cookies are only set after you accept them in the cookie banner, and you can change your choice at any time.",
            ],
            bullets: &[],
        },
    ],
};

static TERMS: StaticPage = StaticPage {
    path: "/terms",
    title: "Terms of Service",
    description: "The terms that govern your use of this website.",
    lead: "By using this website you agree to the following terms.",
    sections: &[
        Section {
            heading: "Information Only",
            paragraphs: &[
                "Content on this site is for information and entertainment. We do not operate any gambling service and do not accept wagers.",
            ],
            bullets: &[],
        },
        Section {
            heading: "Eligibility",
            paragraphs: &[
                "You must be of legal gambling age in your jurisdiction to use the casinos we list. It is your responsibility to check that online gambling is legal where you live.",
            ],
            bullets: &[],
        },
        Section {
            heading: "Third-Party Sites",
            paragraphs: &[
                "Casino terms, bonus conditions and availability are set by the operators and can change without notice. Always read the operator's terms before playing.",
            ],
            bullets: &[],
        },
    ],
};

static RESPONSIBLE_GAMBLING: StaticPage = StaticPage {
    path: "/responsible-gambling",
    title: "Responsible Gambling",
    description: "Tips, warning signs and support for safer gambling.",
    lead: "Gambling should be entertainment, never a way to make money.",
    sections: &[
        Section {
            heading: "Tips for Safer Gambling",
            paragraphs: &[],
            bullets: &[
                "Set a budget. Decide how much you can afford to lose before you start playing, and stick to it.",
                "Set time limits. Decide how long you'll play and use casino tools to track your time.",
                "Don't chase losses. If you're losing, don't try to win it back by betting more.",
                "Don't gamble when emotional. Avoid gambling when you're stressed, depressed, or upset.",
                "Take breaks. Step away regularly to maintain perspective.",
                "Balance gambling with other activities. Ensure gambling doesn't become your only hobby.",
                "Never borrow money to gamble. Only gamble with money you can afford to lose.",
            ],
        },
        Section {
            heading: "Warning Signs",
            paragraphs: &[],
            bullets: &[
                "Spending more money or time on gambling than intended",
                "Feeling restless or irritable when trying to stop gambling",
                "Trying to win back money you've lost (chasing losses)",
                "Lying to family or friends about gambling habits",
                "Borrowing money or selling possessions to gamble",
                "Neglecting work, school, or family responsibilities",
                "Gambling to escape problems or relieve feelings of helplessness",
                "Feeling anxious, depressed, or guilty about gambling",
            ],
        },
        Section {
            heading: "Casino Tools",
            paragraphs: &[],
            bullets: &[
                "Deposit limits: daily, weekly, or monthly caps",
                "Loss limits: cap the amount you can lose in a period",
                "Session time limits: alerts after a set playing time",
                "Reality checks: reminders of how long you've been playing",
                "Self-exclusion: block yourself from the casino for a set period",
                "Cool-off periods: take a short break from gambling",
            ],
        },
        Section {
            heading: "Get Help",
            paragraphs: &[],
            bullets: &[
                "Gamblers Anonymous: international fellowship of people with gambling problems",
                "National Council on Problem Gambling (US): call 1-800-522-4700 for 24/7 confidential help",
                "BeGambleAware (UK): free advice and support for anyone affected by gambling",
                "Gambling Therapy: global service offering free online support",
            ],
        },
    ],
};

const CONTACT_SUBJECTS: [&str; 4] = [
    "General Inquiry",
    "Website Feedback",
    "Partnership/Business",
    "Content Correction",
];

/// Posts the form as JSON and shows the API's message.
const CONTACT_SCRIPT: &str = r#"
document.getElementById('contact-form').addEventListener('submit', async function (e) {
  e.preventDefault();
  var status = document.getElementById('contact-status');
  var data = Object.fromEntries(new FormData(e.target).entries());
  try {
    var res = await fetch('/api/contact', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(data) });
    var body = await res.json();
    status.textContent = res.ok ? body.message : body.error;
    if (res.ok) e.target.reset();
  } catch (_) {
    status.textContent = 'Something went wrong. Please try again.';
  }
});
"#;

fn sections(sections: &[Section]) -> Markup {
    html! {
        div class="prose" {
            @for section in sections {
                h2 { (section.heading) }
                @for paragraph in section.paragraphs {
                    p { (paragraph) }
                }
                @if !section.bullets.is_empty() {
                    ul { @for bullet in section.bullets { li { (bullet) } } }
                }
            }
        }
    }
}

async fn serve_static(state: &AppState, uri: &Uri, page: &'static StaticPage, extra: Markup) -> Result<Response, PageError> {
    serve_cached(state, uri, HTML, async {
        let ctx = RenderContext::new(&state.config);
        let meta = PageMeta::new(page.title, page.description, page.path);
        let head = json_ld::scripts(&[json_ld::web_page(&ctx, page.title, page.description, page.path)]);
        let body = html! {
            (page_header(page.title, Some(page.lead)))
            (sections(page.sections))
            (extra)
        };
        Ok(page_shell(&ctx, &meta, head, body).into_string())
    })
    .await
}

/// `GET /about`
pub(crate) async fn about_page(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_static(&state, &uri, &ABOUT, html! {}).await
}

/// `GET /privacy`
pub(crate) async fn privacy_page(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_static(&state, &uri, &PRIVACY, html! {}).await
}

/// `GET /terms`
pub(crate) async fn terms_page(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    serve_static(&state, &uri, &TERMS, html! {}).await
}

/// `GET /responsible-gambling`
pub(crate) async fn responsible_gambling_page(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, PageError> {
    serve_static(&state, &uri, &RESPONSIBLE_GAMBLING, html! {}).await
}

/// `GET /contact`
pub(crate) async fn contact_page(State(state): State<AppState>, uri: Uri) -> Result<Response, PageError> {
    static CONTACT: StaticPage = StaticPage {
        path: "/contact",
        title: "Contact Us",
        description: "Get in touch with our editorial team.",
        lead: "Questions, feedback or a correction? Send us a message.",
        sections: &[],
    };
    let form = html! {
        form id="contact-form" class="stack" method="post" action="/api/contact" {
            label { "Name" input type="text" name="name" required; }
            label { "Email" input type="email" name="email" required; }
            label {
                "Subject"
                select name="subject" required {
                    option value="" { "Select a subject" }
                    @for subject in CONTACT_SUBJECTS {
                        option value=(subject) { (subject) }
                    }
                }
            }
            label { "Message" textarea name="message" rows="6" required {} }
            button class="btn btn-accent" type="submit" { "Send Message" }
            p id="contact-status" role="status" {}
        }
        script { (PreEscaped(CONTACT_SCRIPT)) }
    };
    serve_static(&state, &uri, &CONTACT, form).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::content::testing::FakeStore;
    use crate::test_support::{get, send, test_app};

    #[tokio::test]
    async fn static_pages_render() {
        let app = test_app(FakeStore::new(), &[]);
        for (path, title) in [
            ("/about", "About Us"),
            ("/privacy", "Privacy Policy"),
            ("/terms", "Terms of Service"),
            ("/responsible-gambling", "Responsible Gambling"),
            ("/contact", "Contact Us"),
        ] {
            let response = send(&app, get(path)).await;
            assert_eq!(response.status, StatusCode::OK, "{path}");
            assert!(response.body.contains(title), "{path}");
        }
    }

    #[tokio::test]
    async fn contact_form_posts_to_api() {
        let app = test_app(FakeStore::new(), &[]);
        let response = send(&app, get("/contact")).await;
        assert!(response.body.contains(r#"action="/api/contact""#));
        assert!(response.body.contains("Content Correction"));
    }
}
