//! Domain layer: content document shapes, page blocks, and process-wide
//! request state.
//!
//! Document types mirror the JSON shapes returned by the content store.
//! The rate limiter and newsletter subscriber set are the only pieces of
//! mutable state shared across requests.

pub mod block;
pub mod blog_post;
pub mod bonus;
pub mod casino;
pub mod click_event;
pub mod common;
pub mod country;
pub mod page;
pub mod payment_method;
pub mod portable_text;
pub mod rate_limiter;
pub mod review;
pub mod schema;
pub mod subscribers;

pub use block::PageBlock;
pub use blog_post::BlogPost;
pub use bonus::{Bonus, BonusType};
pub use casino::{Casino, CasinoRef};
pub use click_event::ClickEvent;
pub use common::{ImageRef, Seo, Slug};
pub use country::{Country, LegalStatus};
pub use page::Page;
pub use payment_method::{PaymentMethod, PaymentType};
pub use portable_text::PortableTextBlock;
pub use rate_limiter::{FixedWindowLimiter, RateDecision, RateLimiter};
pub use review::{Review, ReviewRatings};
pub use schema::DocumentType;
pub use subscribers::{InMemorySubscribers, SubscribeOutcome, SubscriberStore};
