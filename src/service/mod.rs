//! Service layer: request-independent orchestration.
//!
//! [`RedirectService`] resolves affiliate links and logs clicks.
//! [`RevalidationService`] turns content webhooks into page-cache
//! invalidations over the shared [`PageCache`].

pub mod page_cache;
pub mod redirect_service;
pub mod revalidation_service;

pub use page_cache::{CachedPage, PageCache};
pub use redirect_service::{ClickContext, FALLBACK_LOCATION, RedirectService};
pub use revalidation_service::{RevalidationOutcome, RevalidationRequest, RevalidationService};
