//! Content query layer.
//!
//! [`ContentStore`] is the single seam to the headless content store: run
//! one GROQ query with named parameters and get the JSON `result` back.
//! [`SanityClient`] implements it over HTTP. [`ContentQueries`] builds the
//! site's queries on top and maps results into domain records; every
//! fetcher degrades to an empty result on failure and logs the cause.
//!
//! Nothing in this layer caches.

pub mod queries;
pub mod query;
pub mod sanity;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use queries::ContentQueries;
pub use query::{CasinoFilters, CasinoPage, CasinoSort, PER_PAGE, Query, SitemapEntry};
pub use sanity::SanityClient;
pub use store::{ContentError, ContentStore};
