//! Revalidation webhook query and response.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query string of `POST /api/revalidate`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RevalidateQuery {
    /// Shared webhook secret.
    #[serde(default)]
    pub secret: Option<String>,
}

/// Successful revalidation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevalidateResponse {
    /// Always `true`.
    pub revalidated: bool,
    /// Paths dropped from the page cache.
    pub paths: Vec<String>,
    /// RFC 3339 time of the revalidation.
    pub timestamp: String,
}
