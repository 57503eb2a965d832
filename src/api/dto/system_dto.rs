//! Health check and schema validation payloads.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::schema::Violation;

/// Overall health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every dependency answered.
    Healthy,
    /// At least one dependency failed.
    Degraded,
}

/// Health of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Dependency answered.
    Healthy,
    /// Dependency failed or timed out.
    Unhealthy,
}

/// Per-dependency health.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicesHealth {
    /// Content store probe result.
    pub content_store: ServiceStatus,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// RFC 3339 time of the check.
    pub timestamp: String,
    /// Per-dependency detail.
    pub services: ServicesHealth,
}

/// `POST /api/schema/{type_name}/validate` body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaValidationResponse {
    /// Schema type the document was checked against.
    pub type_name: &'static str,
    /// `true` when no finding blocks publishing.
    pub valid: bool,
    /// Every finding, in field order.
    pub violations: Vec<Violation>,
}
