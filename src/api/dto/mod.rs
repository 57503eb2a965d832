//! Data Transfer Objects for the JSON endpoints.

pub mod form_dto;
pub mod revalidate_dto;
pub mod system_dto;

pub use form_dto::*;
pub use revalidate_dto::*;
pub use system_dto::*;
