//! Contact and newsletter form payloads.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::SiteError;

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Loose `local@domain.tld` shape check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Contact form submission. Every field is required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender name.
    #[serde(default)]
    pub name: Option<String>,
    /// Reply address.
    #[serde(default)]
    pub email: Option<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
}

/// A contact submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage<'a> {
    /// Sender name.
    pub name: &'a str,
    /// Reply address.
    pub email: &'a str,
    /// Subject line.
    pub subject: &'a str,
    /// Message body.
    pub message: &'a str,
}

impl ContactRequest {
    /// Checks presence of all fields, then the email shape.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Validation`] naming the first failed check.
    pub fn validate(&self) -> Result<ContactMessage<'_>, SiteError> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|v| !v.is_empty())
        }
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            present(&self.name),
            present(&self.email),
            present(&self.subject),
            present(&self.message),
        ) else {
            return Err(SiteError::validation("All fields are required"));
        };
        if !is_valid_email(email) {
            return Err(SiteError::validation("Invalid email format"));
        }
        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

/// Newsletter signup.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewsletterRequest {
    /// Address to subscribe.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
}

impl NewsletterRequest {
    /// Returns the address once it is a non-empty, well-formed string.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Validation`] when the address is missing, not a
    /// string, or malformed.
    pub fn validate(&self) -> Result<&str, SiteError> {
        let Some(email) = self
            .email
            .as_ref()
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
        else {
            return Err(SiteError::validation("Email is required"));
        };
        if !is_valid_email(email) {
            return Err(SiteError::validation("Invalid email format"));
        }
        Ok(email)
    }
}

/// `{success: true, message}` acknowledgement.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl SuccessResponse {
    /// Builds a successful acknowledgement.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Newsletter subscriber count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewsletterStats {
    /// Distinct subscribers.
    pub count: usize,
    /// Always `"Newsletter stats"`.
    pub message: String,
}
