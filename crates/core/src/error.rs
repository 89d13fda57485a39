//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single failed draft rule.
///
/// The `Display` text is the inline message shown next to the form, so it is
/// worded for end users rather than for logs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Price must be greater than 0")]
    InvalidPrice,

    #[error("Description is required")]
    MissingDescription,

    #[error("Category is required")]
    MissingCategory,

    #[error("Please upload an image")]
    MissingImage,
}

/// Domain-level error.
///
/// Keep this focused on deterministic failures of domain values (parsing,
/// validation). Transport concerns belong to the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The draft failed one or more rules.
    #[error("validation failed: {}", first_message(.0))]
    Validation(Vec<ValidationError>),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A form field name did not match any draft field.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }
}

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
