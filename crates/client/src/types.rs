//! Shared types for both the native client and the frontend (WASM-compatible).
//!
//! These types must not depend on native-only dependencies like `tokio`.

use serde::{Deserialize, Serialize};
use storefront_core::{Field, Product, ProductId, SubmissionId, ValidationError};

/// Change published by the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormEvent {
    DraftChanged { field: Field },
    ValidationFailed { errors: Vec<ValidationError> },
    SubmissionStarted { submission_id: SubmissionId },
    SubmissionSucceeded {
        submission_id: SubmissionId,
        product_id: Option<ProductId>,
    },
    SubmissionFailed { submission_id: SubmissionId },
}

/// Change published by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEvent {
    LoadStarted,
    Loaded { count: usize },
    LoadFailed,
    Ingested { product_id: Option<ProductId> },
}

/// What a collection view should show right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    /// The initial load is still outstanding.
    Loading,
    /// Nothing to show.
    Empty,
    Ready(&'a [Product]),
}
