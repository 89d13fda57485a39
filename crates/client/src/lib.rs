//! `storefront-client`
//!
//! **Responsibility:** add-product form and product dashboard on top of a
//! remote product service.
//!
//! This crate provides:
//! - The product service client (`GET`/`POST /products`)
//! - The form controller (draft, validation, image encoding, submission)
//! - The product catalog (initial load, prepend-on-create)
//! - The table/card rendering contract
//!
//! The dashboard is a **thin client**: the remote service is the only store.

pub mod api;
pub mod catalog;
pub mod encoding;
pub mod form;
pub mod notify;
pub mod render;
pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use api::{ApiError, HttpProductApi, ProductApi};
pub use catalog::{LoadError, ProductCatalog};
pub use encoding::{EncodedImage, ImageError};
pub use form::{FormController, PendingSubmission, Skipped, SubmissionError, SubmitOutcome};
pub use notify::{Notifier, Subscription};
pub use types::{CatalogEvent, FormEvent, ViewState};
