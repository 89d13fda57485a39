//! `storefront-core` — product listing domain.
//!
//! This crate contains **pure domain** values and rules (no IO): the editable
//! draft and its validation, confirmed products, and the merge of creation
//! responses into products.

pub mod draft;
pub mod error;
pub mod id;
pub mod product;

pub use draft::{Draft, Field, NewProduct};
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{ProductId, SubmissionId};
pub use product::{MergePolicy, Product, ProductRecord, Rating, merge_created};
