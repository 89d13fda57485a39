//! Add-product form controller.
//!
//! Owns the [`Draft`], the in-progress flag and the inline messages. Work that
//! suspends (reading an image, the creation request) is split into a
//! synchronous begin/finish pair so a UI runtime can drive it from its own
//! executor; [`FormController::submit`] composes the pair for async callers.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use storefront_core::{
    Draft, DomainError, Field, MergePolicy, NewProduct, Product, ProductRecord, SubmissionId,
    ValidationError, merge_created,
};
use tracing::Instrument;

use crate::api::{ApiError, ProductApi};
use crate::catalog::ProductCatalog;
#[cfg(not(target_arch = "wasm32"))]
use crate::encoding::encode_file;
use crate::encoding::{EncodedImage, ImageError};
use crate::notify::{Notifier, Subscription};
use crate::types::FormEvent;

pub const SUCCESS_MESSAGE: &str = "Product added successfully!";
pub const IMAGE_ERROR_MESSAGE: &str = "Could not read the selected image.";

/// The creation request failed or returned a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to add product. Please try again.")]
pub struct SubmissionError {
    #[source]
    pub cause: ApiError,
}

/// Why a submit call did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    InProgress,
    Invalid(Vec<ValidationError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Product),
    Failed(SubmissionError),
    Skipped(Skipped),
}

/// An accepted submission waiting for the service to answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    id: SubmissionId,
    request: NewProduct,
}

impl PendingSubmission {
    pub fn id(&self) -> SubmissionId {
        self.id
    }

    /// Body to send; a snapshot of the draft at submit time.
    pub fn request(&self) -> &NewProduct {
        &self.request
    }
}

#[derive(Debug, Default)]
pub struct FormController {
    draft: Draft,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
    policy: MergePolicy,
    events: Notifier<FormEvent>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MergePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Read view of `draft().image`.
    pub fn preview(&self) -> Option<&str> {
        self.draft.preview()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.draft.is_valid()
    }

    pub fn subscribe(&self) -> Subscription<FormEvent> {
        self.events.subscribe()
    }

    /// Replace one field. Messages are left alone.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        tracing::debug!(%field, "draft field updated");
        self.events.publish(FormEvent::DraftChanged { field });
    }

    /// Store an encoded image; the preview follows automatically.
    pub fn set_image(&mut self, image: EncodedImage) {
        self.update_field(Field::Image, image.into_string());
    }

    /// Show a failed image read inline. The draft keeps its previous image.
    pub fn image_failed(&mut self, err: &ImageError) {
        tracing::warn!(error = %err, "failed to read selected image");
        self.success = None;
        self.error = Some(IMAGE_ERROR_MESSAGE.to_string());
    }

    /// Read and encode the chosen file. No file chosen is a no-op.
    ///
    /// A read failure leaves the draft untouched.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn select_image(&mut self, file: Option<&Path>) -> Result<(), ImageError> {
        let Some(path) = file else {
            return Ok(());
        };

        match encode_file(path).await {
            Ok(image) => {
                self.set_image(image);
                Ok(())
            }
            Err(err) => {
                self.image_failed(&err);
                Err(err)
            }
        }
    }

    /// Check the draft, updating the inline error message.
    pub fn validate(&mut self) -> bool {
        let errors = self.draft.validate();
        self.record_validation(&errors);
        errors.is_empty()
    }

    fn record_validation(&mut self, errors: &[ValidationError]) {
        match errors.first() {
            Some(first) => {
                self.error = Some(first.to_string());
                self.success = None;
                self.events.publish(FormEvent::ValidationFailed {
                    errors: errors.to_vec(),
                });
            }
            None => self.error = None,
        }
    }

    /// Accept the draft for submission.
    ///
    /// Returns the request to send, or why nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, Skipped> {
        if self.submitting {
            return Err(Skipped::InProgress);
        }

        let request = match self.draft.to_new_product() {
            Ok(request) => request,
            Err(err) => {
                let errors = match err {
                    DomainError::Validation(errors) => errors,
                    _ => self.draft.validate(),
                };
                self.record_validation(&errors);
                return Err(Skipped::Invalid(errors));
            }
        };

        self.submitting = true;
        self.error = None;
        self.success = None;

        let id = SubmissionId::new();
        self.events.publish(FormEvent::SubmissionStarted { submission_id: id });
        Ok(PendingSubmission { id, request })
    }

    /// Apply the service's answer to an accepted submission.
    ///
    /// On success the draft is reset and the created product is returned for
    /// the catalog; on failure the draft is kept so the user can retry.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<ProductRecord, ApiError>,
    ) -> SubmitOutcome {
        self.submitting = false;

        match result {
            Ok(response) => {
                let product = merge_created(response, &pending.request, self.policy);

                self.draft = Draft::default();
                self.error = None;
                self.success = Some(SUCCESS_MESSAGE.to_string());

                tracing::info!(product_id = ?product.id, "product created");
                self.events.publish(FormEvent::SubmissionSucceeded {
                    submission_id: pending.id,
                    product_id: product.id,
                });
                SubmitOutcome::Created(product)
            }
            Err(cause) => {
                let err = SubmissionError { cause };

                self.success = None;
                self.error = Some(err.to_string());

                tracing::warn!(error = %err.cause, "product creation failed");
                self.events.publish(FormEvent::SubmissionFailed {
                    submission_id: pending.id,
                });
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Validate, send one creation request, and hand a created product to
    /// `catalog`.
    pub async fn submit<A: ProductApi>(
        &mut self,
        api: &A,
        catalog: &mut ProductCatalog,
    ) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(skipped) => return SubmitOutcome::Skipped(skipped),
        };

        let span = tracing::info_span!("submit_product", submission_id = %pending.id());
        let result = api
            .create_product(pending.request())
            .instrument(span.clone())
            .await;

        let _entered = span.enter();
        let outcome = self.finish_submit(pending, result);
        if let SubmitOutcome::Created(product) = &outcome {
            catalog.ingest(product.clone());
        }
        outcome
    }
}
