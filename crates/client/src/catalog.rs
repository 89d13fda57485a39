//! The displayed product collection (list synchronizer).
//!
//! Loaded once from the product service when the view starts, then grown by
//! [`ProductCatalog::ingest`] after each successful submission. The catalog is
//! the only writer of its collection.

use chrono::{DateTime, Utc};
use storefront_core::{Product, ProductRecord};

use crate::api::{ApiError, ProductApi};
use crate::notify::{Notifier, Subscription};
use crate::types::{CatalogEvent, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load products: {0}")]
pub struct LoadError(#[from] pub ApiError);

#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    loading: bool,
    loaded_at: Option<DateTime<Utc>>,
    events: Notifier<CatalogEvent>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// When the last successful load completed.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn subscribe(&self) -> Subscription<CatalogEvent> {
        self.events.subscribe()
    }

    pub fn view(&self) -> ViewState<'_> {
        if self.loading {
            ViewState::Loading
        } else if self.products.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready(&self.products)
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.events.publish(CatalogEvent::LoadStarted);
    }

    /// Apply the outcome of a collection fetch.
    ///
    /// On failure the collection keeps its previous contents. Callers are
    /// free to ignore the returned error; it has already been logged.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<ProductRecord>, ApiError>,
    ) -> Result<usize, LoadError> {
        self.loading = false;

        match result {
            Ok(records) => {
                self.products = records.into_iter().map(ProductRecord::into_product).collect();
                self.loaded_at = Some(Utc::now());

                let count = self.products.len();
                tracing::info!(count, "loaded products");
                self.events.publish(CatalogEvent::Loaded { count });
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load products; keeping current collection");
                self.events.publish(CatalogEvent::LoadFailed);
                Err(LoadError(err))
            }
        }
    }

    /// Fetch the full collection. Failures are logged and swallowed.
    pub async fn load<A: ProductApi>(&mut self, api: &A) {
        self.begin_load();
        let result = api.list_products().await;
        let _ = self.finish_load(result);
    }

    /// Prepend a newly created product. No de-duplication, no re-fetch.
    pub fn ingest(&mut self, product: Product) {
        let product_id = product.id;
        self.products.insert(0, product);

        tracing::debug!(?product_id, total = self.products.len(), "ingested product");
        self.events.publish(CatalogEvent::Ingested { product_id });
    }
}
