//! Confirmed product listings and how creation responses become one.

use serde::{Deserialize, Serialize};

use crate::draft::NewProduct;
use crate::id::ProductId;

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A persisted listing as shown in the dashboard.
///
/// `rating` keeps whether the service sent one so views can tell "unrated"
/// apart from a real zero; [`Product::rating`] reads it as `{0, 0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Option<Rating>,
}

impl Product {
    pub fn rating(&self) -> Rating {
        self.rating.unwrap_or_default()
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Product-shaped record as decoded from the remote service.
///
/// Every field is optional on the wire; absent fields are defaulted when the
/// record is turned into a [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rating: Option<Rating>,
}

impl ProductRecord {
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            rating: self.rating,
        }
    }
}

/// Which side wins when a creation response echoes submitted fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Submitted values override the echo. Right for demo services that
    /// assign an id but do not store what was sent.
    #[default]
    PreferDraft,
    /// Non-empty echoed values win; the submission fills the gaps.
    PreferServer,
}

/// Combine a creation response with the request that produced it.
///
/// The id always comes from the response; a missing rating becomes `{0, 0}`.
pub fn merge_created(
    response: ProductRecord,
    submitted: &NewProduct,
    policy: MergePolicy,
) -> Product {
    let pick = |echoed: Option<String>, local: &str| -> String {
        match (policy, echoed) {
            (MergePolicy::PreferServer, Some(value)) if !value.is_empty() => value,
            _ => local.to_string(),
        }
    };

    let price = match (policy, response.price) {
        (MergePolicy::PreferServer, Some(price)) => price,
        _ => submitted.price,
    };

    Product {
        id: response.id,
        title: pick(response.title, &submitted.title),
        price,
        description: pick(response.description, &submitted.description),
        category: pick(response.category, &submitted.category),
        image: pick(response.image, &submitted.image),
        rating: Some(response.rating.unwrap_or_default()),
    }
}
