//! Remote product service client.

use serde_json::Value;
use storefront_core::{NewProduct, ProductId, ProductRecord};

/// Public demo service used when no URL is configured.
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

/// The two calls the dashboard makes against the product service.
///
/// Implementations make exactly one request per call; there is no retry.
pub trait ProductApi {
    /// `GET /products`.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ApiError>;

    /// `POST /products`; any success status is accepted.
    async fn create_product(&self, product: &NewProduct) -> Result<ProductRecord, ApiError>;
}

/// `reqwest`-backed client for the product service.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    api_url: String,
    client: reqwest::Client,
}

impl HttpProductApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(api_url, reqwest::Client::new())
    }

    pub fn with_client(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { api_url, client }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.api_url)
    }
}

impl Default for HttpProductApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ApiError> {
        let url = self.products_url();
        tracing::debug!(%url, "fetching products");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ApiError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let items: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("failed to parse product list: {e}")))?;

        Ok(decode_records(items))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<ProductRecord, ApiError> {
        let url = self.products_url();
        tracing::debug!(%url, title = %product.title, "creating product");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(&url)
            .json(product)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ApiError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        // The status alone decides success; the body only contributes an id.
        let body = resp.text().await.unwrap_or_default();
        let record = echoed_record(&body);
        if record.id.is_none() {
            tracing::debug!("creation response carried no usable id");
        }
        Ok(record)
    }
}

/// Decode a product list item by item, skipping records of the wrong shape.
fn decode_records(items: Vec<Value>) -> Vec<ProductRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed product record");
                None
            }
        })
        .collect()
}

/// Best-effort read of a creation response.
///
/// Anything that is not a JSON object yields an empty record, and fields of an
/// unexpected type are dropped one by one.
fn echoed_record(body: &str) -> ProductRecord {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return ProductRecord::default();
    };
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    ProductRecord {
        id: fields.get("id").and_then(echoed_id),
        title: text("title"),
        price: fields.get("price").and_then(Value::as_f64),
        description: text("description"),
        category: text("category"),
        image: text("image"),
        rating: fields
            .get("rating")
            .and_then(|rating| serde_json::from_value(rating.clone()).ok()),
    }
}

fn echoed_id(value: &Value) -> Option<ProductId> {
    match value {
        Value::Number(n) => n.as_u64().map(ProductId::new),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let api = HttpProductApi::new("http://localhost:9000//");
        assert_eq!(api.api_url(), "http://localhost:9000");
        assert_eq!(api.products_url(), "http://localhost:9000/products");
    }

    #[test]
    fn default_points_at_demo_service() {
        assert_eq!(HttpProductApi::default().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn empty_or_non_json_creation_body_is_an_empty_record() {
        assert_eq!(echoed_record(""), ProductRecord::default());
        assert_eq!(echoed_record("Created"), ProductRecord::default());
        assert_eq!(echoed_record("[1, 2]"), ProductRecord::default());
    }

    #[test]
    fn mistyped_echo_fields_are_dropped_individually() {
        let record =
            echoed_record(r#"{"id": 21, "title": 123, "price": "19.5", "category": "home"}"#);

        assert_eq!(record.id, Some(ProductId::new(21)));
        assert_eq!(record.title, None);
        assert_eq!(record.price, None);
        assert_eq!(record.category.as_deref(), Some("home"));
    }

    #[test]
    fn echoed_id_accepts_numeric_strings() {
        assert_eq!(echoed_record(r#"{"id": "7"}"#).id, Some(ProductId::new(7)));
        assert_eq!(echoed_record(r#"{"id": -3}"#).id, None);
        assert_eq!(echoed_record(r#"{"id": "seven"}"#).id, None);
    }

    #[test]
    fn malformed_list_items_are_skipped() {
        let items = vec![
            serde_json::json!({ "id": 1, "title": "Backpack" }),
            serde_json::json!({ "id": 2, "rating": { "rate": 4.1, "count": 120.5 } }),
            serde_json::json!("not a product"),
            serde_json::json!({ "id": 3, "title": null }),
        ];

        let records = decode_records(items);

        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(ProductId::new(1)), Some(ProductId::new(3))]);
    }
}
