//! What the table and card views show for each product.
//!
//! Both views derive from the same collection; nothing here mutates it.

use std::io;

use storefront_core::{Product, Rating};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::types::{FormEvent, ViewState};

/// Shown in place of a rating the service never sent.
pub const NOT_RATED: &str = "N/A";
pub const LOADING_MESSAGE: &str = "Loading products...";
pub const EMPTY_MESSAGE: &str = "No products found.";

const IMAGE_PREVIEW_CHARS: usize = 32;

/// Price with exactly two decimal places.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

pub fn format_rating(rating: Option<Rating>) -> String {
    match rating {
        Some(rating) => rating.rate.to_string(),
        None => NOT_RATED.to_string(),
    }
}

/// The product id, or its 1-based position when the service sent none.
pub fn display_id(product: &Product, index: usize) -> String {
    product
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| (index + 1).to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    /// `None` when the product has no image.
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    pub image: Option<String>,
}

pub fn table_rows(products: &[Product]) -> Vec<ProductRow> {
    products
        .iter()
        .enumerate()
        .map(|(index, product)| ProductRow {
            id: display_id(product, index),
            title: product.title.clone(),
            category: product.category.clone(),
            price: format_price(product.price),
            rating: format_rating(product.rating),
            image: product.has_image().then(|| product.image.clone()),
        })
        .collect()
}

pub fn cards(products: &[Product]) -> Vec<ProductCard> {
    products
        .iter()
        .enumerate()
        .map(|(index, product)| ProductCard {
            id: display_id(product, index),
            title: product.title.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            rating: format_rating(product.rating),
            image: product.has_image().then(|| product.image.clone()),
        })
        .collect()
}

/// Shorten long payloads (data URLs) for terminal output.
fn abbreviate(source: &str) -> String {
    if source.chars().count() <= IMAGE_PREVIEW_CHARS {
        return source.to_string();
    }
    let head: String = source.chars().take(IMAGE_PREVIEW_CHARS).collect();
    format!("{head}…")
}

/// Write the table view.
pub fn write_table(mut out: impl io::Write, view: ViewState<'_>) -> io::Result<()> {
    let products = match view {
        ViewState::Loading => return writeln!(out, "{LOADING_MESSAGE}"),
        ViewState::Empty => return writeln!(out, "{EMPTY_MESSAGE}"),
        ViewState::Ready(products) => products,
    };

    let mut builder = Builder::default();
    builder.push_record(["ID", "Title", "Category", "Price", "Rating", "Image"]);
    for row in table_rows(products) {
        builder.push_record([
            row.id,
            row.title,
            row.category,
            row.price,
            row.rating,
            row.image.as_deref().map(abbreviate).unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")
}

/// Write the card view, one block per product.
pub fn write_cards(mut out: impl io::Write, view: ViewState<'_>) -> io::Result<()> {
    let products = match view {
        ViewState::Loading => return writeln!(out, "{LOADING_MESSAGE}"),
        ViewState::Empty => return writeln!(out, "{EMPTY_MESSAGE}"),
        ViewState::Ready(products) => products,
    };

    for card in cards(products) {
        writeln!(out, "#{} {}", card.id, card.title)?;
        writeln!(out, "  {} | ${} | rating {}", card.category, card.price, card.rating)?;
        if !card.description.is_empty() {
            writeln!(out, "  {}", card.description)?;
        }
        if let Some(image) = &card.image {
            writeln!(out, "  image: {}", abbreviate(image))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write what a form submission came to.
///
/// When the latest attempt failed validation every failed rule is listed,
/// otherwise `message` (the form's inline message) is written.
pub fn write_form_outcome(
    mut out: impl io::Write,
    message: Option<&str>,
    events: &[FormEvent],
) -> io::Result<()> {
    let failures = events
        .iter()
        .rev()
        .find_map(|event| match event {
            FormEvent::ValidationFailed { errors } => Some(Some(errors)),
            FormEvent::SubmissionSucceeded { .. } | FormEvent::SubmissionFailed { .. } => {
                Some(None)
            }
            _ => None,
        })
        .flatten();

    match (failures, message) {
        (Some(errors), _) => {
            for error in errors {
                writeln!(out, "{error}")?;
            }
        }
        (None, Some(message)) => writeln!(out, "{message}")?,
        (None, None) => return Ok(()),
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{ProductId, ProductRecord, SubmissionId, ValidationError};

    fn product(id: Option<u64>, price: f64, rating: Option<Rating>, image: &str) -> Product {
        Product {
            id: id.map(ProductId::new),
            title: "Jacket".to_string(),
            price,
            description: "Warm".to_string(),
            category: "clothing".to_string(),
            image: image.to_string(),
            rating,
        }
    }

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(19.5), "19.50");
        assert_eq!(format_price(7.0), "7.00");
    }

    #[test]
    fn missing_rating_renders_not_rated_in_both_views() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 1, "title": "Jacket", "price": 19.5}"#).unwrap();
        let products = vec![record.into_product()];

        assert_eq!(table_rows(&products)[0].rating, "N/A");
        assert_eq!(cards(&products)[0].rating, "N/A");
        assert_eq!(products[0].rating(), Rating { rate: 0.0, count: 0 });
    }

    #[test]
    fn present_rating_renders_its_rate() {
        let products = vec![product(Some(1), 1.0, Some(Rating { rate: 3.9, count: 120 }), "")];
        assert_eq!(table_rows(&products)[0].rating, "3.9");
    }

    #[test]
    fn missing_id_falls_back_to_position() {
        let products = vec![
            product(Some(40), 1.0, None, ""),
            product(None, 1.0, None, ""),
        ];
        let rows = table_rows(&products);
        assert_eq!(rows[0].id, "40");
        assert_eq!(rows[1].id, "2");
        assert_eq!(cards(&products)[1].id, "2");
    }

    #[test]
    fn image_only_when_present() {
        let products = vec![
            product(Some(1), 1.0, None, "https://example.test/a.png"),
            product(Some(2), 1.0, None, ""),
        ];
        let rows = table_rows(&products);
        assert_eq!(rows[0].image.as_deref(), Some("https://example.test/a.png"));
        assert_eq!(rows[1].image, None);
        assert_eq!(cards(&products)[1].image, None);
    }

    #[test]
    fn table_output_contains_formatted_cells() {
        let products = vec![product(Some(5), 19.5, None, "")];
        let mut out = Vec::new();
        write_table(&mut out, ViewState::Ready(&products)).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Jacket"));
        assert!(text.contains("19.50"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn loading_and_empty_states_have_messages() {
        let mut out = Vec::new();
        write_table(&mut out, ViewState::Loading).unwrap();
        write_cards(&mut out, ViewState::Empty).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{LOADING_MESSAGE}\n{EMPTY_MESSAGE}\n"));
    }

    #[test]
    fn long_images_are_abbreviated() {
        let payload = format!("data:image/png;base64,{}", "A".repeat(100));
        let short = abbreviate(&payload);
        assert_eq!(short.chars().count(), IMAGE_PREVIEW_CHARS + 1);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn outcome_lists_every_failed_rule() {
        let events = vec![FormEvent::ValidationFailed {
            errors: vec![ValidationError::MissingTitle, ValidationError::MissingImage],
        }];
        let mut out = Vec::new();
        write_form_outcome(&mut out, Some("Title is required"), &events).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Title is required\nPlease upload an image\n\n");
    }

    #[test]
    fn outcome_after_submission_uses_the_message() {
        let submission_id = SubmissionId::new();
        let events = vec![
            FormEvent::ValidationFailed {
                errors: vec![ValidationError::InvalidPrice],
            },
            FormEvent::SubmissionStarted { submission_id },
            FormEvent::SubmissionSucceeded {
                submission_id,
                product_id: None,
            },
        ];
        let mut out = Vec::new();
        write_form_outcome(&mut out, Some("Product added successfully!"), &events).unwrap();
        write_form_outcome(&mut out, None, &[]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Product added successfully!\n\n");
    }
}
