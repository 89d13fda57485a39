//! The in-progress product entry and its validation rules.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, ValidationError};

/// Editable fields of a [`Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Price,
    Description,
    Category,
    Image,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Price,
        Field::Description,
        Field::Category,
        Field::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Price => "price",
            Field::Description => "description",
            Field::Category => "category",
            Field::Image => "image",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::unknown_field(s))
    }
}

/// In-progress submission, exactly as the user typed it.
///
/// `price` stays raw text so that "empty" and "not a number" are both
/// representable; it is only coerced when a request body is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    /// Encoded image payload (data URL), empty until a file is selected.
    pub image: String,
}

/// Body of a creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace exactly one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Price => self.price = value,
            Field::Description => self.description = value,
            Field::Category => self.category = value,
            Field::Image => self.image = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Price => &self.price,
            Field::Description => &self.description,
            Field::Category => &self.category,
            Field::Image => &self.image,
        }
    }

    /// Preview source for the selected image; always a view of `image`.
    pub fn preview(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Price as a number, if it is present, finite and strictly positive.
    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
    }

    /// Evaluate every rule and return the failures in rule order.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ValidationError::MissingTitle);
        }
        if self.parsed_price().is_none() {
            errors.push(ValidationError::InvalidPrice);
        }
        if self.description.trim().is_empty() {
            errors.push(ValidationError::MissingDescription);
        }
        if self.category.trim().is_empty() {
            errors.push(ValidationError::MissingCategory);
        }
        if self.image.is_empty() {
            errors.push(ValidationError::MissingImage);
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the creation request body, coercing `price` to a number.
    pub fn to_new_product(&self) -> DomainResult<NewProduct> {
        let errors = self.validate();
        let price = match self.parsed_price() {
            Some(price) if errors.is_empty() => price,
            _ => return Err(DomainError::Validation(errors)),
        };

        Ok(NewProduct {
            title: self.title.clone(),
            price,
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_draft() -> Draft {
        Draft {
            title: "Backpack".to_string(),
            price: "109.95".to_string(),
            description: "Fits 15 inch laptops".to_string(),
            category: "bags".to_string(),
            image: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }
    }

    #[test]
    fn empty_draft_fails_every_rule_in_order() {
        assert_eq!(
            Draft::new().validate(),
            vec![
                ValidationError::MissingTitle,
                ValidationError::InvalidPrice,
                ValidationError::MissingDescription,
                ValidationError::MissingCategory,
                ValidationError::MissingImage,
            ]
        );
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().is_valid());
    }

    #[test]
    fn set_replaces_only_the_named_field() {
        let mut draft = valid_draft();
        draft.set(Field::Category, "outdoor");

        let mut expected = valid_draft();
        expected.category = "outdoor".to_string();
        assert_eq!(draft, expected);
    }

    #[test]
    fn price_must_be_strictly_positive() {
        for raw in ["", "0", "-3", "abc", "NaN", "inf"] {
            let mut draft = valid_draft();
            draft.price = raw.to_string();
            assert_eq!(draft.validate(), vec![ValidationError::InvalidPrice], "price {raw:?}");
        }
    }

    #[test]
    fn whitespace_only_text_fields_are_missing() {
        let mut draft = valid_draft();
        draft.title = "   ".to_string();
        draft.description = "\t".to_string();
        assert_eq!(
            draft.validate(),
            vec![ValidationError::MissingTitle, ValidationError::MissingDescription]
        );
    }

    #[test]
    fn preview_tracks_image_field() {
        let mut draft = Draft::new();
        assert_eq!(draft.preview(), None);

        draft.set(Field::Image, "data:image/gif;base64,R0lG");
        assert_eq!(draft.preview(), Some("data:image/gif;base64,R0lG"));
    }

    #[test]
    fn to_new_product_coerces_price() {
        let body = valid_draft().to_new_product().unwrap();
        assert_eq!(body.price, 109.95);
        assert_eq!(body.title, "Backpack");

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["price"].is_number());
    }

    #[test]
    fn to_new_product_reports_validation_failures() {
        let err = Draft::new().to_new_product().unwrap_err();
        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 5),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("price".parse::<Field>().unwrap(), Field::Price);
        assert!(matches!(
            "rating".parse::<Field>(),
            Err(DomainError::UnknownField(_))
        ));
    }

    proptest! {
        #[test]
        fn blanking_any_required_field_fails_its_rule(idx in 0usize..5, blank in "[ \t]{0,4}") {
            let field = Field::ALL[idx];
            let mut draft = valid_draft();
            // The image rule only checks emptiness; whitespace is a (bogus) payload.
            let value = if field == Field::Image { String::new() } else { blank };
            draft.set(field, value);

            let expected = match field {
                Field::Title => ValidationError::MissingTitle,
                Field::Price => ValidationError::InvalidPrice,
                Field::Description => ValidationError::MissingDescription,
                Field::Category => ValidationError::MissingCategory,
                Field::Image => ValidationError::MissingImage,
            };

            let errors = draft.validate();
            prop_assert!(errors.contains(&expected));
            prop_assert!(draft.to_new_product().is_err());
        }

        #[test]
        fn positive_prices_are_accepted(price in 0.01f64..1_000_000.0) {
            let mut draft = valid_draft();
            draft.price = price.to_string();
            prop_assert!(draft.is_valid());
            prop_assert_eq!(draft.parsed_price(), Some(price));
        }
    }
}
