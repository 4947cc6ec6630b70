//! Admin form drafts and their normalization into [`Product`] records.
//!
//! Drafts hold raw form text. Normalization is lenient: numeric fields that do
//! not parse become zero, and a size without a usable price inherits the base
//! price. [`ProductDraft::validate`] reports what normalization would coerce so
//! callers can surface it, but never blocks the save.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::product::MAX_RATING;
use super::{Category, NutritionInfo, Product, ProductId, SizeOption};

/// Label given to the single size of a draft that lists none.
pub const DEFAULT_SIZE_LABEL: &str = "Regular";

/// Unvalidated product input captured from the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub price: String,
    pub image: String,
    pub description: String,
    /// Comma-separated ingredient list.
    pub ingredients: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    /// Comma-separated `label:price` pairs, e.g. `"250ml:5.99, 500ml:9.99"`.
    pub sizes: String,
    /// Comma-separated tag list.
    pub tags: String,
    pub rating: String,
    pub reviews: String,
    pub popular: bool,
    #[serde(rename = "new")]
    pub is_new: bool,
}

/// A field that normalization will coerce.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftIssue {
    /// The product name is blank.
    #[error("name is empty")]
    EmptyName,
    /// A numeric field does not parse and will be stored as 0.
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },
    /// A size price does not parse and will fall back to the base price.
    #[error("size {label:?} has an invalid price: {value:?}")]
    InvalidSizePrice {
        /// Size label.
        label: String,
        /// Raw price segment.
        value: String,
    },
    /// No sizes were given; a single default size will be created.
    #[error("no sizes given, defaulting to {DEFAULT_SIZE_LABEL:?}")]
    NoSizes,
    /// The rating will be clamped into 0..=5.
    #[error("rating {0} is outside 0..=5")]
    RatingOutOfRange(Decimal),
    /// A negative value will be clamped to 0.
    #[error("{0} must not be negative")]
    Negative(&'static str),
}

impl ProductDraft {
    /// Build a draft pre-filled from an existing product, as the edit form does.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category,
            price: product.price.to_string(),
            image: product.image.clone(),
            description: product.description.clone(),
            ingredients: product.ingredients.join(", "),
            calories: product.nutrition_info.calories.to_string(),
            protein: product.nutrition_info.protein.clone(),
            carbs: product.nutrition_info.carbs.clone(),
            fat: product.nutrition_info.fat.clone(),
            sizes: product
                .sizes
                .iter()
                .map(|size| format!("{}:{}", size.label, size.price))
                .collect::<Vec<_>>()
                .join(", "),
            tags: product.tags.join(", "),
            rating: product.rating.to_string(),
            reviews: product.review_count.to_string(),
            popular: product.popular,
            is_new: product.is_new,
        }
    }

    /// Normalize this draft into a product with the given ID.
    ///
    /// The image is taken as-is; the catalog store substitutes its default
    /// image for empty drafts on create.
    #[must_use]
    pub fn to_product(&self, id: ProductId) -> Product {
        let price = lenient_decimal(&self.price).max(Decimal::ZERO);
        Product {
            id,
            name: self.name.clone(),
            category: self.category,
            price,
            image: self.image.clone(),
            description: self.description.clone(),
            ingredients: split_list(&self.ingredients),
            nutrition_info: NutritionInfo {
                calories: lenient_int(&self.calories)
                    .clamp(0, i64::from(i32::MAX))
                    .try_into()
                    .unwrap_or(0),
                protein: self.protein.clone(),
                carbs: self.carbs.clone(),
                fat: self.fat.clone(),
            },
            sizes: parse_sizes(&self.sizes, price),
            tags: split_list(&self.tags),
            rating: lenient_decimal(&self.rating).clamp(Decimal::ZERO, MAX_RATING),
            review_count: lenient_int(&self.reviews)
                .clamp(0, i64::from(u32::MAX))
                .try_into()
                .unwrap_or(0),
            popular: self.popular,
            is_new: self.is_new,
        }
    }

    /// List every field that normalization would coerce.
    #[must_use]
    pub fn validate(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(DraftIssue::EmptyName);
        }

        for (field, value) in [
            ("price", &self.price),
            ("calories", &self.calories),
            ("rating", &self.rating),
            ("reviews", &self.reviews),
        ] {
            match parse_decimal(value) {
                None => issues.push(DraftIssue::InvalidNumber {
                    field,
                    value: value.clone(),
                }),
                Some(n) if n.is_sign_negative() && !n.is_zero() => {
                    issues.push(DraftIssue::Negative(field));
                }
                Some(_) => {}
            }
        }

        if let Some(rating) = parse_decimal(&self.rating) {
            if rating > MAX_RATING {
                issues.push(DraftIssue::RatingOutOfRange(rating));
            }
        }

        let mut any_size = false;
        for piece in self.sizes.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            any_size = true;
            let mut parts = piece.split(':');
            let label = parts.next().unwrap_or_default().trim();
            if let Some(raw) = parts.next() {
                if parse_decimal(raw).is_none() {
                    issues.push(DraftIssue::InvalidSizePrice {
                        label: label.to_owned(),
                        value: raw.to_owned(),
                    });
                }
            }
        }
        if !any_size {
            issues.push(DraftIssue::NoSizes);
        }

        issues
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

/// Parse a decimal, yielding zero when the input is not a number.
#[must_use]
pub fn lenient_decimal(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

/// Parse an integer, truncating any fractional part and yielding zero when the
/// input is not a number.
#[must_use]
pub fn lenient_int(raw: &str) -> i64 {
    lenient_decimal(raw).trunc().to_i64().unwrap_or(0)
}

/// Split a comma-separated form field into trimmed, non-empty entries.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse `label:price` pairs. Missing or unparsable prices use `base_price`.
///
/// Always yields at least one size.
#[must_use]
pub fn parse_sizes(raw: &str, base_price: Decimal) -> Vec<SizeOption> {
    let mut sizes: Vec<SizeOption> = raw
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let mut parts = piece.split(':');
            let label = parts.next().unwrap_or_default().trim().to_owned();
            let price = parts
                .next()
                .and_then(parse_decimal)
                .map_or(base_price, |p| p.max(Decimal::ZERO));
            SizeOption { label, price }
        })
        .collect();

    if sizes.is_empty() {
        sizes.push(SizeOption {
            label: DEFAULT_SIZE_LABEL.to_owned(),
            price: base_price,
        });
    }
    sizes
}
