//! Catalog product records.
//!
//! The serialized layout is the one stored in the catalog snapshot: camel-case
//! keys, sizes as `{ "size": ..., "price": ... }`, and the review count stored
//! under `reviews`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, ProductId};

/// Highest rating a product can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Errors that make a product record violate catalog invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product ID is zero or negative.
    #[error("product id must be positive, got {0}")]
    NonPositiveId(ProductId),
    /// The product has no purchasable sizes.
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
    /// The rating lies outside 0..=5.
    #[error("product {id} rating {rating} is outside 0..=5")]
    RatingOutOfRange {
        /// Offending product.
        id: ProductId,
        /// Stored rating.
        rating: Decimal,
    },
    /// A price is negative.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    /// Two records share an ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// One purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    /// Size label, e.g. "250ml" or "Large".
    #[serde(rename = "size")]
    pub label: String,
    /// Unit price for this size.
    pub price: Decimal,
}

/// Nutrition facts. Units are embedded in the strings ("12g").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: i32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Base unit price.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub nutrition_info: NutritionInfo,
    /// Purchasable sizes; the first entry is the default.
    pub sizes: Vec<SizeOption>,
    pub tags: Vec<String>,
    pub rating: Decimal,
    /// Number of customer reviews.
    #[serde(rename = "reviews")]
    pub review_count: u32,
    #[serde(default)]
    pub popular: bool,
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl Product {
    /// The size selected by default on the detail page.
    #[must_use]
    pub fn default_size(&self) -> Option<&SizeOption> {
        self.sizes.first()
    }

    /// Look up a size by its label.
    #[must_use]
    pub fn size(&self, label: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|size| size.label == label)
    }

    /// Case-insensitive substring match over name, description, tags and
    /// ingredients.
    ///
    /// `lowercase_query` must already be lowercased.
    #[must_use]
    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(lowercase_query);
        hit(&self.name)
            || hit(&self.description)
            || self.tags.iter().any(|tag| hit(tag))
            || self.ingredients.iter().any(|ingredient| hit(ingredient))
    }

    /// Whether the product carries `tag` (case-sensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check the per-record invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.as_i32() <= 0 {
            return Err(ProductError::NonPositiveId(self.id));
        }
        if self.sizes.is_empty() {
            return Err(ProductError::NoSizes(self.id));
        }
        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(ProductError::RatingOutOfRange {
                id: self.id,
                rating: self.rating,
            });
        }
        if self.price.is_sign_negative() || self.sizes.iter().any(|s| s.price.is_sign_negative()) {
            return Err(ProductError::NegativePrice(self.id));
        }
        Ok(())
    }
}

/// Check every record plus catalog-wide ID uniqueness.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_catalog(products: &[Product]) -> Result<(), ProductError> {
    let mut seen = std::collections::HashSet::with_capacity(products.len());
    for product in products {
        product.validate()?;
        if !seen.insert(product.id) {
            return Err(ProductError::DuplicateId(product.id));
        }
    }
    Ok(())
}

/// Bring a stored catalog back within its invariants, record by record.
///
/// Out-of-range ratings are clamped into 0..=5 and negative prices raised to
/// zero. Records that cannot be mended (non-positive ID, no sizes, or an ID
/// already used earlier in the list) are dropped. Returns the kept records
/// with one [`ProductError`] per mended or dropped record problem.
#[must_use]
pub fn repair_catalog(products: Vec<Product>) -> (Vec<Product>, Vec<ProductError>) {
    let mut seen = std::collections::HashSet::with_capacity(products.len());
    let mut issues = Vec::new();

    let kept = products
        .into_iter()
        .filter_map(|mut product| {
            if product.rating < Decimal::ZERO || product.rating > MAX_RATING {
                issues.push(ProductError::RatingOutOfRange {
                    id: product.id,
                    rating: product.rating,
                });
                product.rating = product.rating.clamp(Decimal::ZERO, MAX_RATING);
            }
            if product.price.is_sign_negative()
                || product.sizes.iter().any(|s| s.price.is_sign_negative())
            {
                issues.push(ProductError::NegativePrice(product.id));
                product.price = product.price.max(Decimal::ZERO);
                for size in &mut product.sizes {
                    size.price = size.price.max(Decimal::ZERO);
                }
            }
            if let Err(e) = product.validate() {
                issues.push(e);
                return None;
            }
            if !seen.insert(product.id) {
                issues.push(ProductError::DuplicateId(product.id));
                return None;
            }
            Some(product)
        })
        .collect();

    (kept, issues)
}

/// Next free ID: one past the largest existing ID, or 1 for an empty catalog.
#[must_use]
pub fn next_product_id(products: &[Product]) -> ProductId {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(ProductId::new(0))
        .next()
}
