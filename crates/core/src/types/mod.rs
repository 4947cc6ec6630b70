//! Core types for the Roots n Juices storefront.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod category;
pub mod draft;
pub mod id;
pub mod price;
pub mod product;

pub use category::{Category, CategoryFilter};
pub use draft::{DraftIssue, ProductDraft};
pub use id::*;
pub use price::Price;
pub use product::{
    NutritionInfo, Product, ProductError, SizeOption, next_product_id, repair_catalog,
    validate_catalog,
};
