//! Error types for the catalog and cart stores.
//!
//! Lookups never fail: unknown IDs and categories yield empty results. Errors
//! are reserved for persistence failures and for mutations that name
//! something that does not exist.

use thiserror::Error;

use rootsnjuices_core::{ProductError, ProductId};

use crate::storage::StorageError;

/// Errors raised by the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be serialized or parsed.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record violates catalog invariants.
    #[error("invalid catalog: {0}")]
    Invalid(#[from] ProductError),

    /// No product with this ID exists.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Errors raised when adding catalog products to a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product does not offer the requested size.
    #[error("product {product_id} has no size {size:?}")]
    UnknownSize {
        /// Product that was looked up.
        product_id: ProductId,
        /// Requested size label.
        size: String,
    },

    /// The product has no sizes at all.
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
}

/// Unified error type for session-level operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
