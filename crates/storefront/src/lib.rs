//! Roots n Juices storefront library.
//!
//! Catalog and cart stores for one browsing context, the key-value storage
//! they persist through, and the listing and dashboard views built on top.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod listing;
pub mod notify;
pub mod state;
pub mod stats;
pub mod storage;

pub use cart::{Cart, CartItemView, CartLine, CartSummary};
pub use catalog::CatalogStore;
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
pub use error::{CartError, CatalogError, StorefrontError};
pub use listing::{ListingQuery, SortOrder};
pub use notify::Subscription;
pub use state::Session;
pub use stats::CatalogStats;
pub use storage::{ContextId, FileStorage, MemoryStorage, Storage, StorageError, StorageEvent};
