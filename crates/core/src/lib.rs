//! Roots n Juices Core - Shared types library.
//!
//! This crate provides common types used across all storefront components:
//! - `storefront` - Catalog and cart stores, listing and admin statistics
//! - `cli` - Command-line tools for catalog management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, drafts, categories, IDs and prices
//! - [`defaults`] - The built-in menu used to seed the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod defaults;
pub mod types;

pub use defaults::{DEFAULT_PRODUCT_IMAGE, default_catalog};
pub use types::*;
