//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_DATA_DIR` - Directory holding persisted snapshots (default: `.rootsnjuices`)
//! - `STOREFRONT_CATALOG_KEY` - Storage key of the catalog snapshot (default: `freshlife_products`)
//! - `STOREFRONT_DEFAULT_IMAGE` - Image URL given to products created without one

use std::path::PathBuf;

use thiserror::Error;

use rootsnjuices_core::DEFAULT_PRODUCT_IMAGE;

use crate::storage::validate_key;

/// Storage key the catalog snapshot lives under unless configured otherwise.
pub const DEFAULT_CATALOG_KEY: &str = "freshlife_products";

/// Data directory used unless configured otherwise.
pub const DEFAULT_DATA_DIR: &str = ".rootsnjuices";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory used by file-backed storage
    pub data_dir: PathBuf,
    /// Catalog store settings
    pub catalog: CatalogConfig,
}

/// Catalog store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Storage key of the catalog snapshot
    pub storage_key: String,
    /// Image URL for products created without one
    pub default_image: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CATALOG_KEY.to_owned(),
            default_image: DEFAULT_PRODUCT_IMAGE.to_owned(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog: CatalogConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let data_dir = get("STOREFRONT_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let storage_key =
            get("STOREFRONT_CATALOG_KEY").unwrap_or_else(|| DEFAULT_CATALOG_KEY.to_owned());
        validate_key(&storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_CATALOG_KEY".to_string(), e.to_string())
        })?;

        let default_image =
            get("STOREFRONT_DEFAULT_IMAGE").unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_owned());

        Ok(Self {
            data_dir,
            catalog: CatalogConfig {
                storage_key,
                default_image,
            },
        })
    }
}
