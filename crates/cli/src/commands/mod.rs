//! Subcommand implementations.

pub mod cart;
pub mod catalog;

use std::path::{Path, PathBuf};

use thiserror::Error;

use rootsnjuices_core::{ProductDraft, ProductId};
use rootsnjuices_storefront::{CatalogError, ConfigError, StorefrontError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog operation failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Session operation failed.
    #[error("{0}")]
    Storefront(#[from] StorefrontError),

    /// Draft file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Draft file is not valid YAML.
    #[error("Invalid draft file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Product could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// No product with this ID exists.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// A command argument could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Read an admin draft from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn read_draft(path: &Path) -> Result<ProductDraft, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_yaml::from_str(&content).map_err(|source| CliError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
