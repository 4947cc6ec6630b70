//! Per-context session state: one catalog store handle plus one cart.

use tracing::debug;

use rootsnjuices_core::ProductId;

use crate::cart::{Cart, CartSummary};
use crate::catalog::CatalogStore;
use crate::config::{CatalogConfig, StorefrontConfig};
use crate::error::{Result, StorefrontError};
use crate::storage::{FileStorage, Storage};

/// State owned by one browsing context.
///
/// Sessions sharing a storage see each other's catalog edits; carts are
/// never shared.
pub struct Session<S: Storage> {
    catalog: CatalogStore<S>,
    cart: Cart,
}

impl Session<FileStorage> {
    /// Open a session over the file storage in `config.data_dir`.
    #[must_use]
    pub fn open(config: &StorefrontConfig) -> Self {
        Self::new(FileStorage::new(config.data_dir.clone()), config.catalog.clone())
    }
}

impl<S: Storage> Session<S> {
    /// Create a session with an empty cart.
    pub fn new(storage: S, config: CatalogConfig) -> Self {
        let catalog = CatalogStore::with_config(storage, config);
        debug!(context = %catalog.context(), "session opened");
        Self {
            catalog,
            cart: Cart::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore<S> {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// `size` defaults to the product's first size.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] if the product is not in the
    /// catalog, or a cart error if it does not offer `size`.
    pub fn add_to_cart(&mut self, product_id: ProductId, size: Option<&str>) -> Result<()> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {product_id}")))?;
        self.cart.add_product(&product, size)?;
        Ok(())
    }

    /// Display data for the current cart.
    #[must_use]
    pub fn checkout_quote(&self) -> CartSummary {
        self.cart.summary()
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    fn session(storage: &MemoryStorage) -> Session<MemoryStorage> {
        Session::new(storage.clone(), CatalogConfig::default())
    }

    #[test]
    fn test_add_to_cart_uses_default_size() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.add_to_cart(ProductId::new(1), None).unwrap();
        session.add_to_cart(ProductId::new(1), None).unwrap();

        let quote = session.checkout_quote();
        assert_eq!(quote.item_count, 2);
        assert_eq!(quote.subtotal, "$11.98");
        assert_eq!(quote.items[0].size, "250ml");
    }

    #[test]
    fn test_add_unknown_product() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        let err = session.add_to_cart(ProductId::new(404), None).unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(_)));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_carts_are_per_session() {
        let storage = MemoryStorage::new();
        let mut first = session(&storage);
        let second = session(&storage);
        first.add_to_cart(ProductId::new(2), Some("1L")).unwrap();
        assert!(second.cart().is_empty());
        assert_ne!(first.catalog().context(), second.catalog().context());
    }

    #[test]
    fn test_cart_lines_survive_catalog_delete() {
        let storage = MemoryStorage::new();
        let mut shopper = session(&storage);
        let admin = session(&storage);
        shopper.add_to_cart(ProductId::new(3), None).unwrap();
        admin.catalog().delete_product(ProductId::new(3)).unwrap();

        assert_eq!(shopper.cart().total_items(), 1);
        assert_eq!(shopper.catalog().find_by_id(ProductId::new(3)), None);
    }
}
