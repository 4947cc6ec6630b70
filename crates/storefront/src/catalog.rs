//! Catalog store: the product list, persisted as one snapshot.
//!
//! Every read goes back to storage, so a store always reflects the latest
//! snapshot regardless of which context wrote it. Mutations rewrite the whole
//! snapshot (last writer wins) and then notify this store's observers. Writes
//! made by other stores sharing the storage reach observers through the
//! storage's event stream; writes by other processes through
//! [`CatalogStore::sync_external`].

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument, warn};

use rootsnjuices_core::{
    CategoryFilter, Product, ProductDraft, ProductId, default_catalog, next_product_id,
    repair_catalog, validate_catalog,
};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::notify::{Listeners, Subscription};
use crate::storage::{ContextId, Storage, StorageEvent};

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Owner of the product catalog for one browsing context.
pub struct CatalogStore<S: Storage> {
    storage: S,
    config: CatalogConfig,
    context: ContextId,
    observers: Listeners<()>,
    /// Raw snapshot observers were last brought up to date with: the one
    /// present at open, then own writes, storage events and polls. Plain reads
    /// never move it.
    last_notified: Arc<Mutex<Option<String>>>,
    _storage_watch: Subscription,
}

impl<S: Storage> CatalogStore<S> {
    /// Create a store with the default key and default image.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, CatalogConfig::default())
    }

    /// Create a store with explicit settings.
    ///
    /// The snapshot present at open is the baseline for
    /// [`CatalogStore::sync_external`]; an unreadable one counts as absent.
    pub fn with_config(storage: S, config: CatalogConfig) -> Self {
        let context = ContextId::new();
        let observers = Listeners::new();
        let baseline = storage.get(&config.storage_key).unwrap_or_else(|e| {
            warn!(error = %e, "catalog snapshot unreadable at open");
            None
        });
        let last_notified = Arc::new(Mutex::new(baseline));

        let watch = {
            let observers = observers.clone();
            let last_notified = Arc::clone(&last_notified);
            let key = config.storage_key.clone();
            storage.watch(Box::new(move |event: &StorageEvent| {
                if event.key != key || event.origin == context {
                    return;
                }
                debug!(%context, origin = %event.origin, "catalog changed in another context");
                *last_notified.lock().unwrap_or_else(PoisonError::into_inner) =
                    event.new_value.clone();
                observers.emit(&());
            }))
        };

        debug!(%context, key = %config.storage_key, "catalog store opened");
        Self {
            storage,
            config,
            context,
            observers,
            last_notified,
            _storage_watch: watch,
        }
    }

    /// Context this store writes as.
    #[must_use]
    pub const fn context(&self) -> ContextId {
        self.context
    }

    /// Settings this store was opened with.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Register an observer called after every catalog change.
    ///
    /// The callback carries no payload; observers re-read the catalog.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observers.subscribe(move |()| callback())
    }

    /// Current catalog.
    ///
    /// Falls back to the built-in catalog, and persists it, when the snapshot
    /// is missing, unreadable, or not a product list. A parsable snapshot with
    /// bad records is mended record by record instead (see
    /// [`repair_catalog`]); the stored snapshot is left as it is until the
    /// next save.
    #[instrument(skip(self), fields(context = %self.context))]
    pub fn load_catalog(&self) -> Vec<Product> {
        match self.read_snapshot() {
            Ok(Some(products)) => return products,
            Ok(None) => debug!("no catalog snapshot, seeding defaults"),
            Err(e) => warn!(error = %e, "discarding unusable catalog snapshot"),
        }

        let defaults = default_catalog();
        if let Err(e) = self.write_snapshot(&defaults) {
            warn!(error = %e, "failed to persist default catalog");
        }
        defaults
    }

    /// Replace the whole snapshot and notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the list violates catalog invariants or cannot be
    /// written. Nothing is persisted or notified in that case.
    #[instrument(skip(self, products), fields(context = %self.context, count = products.len()))]
    pub fn save_catalog(&self, products: &[Product]) -> Result<()> {
        validate_catalog(products)?;
        self.write_snapshot(products)?;
        let notified = self.observers.emit(&());
        debug!(notified, "catalog saved");
        Ok(())
    }

    /// Create a product from an admin draft.
    ///
    /// The new ID is one past the largest existing ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    #[instrument(skip(self, draft), fields(context = %self.context, name = %draft.name))]
    pub fn add_product(&self, draft: &ProductDraft) -> Result<Product> {
        let mut products = self.load_catalog();
        let id = next_product_id(&products);

        let mut product = draft.to_product(id);
        if product.image.trim().is_empty() {
            product.image.clone_from(&self.config.default_image);
        }

        products.push(product.clone());
        self.save_catalog(&products)?;
        info!(%id, "product added");
        Ok(product)
    }

    /// Replace the product with `id` by the normalized draft.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no such product exists, or an
    /// error if the snapshot cannot be written.
    #[instrument(skip(self, draft), fields(context = %self.context))]
    pub fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product> {
        let mut products = self.load_catalog();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        let product = draft.to_product(id);
        *slot = product.clone();
        self.save_catalog(&products)?;
        info!(%id, "product updated");
        Ok(product)
    }

    /// Delete the product with `id`.
    ///
    /// Returns the removed product, or `None` (without writing) if it did not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    #[instrument(skip(self), fields(context = %self.context))]
    pub fn delete_product(&self, id: ProductId) -> Result<Option<Product>> {
        let mut products = self.load_catalog();
        let Some(index) = products.iter().position(|p| p.id == id) else {
            debug!(%id, "delete of unknown product ignored");
            return Ok(None);
        };

        let removed = products.remove(index);
        self.save_catalog(&products)?;
        info!(%id, "product deleted");
        Ok(Some(removed))
    }

    /// Overwrite the snapshot with the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn reset_to_defaults(&self) -> Result<Vec<Product>> {
        let defaults = default_catalog();
        self.save_catalog(&defaults)?;
        info!(count = defaults.len(), "catalog reset to defaults");
        Ok(defaults)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<Product> {
        self.load_catalog().into_iter().find(|p| p.id == id)
    }

    /// Products in the category named by `slug`; `"all"` selects everything.
    ///
    /// Unknown slugs yield an empty list.
    #[must_use]
    pub fn find_by_category(&self, slug: &str) -> Vec<Product> {
        let Some(filter) = CategoryFilter::parse(slug) else {
            return Vec::new();
        };
        self.load_catalog()
            .into_iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// Products whose name, description, tags or ingredients contain `query`,
    /// ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Product> {
        let query = query.to_lowercase();
        self.load_catalog()
            .into_iter()
            .filter(|p| p.matches_query(&query))
            .collect()
    }

    /// Re-read the raw snapshot and notify observers if it differs from the
    /// last one they were brought up to date with.
    ///
    /// Reading the catalog in between does not hide a change from this check.
    ///
    /// Returns whether a change was detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub fn sync_external(&self) -> Result<bool> {
        let current = self.storage.get(&self.config.storage_key)?;
        {
            let mut last_notified = self
                .last_notified
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *last_notified == current {
                return Ok(false);
            }
            *last_notified = current;
        }
        info!(context = %self.context, "external catalog change detected");
        self.observers.emit(&());
        Ok(true)
    }

    fn read_snapshot(&self) -> Result<Option<Vec<Product>>> {
        let Some(raw) = self.storage.get(&self.config.storage_key)? else {
            return Ok(None);
        };
        let stored: Vec<Product> = serde_json::from_str(&raw)?;
        let stored_len = stored.len();

        let (products, issues) = repair_catalog(stored);
        for issue in &issues {
            warn!(context = %self.context, %issue, "mending stored catalog record");
        }
        // nothing worth keeping: treat like a corrupt snapshot
        if products.is_empty()
            && stored_len > 0
            && let Some(issue) = issues.into_iter().next()
        {
            return Err(issue.into());
        }
        Ok(Some(products))
    }

    fn write_snapshot(&self, products: &[Product]) -> Result<()> {
        let raw = serde_json::to_string(products)?;
        self.storage
            .set(self.context, &self.config.storage_key, &raw)?;
        *self
            .last_notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for CatalogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("context", &self.context)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;

    use rootsnjuices_core::Category;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn store() -> CatalogStore<MemoryStorage> {
        CatalogStore::new(MemoryStorage::new())
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: Category::Salads,
            price: "8.25".to_string(),
            sizes: "Regular:8.25, Large:11.25".to_string(),
            tags: "Vegan, Organic".to_string(),
            ingredients: "Kale, Lemon".to_string(),
            rating: "4.2".to_string(),
            reviews: "3".to_string(),
            ..ProductDraft::default()
        }
    }

    fn counter<S: Storage>(store: &CatalogStore<S>) -> (Arc<AtomicUsize>, Subscription) {
        let hits = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&hits);
        let sub = store.subscribe(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        (hits, sub)
    }

    #[test]
    fn test_first_load_seeds_and_persists_defaults() {
        let store = store();
        let catalog = store.load_catalog();
        assert_eq!(catalog, default_catalog());
        let raw = store.storage().get(DEFAULT_KEY).unwrap().unwrap();
        let persisted: Vec<Product> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, catalog);
    }

    const DEFAULT_KEY: &str = crate::config::DEFAULT_CATALOG_KEY;

    #[test]
    fn test_corrupted_snapshot_falls_back_and_self_heals() {
        let store = store();
        store
            .storage()
            .set(ContextId::new(), DEFAULT_KEY, "{not json")
            .unwrap();

        assert_eq!(store.load_catalog().len(), 15);
        let raw = store.storage().get(DEFAULT_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<Product>>(&raw).is_ok());
    }

    #[test]
    fn test_duplicate_record_is_dropped_not_the_catalog() {
        let store = store();
        let mut products = default_catalog();
        products[1].id = products[0].id;
        let raw = serde_json::to_string(&products).unwrap();
        store.storage().set(ContextId::new(), DEFAULT_KEY, &raw).unwrap();

        let catalog = store.load_catalog();
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog[0], default_catalog()[0]);
        assert_eq!(catalog[1], default_catalog()[2]);
        // reading does not rewrite what another context stored
        assert_eq!(store.storage().get(DEFAULT_KEY).unwrap(), Some(raw));
    }

    #[test]
    fn test_out_of_range_rating_is_clamped_and_edits_survive() {
        let store = store();
        let mut products = default_catalog();
        products.truncate(4);
        products[0].name = "Admin Renamed".to_string();
        products[2].rating = Decimal::new(7, 0);
        let raw = serde_json::to_string(&products).unwrap();
        store.storage().set(ContextId::new(), DEFAULT_KEY, &raw).unwrap();

        let catalog = store.load_catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog[0].name, "Admin Renamed");
        assert_eq!(catalog[2].rating, Decimal::new(5, 0));
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_snapshot_of_only_broken_records_falls_back() {
        let store = store();
        let mut products = default_catalog();
        products.truncate(1);
        products[0].sizes.clear();
        let raw = serde_json::to_string(&products).unwrap();
        store.storage().set(ContextId::new(), DEFAULT_KEY, &raw).unwrap();

        assert_eq!(store.load_catalog(), default_catalog());
    }

    #[test]
    fn test_empty_snapshot_is_honoured() {
        let store = store();
        store.save_catalog(&[]).unwrap();
        assert!(store.load_catalog().is_empty());
        assert!(store.find_by_category("all").is_empty());
    }

    #[test]
    fn test_add_product_assigns_next_id_and_default_image() {
        let store = store();
        let product = store.add_product(&draft("Kale Crunch")).unwrap();
        assert_eq!(product.id, ProductId::new(16));
        assert_eq!(product.image, store.config().default_image);
        assert_eq!(store.find_by_id(product.id), Some(product));
    }

    #[test]
    fn test_add_to_empty_catalog_starts_at_one() {
        let store = store();
        store.save_catalog(&[]).unwrap();
        let product = store.add_product(&draft("First")).unwrap();
        assert_eq!(product.id, ProductId::new(1));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let store = store();
        let mut edit = ProductDraft::from_product(&store.find_by_id(ProductId::new(3)).unwrap());
        edit.price = "7.49".to_string();
        edit.image = String::new();

        let updated = store.update_product(ProductId::new(3), &edit).unwrap();
        assert_eq!(updated.price, Decimal::new(749, 2));
        assert!(updated.image.is_empty());

        let catalog = store.load_catalog();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog[2], updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found_and_silent() {
        let store = store();
        store.load_catalog();
        let (hits, _sub) = counter(&store);

        let err = store
            .update_product(ProductId::new(999), &draft("Ghost"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(999)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delete_then_find_is_absent() {
        let store = store();
        let removed = store.delete_product(ProductId::new(2)).unwrap();
        assert_eq!(removed.map(|p| p.name), Some("Green Detox".to_string()));
        assert_eq!(store.find_by_id(ProductId::new(2)), None);
        assert_eq!(store.load_catalog().len(), 14);
        assert_eq!(store.delete_product(ProductId::new(2)).unwrap(), None);
    }

    #[test]
    fn test_find_by_category() {
        let store = store();
        let shawarma = store.find_by_category("shawarma");
        assert_eq!(shawarma.len(), 2);
        assert!(shawarma.iter().all(|p| p.category == Category::Shawarma));
        assert_eq!(store.find_by_category("all").len(), 15);
        assert!(store.find_by_category("burgers").is_empty());
    }

    #[test]
    fn test_search_organic() {
        let store = store();
        let hits = store.search("ORGANIC");
        assert_eq!(
            hits.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![ProductId::new(2)]
        );
        assert!(store.search("no such thing").is_empty());
    }

    #[test]
    fn test_every_mutation_notifies_once() {
        let store = store();
        let (hits, sub) = counter(&store);

        store.add_product(&draft("A")).unwrap();
        store.update_product(ProductId::new(1), &draft("B")).unwrap();
        store.delete_product(ProductId::new(1)).unwrap();
        store.delete_product(ProductId::new(1)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        sub.unsubscribe();
        store.reset_to_defaults().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_loading_does_not_notify() {
        let store = store();
        let (hits, _sub) = counter(&store);
        store.load_catalog();
        store.search("kale");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_save_rejects_invalid_catalog() {
        let store = store();
        let mut products = default_catalog();
        products[0].sizes.clear();
        assert!(matches!(
            store.save_catalog(&products),
            Err(CatalogError::Invalid(_))
        ));
        assert_eq!(store.load_catalog(), default_catalog());
    }

    #[test]
    fn test_other_context_writes_reach_observers() {
        let storage = MemoryStorage::new();
        let admin = CatalogStore::new(storage.clone());
        let shopper = CatalogStore::new(storage);
        shopper.load_catalog();
        let (hits, _sub) = counter(&shopper);

        admin.delete_product(ProductId::new(4)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(shopper.find_by_id(ProductId::new(4)), None);
        // the event already delivered this change
        assert!(!shopper.sync_external().unwrap());
    }

    #[test]
    fn test_own_writes_are_not_echoed_by_storage_events() {
        let store = store();
        let (hits, _sub) = counter(&store);
        store.add_product(&draft("Once")).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sync_external_detects_foreign_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(FileStorage::new(dir.path()));
        store.load_catalog();
        assert!(!store.sync_external().unwrap());

        let (hits, _sub) = counter(&store);
        let mut products = default_catalog();
        products.truncate(3);
        // another process rewrites the snapshot file behind our back
        std::fs::write(
            store.storage().path_for(DEFAULT_KEY).unwrap(),
            serde_json::to_string(&products).unwrap(),
        )
        .unwrap();

        assert!(store.sync_external().unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!store.sync_external().unwrap());
        assert_eq!(store.load_catalog().len(), 3);
    }

    #[test]
    fn test_reads_do_not_hide_external_writes_from_sync() {
        let dir = tempfile::tempdir().unwrap();
        let view = CatalogStore::new(FileStorage::new(dir.path()));
        view.load_catalog();
        let (hits, _sub) = counter(&view);

        // separate handle: no shared watchers, like another process
        let elsewhere = CatalogStore::new(FileStorage::new(dir.path()));
        elsewhere.delete_product(ProductId::new(1)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        assert!(view.find_by_id(ProductId::new(2)).is_some());
        view.search("kale");
        assert!(view.sync_external().unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!view.sync_external().unwrap());
    }

    #[test]
    fn test_store_opened_on_existing_snapshot_starts_in_sync() {
        let storage = MemoryStorage::new();
        CatalogStore::new(storage.clone()).load_catalog();

        let late = CatalogStore::new(storage);
        assert!(!late.sync_external().unwrap());
    }
}
