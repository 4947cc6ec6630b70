//! Integration tests for Roots n Juices.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rootsnjuices-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_sync` - Several contexts sharing one storage
//! - `shopping_flow` - Browsing, cart and checkout quote end to end
//!
//! Everything runs against in-memory or temp-dir storage; no external
//! services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rootsnjuices_storefront::{CatalogStore, Storage, Subscription};

/// Counts catalog change notifications for one store.
pub struct ChangeCounter {
    hits: Arc<AtomicUsize>,
    _subscription: Subscription,
}

impl ChangeCounter {
    /// Subscribe to `store` and start counting.
    #[must_use]
    pub fn attach<S: Storage>(store: &CatalogStore<S>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&hits);
        let subscription = store.subscribe(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        Self {
            hits,
            _subscription: subscription,
        }
    }

    /// Notifications received so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
