//! In-memory implementation of CatalogRepository

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::CatalogRepository;
use crate::models::Catalog;

/// Holds the current catalog behind an `Arc` that is swapped whole on reload.
///
/// The lock guards only the pointer; scoring runs on the cloned `Arc` with no
/// lock held.
pub struct InMemoryCatalogRepository {
    current: RwLock<Arc<Catalog>>,
}

impl InMemoryCatalogRepository {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn snapshot(&self) -> Arc<Catalog> {
        // Poisoning cannot expose a partial catalog: writers build the Arc before locking
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, catalog: Catalog) {
        let fresh = Arc::new(catalog);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh;
    }
}
