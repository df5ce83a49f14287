//! Repository trait definitions
//!
//! These traits define the contract for catalog access.
//! Implementations live in the infrastructure layer.

use std::sync::Arc;

use crate::models::Catalog;

/// Holder of the process-wide catalog.
///
/// `snapshot` hands out the catalog current at call time; a later `replace`
/// never affects a snapshot already taken.
pub trait CatalogRepository: Send + Sync {
    /// Current catalog
    fn snapshot(&self) -> Arc<Catalog>;

    /// Swap in a freshly built catalog
    fn replace(&self, catalog: Catalog);
}
