//! Application state containing the catalog handle and shared settings

use std::sync::Arc;

use crate::domain::CatalogRepository;
use crate::infrastructure::{Config, InMemoryCatalogRepository};
use crate::models::Catalog;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Current catalog, swapped on reload
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            catalog_repo: Arc::new(InMemoryCatalogRepository::new(catalog)),
            config: Arc::new(config),
        }
    }
}
