//! Services Layer
//!
//! This module contains pure business logic kept apart from HTTP handlers.
//! Services take a catalog snapshot and never touch the request layer.

pub mod catalog_service;
pub mod recommend_service;
pub mod similarity;

// Re-export for convenience
pub use catalog_service::{load_catalog, normalize, reload_catalog};
pub use recommend_service::{recommend, suggest};
pub use similarity::{author_similarity, title_similarity};
