pub mod book;
pub mod catalog;
pub mod recommendation;

pub use book::{Book, PageCount, PublicationDate};
pub use catalog::Catalog;
pub use recommendation::{Recommendation, SearchMode};
