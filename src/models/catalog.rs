use super::Book;

/// Immutable, ordered collection of normalized books.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
