use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Marker rendered wherever an optional catalog field has no value.
pub const UNKNOWN: &str = "unknown";

/// Page count as found in the source; many rows omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCount {
    Known(u32),
    Unknown,
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCount::Known(pages) => write!(f, "{}", pages),
            PageCount::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for PageCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageCount::Known(pages) => serializer.serialize_u32(*pages),
            PageCount::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationDate {
    Known(NaiveDate),
    Unknown,
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationDate::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PublicationDate::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for PublicationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A validated catalog entry.
///
/// Only built by the catalog normalizer, so `title` and `authors` are never
/// empty and `average_rating` is always finite.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub title: String,
    pub clean_title: String,
    pub authors: String,
    pub average_rating: f64,
    pub ratings_count: u64,
    pub num_pages: PageCount,
    pub publication_date: PublicationDate,
    /// Lowercased `clean_title`, split into chars for block matching
    #[serde(skip)]
    pub(crate) title_key: Vec<char>,
    #[serde(skip)]
    pub(crate) author_keys: BTreeSet<String>,
    /// Lowercased `title` and `authors` for substring suggestions
    #[serde(skip)]
    pub(crate) title_lower: String,
    #[serde(skip)]
    pub(crate) authors_lower: String,
}

impl Book {
    pub fn title_key(&self) -> &[char] {
        &self.title_key
    }

    pub fn author_keys(&self) -> &BTreeSet<String> {
        &self.author_keys
    }

    pub fn title_lower(&self) -> &str {
        &self.title_lower
    }

    pub fn authors_lower(&self) -> &str {
        &self.authors_lower
    }
}
