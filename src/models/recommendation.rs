use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Book;
use crate::domain::DomainError;

/// What the query string is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Title,
    Author,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchMode::Title),
            "author" => Ok(SearchMode::Author),
            other => Err(DomainError::ContractViolation(format!(
                "unknown search mode '{}', expected 'title' or 'author'",
                other
            ))),
        }
    }
}

/// One scored result, borrowing its book from the catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation<'a> {
    pub book: &'a Book,
    pub similarity: f64,
}
