//! Catalog Service - turns raw source rows into a validated catalog
//!
//! Each row is handled on its own: a row missing a title, an author or a
//! numeric rating is dropped; unparsable optional fields fall back to their
//! "unknown" value and never cost the row.

use chrono::NaiveDate;
use std::path::Path;

use crate::domain::{CatalogRepository, DomainError};
use crate::models::{Book, Catalog, PageCount, PublicationDate};
use crate::modules::import::{self, RawRecord};
use crate::services::similarity;

/// Date layouts seen in catalog exports, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Build a catalog from well-formed source rows, keeping source order.
pub fn normalize(records: Vec<RawRecord>) -> Catalog {
    let total = records.len();
    let books: Vec<Book> = records
        .into_iter()
        .filter_map(normalize_record)
        .enumerate()
        .map(|(id, mut book)| {
            book.id = id;
            book
        })
        .collect();

    let dropped = total - books.len();
    if dropped > 0 {
        tracing::info!(
            "Normalized {} books, dropped {} records missing title, authors or rating",
            books.len(),
            dropped
        );
    } else {
        tracing::info!("Normalized {} books", books.len());
    }

    Catalog::new(books)
}

/// Read and normalize the catalog file at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, DomainError> {
    let records = import::read_catalog_file(path)?;
    Ok(normalize(records))
}

/// Rebuild the catalog from `path` and swap it into `repo`.
///
/// On failure the current catalog stays in place.
pub fn reload_catalog(repo: &dyn CatalogRepository, path: &Path) -> Result<usize, DomainError> {
    let catalog = load_catalog(path)?;
    let count = catalog.len();
    repo.replace(catalog);
    tracing::info!("Catalog reloaded from {}: {} books", path.display(), count);
    Ok(count)
}

fn normalize_record(record: RawRecord) -> Option<Book> {
    let title = non_empty(record.title)?;
    let authors = non_empty(record.authors)?;
    let average_rating = record
        .average_rating
        .as_deref()
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())?;

    let clean_title = clean_title(&title);
    let title_key = similarity::title_key(&clean_title);
    let author_keys = similarity::author_set(&authors);
    let title_lower = title.to_lowercase();
    let authors_lower = authors.to_lowercase();

    Some(Book {
        id: 0,
        source_id: non_empty(record.source_id),
        title,
        clean_title,
        authors,
        average_rating,
        ratings_count: record
            .ratings_count
            .as_deref()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0),
        num_pages: parse_pages(record.num_pages.as_deref()),
        publication_date: parse_date(record.publication_date.as_deref()),
        title_key,
        author_keys,
        title_lower,
        authors_lower,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Remove the first parenthesised span, e.g. a series annotation.
///
/// Only the first group goes, so "A (B) C (D)" becomes "A  C (D)". An
/// unbalanced "(" leaves the title untouched, and a title that is nothing
/// but the annotation keeps its original text.
pub fn clean_title(title: &str) -> String {
    let Some(open) = title.find('(') else {
        return title.trim().to_string();
    };

    let mut depth = 0usize;
    let mut close = None;
    for (offset, c) in title[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        return title.trim().to_string();
    };

    let stripped = format!("{}{}", &title[..open], &title[close + 1..]);
    let stripped = stripped.trim();
    if stripped.is_empty() {
        title.trim().to_string()
    } else {
        stripped.to_string()
    }
}

fn parse_pages(raw: Option<&str>) -> PageCount {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .map_or(PageCount::Unknown, PageCount::Known)
}

fn parse_date(raw: Option<&str>) -> PublicationDate {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return PublicationDate::Unknown;
    };

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map_or(PublicationDate::Unknown, PublicationDate::Known)
}
