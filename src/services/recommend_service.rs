//! Recommend Service - ranks catalog entries against a query
//!
//! Every call scores the whole catalog; there is no index and no early exit.
//! Results are ordered by similarity, then by average rating, both descending,
//! with catalog order deciding any remaining ties.

use std::collections::HashSet;

use crate::domain::DomainError;
use crate::models::{Catalog, Recommendation, SearchMode};
use crate::services::{catalog_service, similarity};

/// Top `limit` books most similar to `query` under `mode`.
///
/// In title mode the query gets the same annotation stripping as catalog
/// titles, and a book whose clean title matches it exactly is left out, since
/// the caller already has that book. An empty result is not an
/// error.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    query: &str,
    mode: SearchMode,
    limit: usize,
) -> Result<Vec<Recommendation<'a>>, DomainError> {
    if limit < 1 {
        return Err(DomainError::ContractViolation(format!(
            "limit must be at least 1, got {}",
            limit
        )));
    }

    let mut scored: Vec<Recommendation<'a>> = match mode {
        SearchMode::Title => {
            // Queries often come back from suggestions with the series annotation attached
            let key = similarity::title_key(&catalog_service::clean_title(query));
            catalog
                .books()
                .iter()
                .map(|book| Recommendation {
                    book,
                    similarity: similarity::block_ratio(&key, book.title_key()),
                })
                .filter(|rec| rec.similarity < 1.0)
                .collect()
        }
        SearchMode::Author => {
            let names = similarity::author_set(query);
            catalog
                .books()
                .iter()
                .map(|book| Recommendation {
                    book,
                    similarity: similarity::jaccard(&names, book.author_keys()),
                })
                .collect()
        }
    };

    let candidates = scored.len();

    // sort_by is stable, so equal keys keep catalog order
    scored.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| b.book.average_rating.total_cmp(&a.book.average_rating))
    });
    scored.truncate(limit);

    tracing::debug!(
        "Recommend by {} for {:?}: {} candidates scored, returning {}",
        mode,
        query,
        candidates,
        scored.len()
    );

    Ok(scored)
}

/// Distinct titles (or author fields) containing `input`, case-insensitively,
/// in catalog order. An empty input matches everything.
pub fn suggest<'a>(
    catalog: &'a Catalog,
    input: &str,
    mode: SearchMode,
    limit: usize,
) -> Vec<&'a str> {
    let needle = input.trim().to_lowercase();
    let mut seen = HashSet::new();

    catalog
        .books()
        .iter()
        .filter_map(|book| match mode {
            SearchMode::Title => book
                .title_lower()
                .contains(&needle)
                .then_some(book.title.as_str()),
            SearchMode::Author => book
                .authors_lower()
                .contains(&needle)
                .then_some(book.authors.as_str()),
        })
        .filter(|field| seen.insert(*field))
        .take(limit)
        .collect()
}
