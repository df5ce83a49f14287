//! Catalog source ingestion
//!
//! Reads a delimited catalog file with a header row. Rows whose field count
//! disagrees with the header, or that are not valid UTF-8, are skipped here so
//! that the normalizer only ever sees well-formed rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::DomainError;

/// One well-formed source row, fields looked up by column name.
///
/// Every field is optional: a column may be missing from the file entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub source_id: Option<String>,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub average_rating: Option<String>,
    pub num_pages: Option<String>,
    pub ratings_count: Option<String>,
    pub publication_date: Option<String>,
}

/// Header positions of the columns we understand.
#[derive(Debug, Default)]
struct ColumnIndex {
    source_id: Option<usize>,
    title: Option<usize>,
    authors: Option<usize>,
    average_rating: Option<usize>,
    num_pages: Option<usize>,
    ratings_count: Option<usize>,
    publication_date: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };

        Self {
            source_id: find(&["bookID", "book_id", "id"]),
            title: find(&["title"]),
            authors: find(&["authors", "author"]),
            average_rating: find(&["average_rating"]),
            num_pages: find(&["num_pages"]),
            ratings_count: find(&["ratings_count"]),
            publication_date: find(&["publication_date"]),
        }
    }
}

/// Parse catalog rows from any reader (file contents, in-memory bytes).
pub fn parse_catalog_csv<R: Read>(content: R) -> Result<Vec<RawRecord>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content);

    let headers = rdr
        .headers()
        .map_err(|e| DomainError::Ingest(format!("unreadable header row: {}", e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers);

    if columns.title.is_none() || columns.authors.is_none() || columns.average_rating.is_none() {
        tracing::warn!(
            "Catalog header is missing a required column (title, authors, average_rating): {:?}",
            headers
        );
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(DomainError::Ingest(format!("read failed: {}", e)));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };

        if row.len() != headers.len() {
            tracing::warn!(
                "Skipping malformed row {}: expected {} fields, found {}",
                line + 2,
                headers.len(),
                row.len()
            );
            skipped += 1;
            continue;
        }

        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);

        records.push(RawRecord {
            source_id: field(columns.source_id),
            title: field(columns.title),
            authors: field(columns.authors),
            average_rating: field(columns.average_rating),
            num_pages: field(columns.num_pages),
            ratings_count: field(columns.ratings_count),
            publication_date: field(columns.publication_date),
        });
    }

    tracing::info!(
        "Read {} catalog rows ({} malformed rows skipped)",
        records.len(),
        skipped
    );

    Ok(records)
}

/// Open and parse a catalog file. A missing or unreadable file is an ingest error.
pub fn read_catalog_file(path: &Path) -> Result<Vec<RawRecord>, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::Ingest(format!("cannot open {}: {}", path.display(), e)))?;
    parse_catalog_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "bookID,title,authors,average_rating,  num_pages,ratings_count,publication_date\n";

    #[test]
    fn test_parse_rows_by_column_name() {
        let data = format!(
            "{}1,Dune,Frank Herbert,4.25,604,1000,8/1/1965\n",
            HEADER
        );
        let records = parse_catalog_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Dune"));
        assert_eq!(records[0].source_id.as_deref(), Some("1"));
        // Header "  num_pages" is matched after trimming
        assert_eq!(records[0].num_pages.as_deref(), Some("604"));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let data = format!(
            "{}1,Dune,Frank Herbert,4.25,604,1000,8/1/1965\n2,Broken,row\n3,Emma,Jane Austen,4.0,300,50,1/1/1815\n",
            HEADER
        );
        let records = parse_catalog_csv(data.as_bytes()).unwrap();

        let titles: Vec<_> = records.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let mut data = HEADER.as_bytes().to_vec();
        data.extend_from_slice(b"1,Bad \xff title,Someone,3.0,1,1,1/1/2000\n");
        data.extend_from_slice(b"2,Emma,Jane Austen,4.0,300,50,1/1/1815\n");

        let records = parse_catalog_csv(data.as_slice()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Emma"));
    }

    #[test]
    fn test_missing_optional_columns_are_tolerated() {
        let data = "title,authors,average_rating\nDune,Frank Herbert,4.25\n";
        let records = parse_catalog_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].num_pages, None);
        assert_eq!(records[0].publication_date, None);
        assert_eq!(records[0].source_id, None);
    }

    #[test]
    fn test_missing_file_is_ingest_error() {
        let result = read_catalog_file(Path::new("/nonexistent/bookbuddy/books.csv"));
        assert!(matches!(result, Err(DomainError::Ingest(_))));
    }
}
