//! CSV article import.
//!
//! Expects a header row with the columns `URL`, `Writer`, `Publish Date`
//! (DD/MM/YYYY) and `Word Count`. Rows that lack a writer, date, or word
//! count, or whose values do not parse, are skipped. Import fails only
//! when no valid row remains.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::core::engine::Article;
use crate::error::{Result, SimError};

pub const COL_URL: &str = "URL";
pub const COL_WRITER: &str = "Writer";
pub const COL_PUBLISH_DATE: &str = "Publish Date";
pub const COL_WORD_COUNT: &str = "Word Count";

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub articles: Vec<Article>,
    /// Rows dropped as malformed.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    url: Option<usize>,
    writer: Option<usize>,
    publish_date: Option<usize>,
    word_count: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        Self {
            url: find(COL_URL),
            writer: find(COL_WRITER),
            publish_date: find(COL_PUBLISH_DATE),
            word_count: find(COL_WORD_COUNT),
        }
    }
}

/// Import articles from any CSV reader.
///
/// # Errors
///
/// `SimError::NoValidRows` when nothing usable was found, `SimError::Csv`
/// when the header row itself cannot be read.
pub fn import_articles<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?);
    if columns.writer.is_none() || columns.publish_date.is_none() || columns.word_count.is_none()
    {
        tracing::warn!(?columns, "CSV header is missing required columns");
    }

    let mut articles = Vec::new();
    let mut skipped = 0;

    for (index, record) in rdr.records().enumerate() {
        let row = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(row, error = %e, "Skipping unreadable row");
                skipped += 1;
                continue;
            }
        };

        match parse_row(&record, columns) {
            Some(article) => articles.push(article),
            None => {
                tracing::debug!(row, "Skipping malformed row");
                skipped += 1;
            }
        }
    }

    if articles.is_empty() {
        return Err(SimError::NoValidRows { skipped });
    }

    tracing::info!(imported = articles.len(), skipped, "Imported articles");
    Ok(ImportReport { articles, skipped })
}

/// Import articles from a CSV file on disk.
///
/// # Errors
///
/// I/O errors opening the file, plus everything [`import_articles`] returns.
pub fn import_articles_from_path(path: &Path) -> Result<ImportReport> {
    tracing::debug!(?path, "Opening article CSV");
    let file = File::open(path).map_err(|e| SimError::CsvUnreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    import_articles(file)
}

fn parse_row(record: &csv::StringRecord, columns: Columns) -> Option<Article> {
    let field = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let writer = field(columns.writer)?;
    let word_count = field(columns.word_count)?.parse::<u64>().ok()?;
    let publish_date = parse_date(field(columns.publish_date)?)?;
    let url = field(columns.url).unwrap_or_default();

    Some(Article {
        url: url.to_string(),
        writer: writer.to_string(),
        publish_date,
        word_count,
    })
}

/// Parse a `DD/MM/YYYY` date. Impossible calendar dates are rejected.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if year.len() != 4 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{day}/{month}/{year}"), DATE_FORMAT).ok()
}
