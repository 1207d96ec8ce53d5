//! Test utilities for pricesim.
//!
//! Provides shared helpers, test data factories, and assertion macros
//! for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pricesim::test_utils::*;
//!
//! let article = make_test_article("Alice", 1200);
//! let dir = TestDir::new();
//! let csv = dir.create_file("articles.csv", &make_test_csv(&[("Alice", "15/01/2024", "1200")]));
//! ```

use chrono::NaiveDate;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::core::engine::Article;
use crate::core::import::{COL_PUBLISH_DATE, COL_URL, COL_WORD_COUNT, COL_WRITER};

// =============================================================================
// Test Data Factories
// =============================================================================

/// Create a test `Article` published on 2024-01-15.
///
/// The URL is derived from the writer and word count, e.g.
/// `https://example.com/alice-1200`.
#[must_use]
pub fn make_test_article(writer: &str, word_count: u64) -> Article {
    make_test_article_on(writer, word_count, 2024, 1, 15)
}

/// Create a test `Article` with an explicit publish date.
///
/// # Panics
///
/// Panics if the date is not a valid calendar date.
#[must_use]
pub fn make_test_article_on(writer: &str, word_count: u64, year: i32, month: u32, day: u32) -> Article {
    Article {
        url: format!(
            "https://example.com/{}-{word_count}",
            writer.to_lowercase()
        ),
        writer: writer.to_string(),
        publish_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"),
        word_count,
    }
}

/// Build CSV text with the standard header from `(writer, date, words)` rows.
#[must_use]
pub fn make_test_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut csv = format!("{COL_URL},{COL_WRITER},{COL_PUBLISH_DATE},{COL_WORD_COUNT}\n");
    for (index, (writer, date, words)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "https://example.com/{index},{writer},{date},{words}\n"
        ));
    }
    csv
}

/// A small two-writer data set.
///
/// Alice writes steadily around 1000 words, Bob swings between 300 and 2500.
#[must_use]
pub fn sample_csv() -> String {
    make_test_csv(&[
        ("Alice", "03/01/2024", "1000"),
        ("Bob", "05/01/2024", "300"),
        ("Alice", "12/01/2024", "1100"),
        ("Bob", "20/02/2024", "2500"),
        ("Alice", "02/02/2024", "900"),
    ])
}

// =============================================================================
// Temporary Directories
// =============================================================================

/// An isolated temporary directory removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Parse a string as JSON, panicking with the input on failure.
///
/// Evaluates to the parsed `serde_json::Value`.
#[macro_export]
macro_rules! assert_json_valid {
    ($json:expr) => {{
        let json: &str = $json;
        match serde_json::from_str::<serde_json::Value>(json) {
            Ok(value) => value,
            Err(e) => panic!("Expected valid JSON, but parsing failed: {e}\n\nJSON string:\n{json}"),
        }
    }};
}

/// Assert that two floats are equal within epsilon.
///
/// ```rust,ignore
/// assert_float_eq!(130.0, 1000.0 * 0.13, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_float_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_float_eq!($left, $right, f64::EPSILON * 100.0)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        let left: f64 = $left;
        let right: f64 = $right;
        let epsilon: f64 = $epsilon;
        assert!(
            (left - right).abs() < epsilon,
            "Float equality assertion failed: {} != {} (epsilon: {})",
            left,
            right,
            epsilon
        );
    };
}
