//! In-memory simulation session.
//!
//! A session owns the imported articles and the active configuration. Every
//! cost and statistic is derived on demand from these.

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;

use crate::core::analytics::{self, CostComparison, SessionSummary, WriterStatistics};
use crate::core::engine::{Article, PricedArticle, price_all};
use crate::core::import::{self, ImportReport};
use crate::core::resolver::{GlobalDefaults, WriterOverrides};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct Session {
    articles: Vec<Article>,
    writers: Vec<String>,
    defaults: GlobalDefaults,
    overrides: WriterOverrides,
}

impl Session {
    #[must_use]
    pub fn new(defaults: GlobalDefaults, overrides: WriterOverrides) -> Self {
        Self {
            articles: Vec::new(),
            writers: Vec::new(),
            defaults,
            overrides,
        }
    }

    /// Replace the article set from CSV data.
    ///
    /// The previous articles are kept if the import fails.
    ///
    /// # Errors
    ///
    /// Propagates [`import::import_articles`] errors.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let report = import::import_articles(reader)?;
        Ok(self.replace_articles(report))
    }

    /// Replace the article set from a CSV file.
    ///
    /// # Errors
    ///
    /// Propagates [`import::import_articles_from_path`] errors.
    pub fn import_path(&mut self, path: &Path) -> Result<usize> {
        let report = import::import_articles_from_path(path)?;
        Ok(self.replace_articles(report))
    }

    /// Returns the number of skipped rows.
    fn replace_articles(&mut self, report: ImportReport) -> usize {
        let mut writers: IndexMap<String, ()> = IndexMap::new();
        for article in &report.articles {
            writers.entry(article.writer.clone()).or_default();
        }
        self.writers = writers.into_keys().collect();
        self.articles = report.articles;
        report.skipped
    }

    /// Replace the active configuration.
    pub fn apply_configuration(&mut self, defaults: GlobalDefaults, overrides: WriterOverrides) {
        tracing::debug!(overrides = overrides.len(), "Applying configuration");
        self.defaults = defaults;
        self.overrides = overrides;
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Writers in order of first appearance.
    #[must_use]
    pub fn writers(&self) -> &[String] {
        &self.writers
    }

    #[must_use]
    pub const fn defaults(&self) -> &GlobalDefaults {
        &self.defaults
    }

    #[must_use]
    pub const fn overrides(&self) -> &WriterOverrides {
        &self.overrides
    }

    #[must_use]
    pub fn priced(&self) -> Vec<PricedArticle> {
        price_all(&self.articles, &self.defaults, &self.overrides)
    }

    #[must_use]
    pub fn statistics(&self) -> IndexMap<String, WriterStatistics> {
        analytics::statistics_by_writer(&self.articles)
    }

    #[must_use]
    pub fn comparison(&self, writer: &str) -> CostComparison {
        analytics::aggregate_comparison(&self.priced(), writer)
    }

    #[must_use]
    pub fn comparisons(&self) -> Vec<CostComparison> {
        analytics::comparisons(&self.priced())
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        analytics::summarize(&self.priced())
    }
}
