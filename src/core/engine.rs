//! Baseline and simulation pricing for a whole article set.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::pricing::compute_cost;
use crate::core::resolver::{GlobalDefaults, Scenario, WriterOverrides, resolve};

/// One imported article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub writer: String,
    pub publish_date: NaiveDate,
    pub word_count: u64,
}

/// An article with both scenario costs attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub baseline_cost: f64,
    pub simulation_cost: f64,
}

impl PricedArticle {
    /// Simulation minus baseline.
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.simulation_cost - self.baseline_cost
    }
}

/// Price every article under both scenarios.
///
/// Each article resolves its own baseline and simulation configuration.
/// Output order matches input order.
#[must_use]
pub fn price_all(
    articles: &[Article],
    defaults: &GlobalDefaults,
    overrides: &WriterOverrides,
) -> Vec<PricedArticle> {
    articles
        .iter()
        .map(|article| {
            let baseline = resolve(&article.writer, Scenario::Baseline, defaults, overrides);
            let simulation = resolve(&article.writer, Scenario::Simulation, defaults, overrides);
            PricedArticle {
                article: article.clone(),
                baseline_cost: compute_cost(article.word_count, baseline),
                simulation_cost: compute_cost(article.word_count, simulation),
            }
        })
        .collect()
}
