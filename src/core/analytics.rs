//! Writer-level statistics, cost comparisons, and parameter suggestions.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::engine::{Article, PricedArticle};
use crate::core::pricing::{CostModel, ModelKind};
use crate::core::stats;

/// CV below which a writer counts as consistent.
pub const CONSISTENT_CV: f64 = 0.25;
/// CV above which a writer counts as variable.
pub const VARIABLE_CV: f64 = 0.45;

/// Reference per-word rate used by the suggested configurations.
const REFERENCE_RATE: f64 = 0.13;
/// Reduced per-word rate used by hybrid and DMR suggestions.
const REDUCED_RATE: f64 = 0.08;

/// Summary of one writer's word counts.
///
/// `mean`, `median`, `p25` and `p75` are rounded to whole words.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub cv: f64,
    pub p25: f64,
    pub p75: f64,
    pub std_dev: f64,
}

impl WriterStatistics {
    /// Compute statistics over word counts. Returns None when empty.
    #[must_use]
    pub fn from_word_counts(word_counts: &[u64]) -> Option<Self> {
        let values: Vec<f64> = word_counts.iter().map(|w| *w as f64).collect();
        let sorted = stats::sorted(&values);
        let mean = stats::mean(&sorted)?;
        let std_dev = if sorted.len() > 1 {
            stats::std_dev(&sorted, mean)
        } else {
            0.0
        };

        Some(Self {
            count: sorted.len(),
            mean: mean.round(),
            median: stats::median(&sorted)?.round(),
            cv: stats::cv(std_dev, mean),
            p25: stats::percentile(&sorted, 0.25)?.round(),
            p75: stats::percentile(&sorted, 0.75)?.round(),
            std_dev,
        })
    }
}

/// Group articles by writer and summarize each writer's word counts.
///
/// Writers appear in the order of their first article.
#[must_use]
pub fn statistics_by_writer(articles: &[Article]) -> IndexMap<String, WriterStatistics> {
    let mut grouped: IndexMap<&str, Vec<u64>> = IndexMap::new();
    for article in articles {
        grouped
            .entry(article.writer.as_str())
            .or_default()
            .push(article.word_count);
    }

    grouped
        .into_iter()
        .filter_map(|(writer, counts)| {
            WriterStatistics::from_word_counts(&counts).map(|s| (writer.to_string(), s))
        })
        .collect()
}

/// How erratic a writer's article length is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterProfile {
    Consistent,
    Variable,
    Average,
}

impl WriterProfile {
    /// Display order for grouped recommendations.
    pub const ALL: &'static [Self] = &[Self::Consistent, Self::Variable, Self::Average];

    /// Model suggested for writers of this profile.
    #[must_use]
    pub const fn suggested_model(self) -> ModelKind {
        match self {
            Self::Consistent => ModelKind::CapPlusOverage,
            Self::Variable => ModelKind::PerWord,
            Self::Average => ModelKind::Hybrid,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Consistent => "Consistent",
            Self::Variable => "Variable",
            Self::Average => "Average",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Consistent => "Stable output; a capped price fits.",
            Self::Variable => "Variable output; volume-based pricing fits.",
            Self::Average => "Moderate variability; a hybrid model may fit.",
        }
    }
}

/// Classify a writer by coefficient of variation.
#[must_use]
pub fn classify_writer(stats: &WriterStatistics) -> WriterProfile {
    if stats.cv < CONSISTENT_CV {
        WriterProfile::Consistent
    } else if stats.cv > VARIABLE_CV {
        WriterProfile::Variable
    } else {
        WriterProfile::Average
    }
}

/// Starting parameters for `kind` derived from a writer's statistics.
#[must_use]
pub fn smart_defaults(kind: ModelKind, stats: &WriterStatistics) -> CostModel {
    match kind {
        ModelKind::PerWord => CostModel::PerWord {
            rate: REFERENCE_RATE,
        },
        ModelKind::CapPlusOverage => CostModel::CapPlusOverage {
            fixed_amount: (stats.p75 * 0.11).round(),
            cap: stats.p75,
            overage_rate: REFERENCE_RATE,
        },
        ModelKind::FixedPrice => CostModel::FixedPrice {
            fixed_amount: (stats.mean * 0.12).round(),
        },
        ModelKind::Hybrid => CostModel::Hybrid {
            base_fee: (stats.mean * 0.05).round(),
            reduced_rate: REDUCED_RATE,
        },
        ModelKind::DecreasingMarginalRate => CostModel::DecreasingMarginalRate {
            standard_rate: REFERENCE_RATE,
            threshold: stats.median,
            lower_rate: REDUCED_RATE,
        },
    }
}

/// A writer's suggested model, grouped by profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterRecommendation {
    pub writer: String,
    pub profile: WriterProfile,
    pub suggested_model: ModelKind,
    pub suggested: CostModel,
    pub stats: WriterStatistics,
}

/// Recommendations for every writer, grouped consistent, variable, average.
#[must_use]
pub fn recommendations(
    stats: &IndexMap<String, WriterStatistics>,
) -> Vec<WriterRecommendation> {
    let mut out = Vec::with_capacity(stats.len());
    for profile in WriterProfile::ALL {
        for (writer, writer_stats) in stats {
            if classify_writer(writer_stats) != *profile {
                continue;
            }
            let model = profile.suggested_model();
            out.push(WriterRecommendation {
                writer: writer.clone(),
                profile: *profile,
                suggested_model: model,
                suggested: smart_defaults(model, writer_stats),
                stats: *writer_stats,
            });
        }
    }
    out
}

/// Baseline vs simulation totals for one writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub writer: String,
    pub article_count: usize,
    pub total_words: u64,
    pub total_baseline_cost: f64,
    pub total_simulation_cost: f64,
    pub effective_rate_baseline: f64,
    pub effective_rate_simulation: f64,
    pub percent_difference: f64,
}

/// Sum one writer's costs and words.
///
/// Effective rates are 0 with no words; the percent difference is 0 when the
/// baseline total is 0.
#[must_use]
pub fn aggregate_comparison(priced: &[PricedArticle], writer: &str) -> CostComparison {
    let mut article_count = 0;
    let mut total_words = 0_u64;
    let mut total_baseline_cost = 0.0;
    let mut total_simulation_cost = 0.0;

    for p in priced.iter().filter(|p| p.article.writer == writer) {
        article_count += 1;
        total_words += p.article.word_count;
        total_baseline_cost += p.baseline_cost;
        total_simulation_cost += p.simulation_cost;
    }

    CostComparison {
        writer: writer.to_string(),
        article_count,
        total_words,
        total_baseline_cost,
        total_simulation_cost,
        effective_rate_baseline: ratio(total_baseline_cost, total_words as f64),
        effective_rate_simulation: ratio(total_simulation_cost, total_words as f64),
        percent_difference: percent_change(total_baseline_cost, total_simulation_cost),
    }
}

/// Comparisons for every writer, in first-appearance order.
#[must_use]
pub fn comparisons(priced: &[PricedArticle]) -> Vec<CostComparison> {
    writer_order(priced)
        .into_iter()
        .map(|writer| aggregate_comparison(priced, writer))
        .collect()
}

/// The `n` writers with the highest combined baseline and simulation cost.
#[must_use]
pub fn top_writers_by_cost(priced: &[PricedArticle], n: usize) -> Vec<CostComparison> {
    let mut all = comparisons(priced);
    all.sort_by(|a, b| {
        let total_a = a.total_baseline_cost + a.total_simulation_cost;
        let total_b = b.total_baseline_cost + b.total_simulation_cost;
        total_b.total_cmp(&total_a)
    });
    all.truncate(n);
    all
}

/// Dashboard totals over the whole article set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_articles: usize,
    pub writer_count: usize,
    pub mean_word_count: f64,
    pub median_word_count: f64,
    pub global_cv: f64,
    pub total_baseline_cost: f64,
    pub total_simulation_cost: f64,
    pub avg_baseline_cost: f64,
    pub avg_simulation_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

/// Summarize a priced article set. Empty input yields an all-zero summary.
#[must_use]
pub fn summarize(priced: &[PricedArticle]) -> SessionSummary {
    let words: Vec<f64> = priced.iter().map(|p| p.article.word_count as f64).collect();
    let sorted = stats::sorted(&words);
    let Some(mean) = stats::mean(&sorted) else {
        return SessionSummary::default();
    };
    let median = stats::median(&sorted).unwrap_or_default();
    let std_dev = stats::std_dev(&sorted, mean);

    let total_baseline_cost: f64 = priced.iter().map(|p| p.baseline_cost).sum();
    let total_simulation_cost: f64 = priced.iter().map(|p| p.simulation_cost).sum();
    let count = priced.len() as f64;
    let savings = total_simulation_cost - total_baseline_cost;

    SessionSummary {
        total_articles: priced.len(),
        writer_count: writer_order(priced).len(),
        mean_word_count: mean.round(),
        median_word_count: median.round(),
        global_cv: stats::cv(std_dev, mean),
        total_baseline_cost,
        total_simulation_cost,
        avg_baseline_cost: ratio(total_baseline_cost, count),
        avg_simulation_cost: ratio(total_simulation_cost, count),
        savings,
        savings_percent: percent_change(total_baseline_cost, total_simulation_cost),
    }
}

/// Average word count for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: String,
    pub articles: usize,
    pub average_word_count: f64,
}

/// Monthly average word counts, oldest month first.
#[must_use]
pub fn monthly_trend(articles: &[Article]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<String, (usize, u64)> = BTreeMap::new();
    for article in articles {
        let key = article.publish_date.format("%Y-%m").to_string();
        let entry = months.entry(key).or_default();
        entry.0 += 1;
        entry.1 += article.word_count;
    }

    months
        .into_iter()
        .map(|(month, (count, words))| MonthlyPoint {
            month,
            articles: count,
            average_word_count: (words as f64 / count as f64).round(),
        })
        .collect()
}

/// Articles whose url, writer, date, or word count contain `term`.
///
/// Matching is case-insensitive; an empty term keeps everything.
#[must_use]
pub fn filter_articles<'a>(priced: &'a [PricedArticle], term: &str) -> Vec<&'a PricedArticle> {
    let term = term.trim().to_lowercase();
    priced
        .iter()
        .filter(|p| {
            if term.is_empty() {
                return true;
            }
            let a = &p.article;
            let haystack = format!(
                "{} {} {} {}",
                a.url,
                a.writer,
                a.publish_date.format("%d/%m/%Y"),
                a.word_count
            )
            .to_lowercase();
            haystack.contains(&term)
        })
        .collect()
}

fn writer_order(priced: &[PricedArticle]) -> Vec<&str> {
    let mut seen: IndexMap<&str, ()> = IndexMap::new();
    for p in priced {
        seen.entry(p.article.writer.as_str()).or_default();
    }
    seen.into_keys().collect()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn percent_change(baseline: f64, simulation: f64) -> f64 {
    if baseline == 0.0 {
        0.0
    } else {
        (simulation - baseline) / baseline * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_float_eq;
    use crate::core::engine::price_all;
    use crate::core::pricing::PricingConfig;
    use crate::core::resolver::{GlobalDefaults, WriterOverrides};
    use crate::test_utils::{make_test_article, make_test_article_on};

    fn stats_for(counts: &[u64]) -> WriterStatistics {
        WriterStatistics::from_word_counts(counts).unwrap()
    }

    #[test]
    fn writer_statistics_example() {
        let s = stats_for(&[400, 100, 300, 200]);
        assert_eq!(s.count, 4);
        assert_float_eq!(s.mean, 250.0);
        assert_float_eq!(s.median, 250.0);
        assert_float_eq!(s.p25, 175.0);
        assert_float_eq!(s.p75, 325.0);
        assert_float_eq!(s.std_dev, 111.803_398_874_989_5, 1e-9);
        assert_float_eq!(s.cv, 0.447_213_595_499_958, 1e-9);
    }

    #[test]
    fn single_article_has_zero_spread() {
        let s = stats_for(&[800]);
        assert_float_eq!(s.std_dev, 0.0);
        assert_float_eq!(s.cv, 0.0);
        assert_float_eq!(s.p25, 800.0);
    }

    #[test]
    fn empty_word_counts_have_no_statistics() {
        assert!(WriterStatistics::from_word_counts(&[]).is_none());
    }

    #[test]
    fn statistics_grouped_in_first_appearance_order() {
        let articles = vec![
            make_test_article("Zoe", 1000),
            make_test_article("Adam", 500),
            make_test_article("Zoe", 1200),
        ];
        let by_writer = statistics_by_writer(&articles);
        let names: Vec<_> = by_writer.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zoe", "Adam"]);
        assert_eq!(by_writer["Zoe"].count, 2);
        assert_float_eq!(by_writer["Zoe"].mean, 1100.0);
    }

    #[test]
    fn classification_thresholds() {
        let mut s = stats_for(&[1000]);
        s.cv = 0.1;
        assert_eq!(classify_writer(&s), WriterProfile::Consistent);
        s.cv = 0.25;
        assert_eq!(classify_writer(&s), WriterProfile::Average);
        s.cv = 0.45;
        assert_eq!(classify_writer(&s), WriterProfile::Average);
        s.cv = 0.46;
        assert_eq!(classify_writer(&s), WriterProfile::Variable);
    }

    #[test]
    fn profiles_suggest_models() {
        assert_eq!(
            WriterProfile::Consistent.suggested_model(),
            ModelKind::CapPlusOverage
        );
        assert_eq!(WriterProfile::Variable.suggested_model(), ModelKind::PerWord);
        assert_eq!(WriterProfile::Average.suggested_model(), ModelKind::Hybrid);
    }

    #[test]
    fn smart_defaults_use_product_constants() {
        let s = WriterStatistics {
            count: 10,
            mean: 1234.0,
            median: 1100.0,
            cv: 0.3,
            p25: 900.0,
            p75: 1500.0,
            std_dev: 370.0,
        };
        assert_eq!(
            smart_defaults(ModelKind::PerWord, &s),
            CostModel::PerWord { rate: 0.13 }
        );
        assert_eq!(
            smart_defaults(ModelKind::CapPlusOverage, &s),
            CostModel::CapPlusOverage {
                fixed_amount: 165.0,
                cap: 1500.0,
                overage_rate: 0.13,
            }
        );
        assert_eq!(
            smart_defaults(ModelKind::FixedPrice, &s),
            CostModel::FixedPrice {
                fixed_amount: 148.0,
            }
        );
        assert_eq!(
            smart_defaults(ModelKind::Hybrid, &s),
            CostModel::Hybrid {
                base_fee: 62.0,
                reduced_rate: 0.08,
            }
        );
        assert_eq!(
            smart_defaults(ModelKind::DecreasingMarginalRate, &s),
            CostModel::DecreasingMarginalRate {
                standard_rate: 0.13,
                threshold: 1100.0,
                lower_rate: 0.08,
            }
        );
    }

    #[test]
    fn recommendations_grouped_by_profile() {
        let articles = vec![
            make_test_article("Variable", 100),
            make_test_article("Variable", 2000),
            make_test_article("Steady", 1000),
            make_test_article("Steady", 1010),
        ];
        let recs = recommendations(&statistics_by_writer(&articles));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].writer, "Steady");
        assert_eq!(recs[0].suggested_model, ModelKind::CapPlusOverage);
        assert_eq!(recs[1].writer, "Variable");
        assert_eq!(recs[1].profile, WriterProfile::Variable);
    }

    fn priced_fixture() -> Vec<PricedArticle> {
        let defaults = GlobalDefaults::new(
            PricingConfig::new(CostModel::PerWord { rate: 0.10 }),
            PricingConfig::new(CostModel::FixedPrice {
                fixed_amount: 150.0,
            }),
        );
        let articles = vec![
            make_test_article("A", 1000),
            make_test_article("B", 3000),
            make_test_article("A", 2000),
        ];
        price_all(&articles, &defaults, &WriterOverrides::new())
    }

    #[test]
    fn aggregate_comparison_sums_writer_articles() {
        let c = aggregate_comparison(&priced_fixture(), "A");
        assert_eq!(c.article_count, 2);
        assert_eq!(c.total_words, 3000);
        assert_float_eq!(c.total_baseline_cost, 300.0, 1e-9);
        assert_float_eq!(c.total_simulation_cost, 300.0, 1e-9);
        assert_float_eq!(c.effective_rate_baseline, 0.1, 1e-12);
        assert_float_eq!(c.percent_difference, 0.0, 1e-9);

        let b = aggregate_comparison(&priced_fixture(), "B");
        assert_float_eq!(b.percent_difference, -50.0, 1e-9);
    }

    #[test]
    fn aggregate_comparison_guards_division_by_zero() {
        let defaults = GlobalDefaults::new(
            PricingConfig::new(CostModel::PerWord { rate: 0.1 }),
            PricingConfig::new(CostModel::FixedPrice { fixed_amount: 50.0 }),
        );
        let priced = price_all(
            &[make_test_article("Empty", 0)],
            &defaults,
            &WriterOverrides::new(),
        );
        let c = aggregate_comparison(&priced, "Empty");
        assert_float_eq!(c.effective_rate_baseline, 0.0);
        assert_float_eq!(c.effective_rate_simulation, 0.0);
        assert_float_eq!(c.percent_difference, 0.0);
        assert!(c.percent_difference.is_finite());

        let missing = aggregate_comparison(&priced, "Nobody");
        assert_eq!(missing.article_count, 0);
        assert_float_eq!(missing.percent_difference, 0.0);
    }

    #[test]
    fn top_writers_sorted_by_total_cost() {
        let top = top_writers_by_cost(&priced_fixture(), 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].writer, "A");
    }

    #[test]
    fn summary_totals_and_savings() {
        let summary = summarize(&priced_fixture());
        assert_eq!(summary.total_articles, 3);
        assert_eq!(summary.writer_count, 2);
        assert_float_eq!(summary.mean_word_count, 2000.0);
        assert_float_eq!(summary.median_word_count, 2000.0);
        assert_float_eq!(summary.total_baseline_cost, 600.0, 1e-9);
        assert_float_eq!(summary.total_simulation_cost, 450.0, 1e-9);
        assert_float_eq!(summary.avg_baseline_cost, 200.0, 1e-9);
        assert_float_eq!(summary.savings, -150.0, 1e-9);
        assert_float_eq!(summary.savings_percent, -25.0, 1e-9);
    }

    #[test]
    fn empty_summary_is_zero() {
        assert_eq!(summarize(&[]), SessionSummary::default());
    }

    #[test]
    fn monthly_trend_orders_months() {
        let articles = vec![
            make_test_article_on("A", 1000, 2024, 3, 10),
            make_test_article_on("A", 2000, 2024, 1, 5),
            make_test_article_on("B", 3001, 2024, 1, 20),
        ];
        let trend = monthly_trend(&articles);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, "2024-01");
        assert_eq!(trend[0].articles, 2);
        assert_float_eq!(trend[0].average_word_count, 2501.0);
        assert_eq!(trend[1].month, "2024-03");
    }

    #[test]
    fn filter_matches_writer_case_insensitively() {
        let priced = priced_fixture();
        assert_eq!(filter_articles(&priced, "b").len(), 1);
        assert_eq!(filter_articles(&priced, "").len(), 3);
        assert_eq!(filter_articles(&priced, "3000").len(), 1);
        assert!(filter_articles(&priced, "nomatch").is_empty());
    }
}
