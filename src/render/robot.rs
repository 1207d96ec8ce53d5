//! Robot-mode output (JSON and Markdown).
//!
//! JSON is wrapped in the [`RobotOutput`] envelope; Markdown is a compact
//! heading-plus-table layout meant for pasting into reports.

use std::fmt::Write as _;

use serde::Serialize;

use crate::core::analytics::CostComparison;
use crate::core::models::{ModelInfo, QuotePayload, RobotOutput, SimulatePayload, WritersPayload};
use crate::error::Result;
use crate::util::format::{
    format_cost, format_param, format_rate, format_signed_cost, format_signed_percent,
    format_words,
};

/// Render any serializable value as JSON.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_json<T: Serialize>(output: &T, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(output)?)
    } else {
        Ok(serde_json::to_string(output)?)
    }
}

/// Wrap `data` in a [`RobotOutput`] envelope and render it as JSON.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_envelope<T: Serialize + ?Sized>(
    command: &str,
    data: &T,
    pretty: bool,
) -> Result<String> {
    render_envelope_with_warnings(command, data, Vec::new(), pretty)
}

/// Like [`render_envelope`], listing non-fatal problems under `errors`.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_envelope_with_warnings<T: Serialize + ?Sized>(
    command: &str,
    data: &T,
    warnings: Vec<String>,
    pretty: bool,
) -> Result<String> {
    render_json(&RobotOutput::with_errors(command, data, warnings), pretty)
}

/// Warning for rows dropped during import, if any.
#[must_use]
pub fn skipped_rows_warnings(skipped: usize) -> Vec<String> {
    if skipped == 0 {
        Vec::new()
    } else {
        vec![format!("{skipped} malformed row(s) skipped")]
    }
}

fn md_table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) {
    let _ = writeln!(out, "| {} |", headers.join(" | "));
    let align: Vec<&str> = (0..headers.len())
        .map(|i| if i == 0 { "---" } else { "---:" })
        .collect();
    let _ = writeln!(out, "|{}|", align.join("|"));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
        let _ = writeln!(out, "| {} |", cells.join(" | "));
    }
}

fn comparison_rows(rows: &[CostComparison], currency: &str) -> Vec<Vec<String>> {
    rows.iter()
        .map(|c| {
            vec![
                c.writer.clone(),
                c.article_count.to_string(),
                c.total_words.to_string(),
                format_cost(c.total_baseline_cost, currency),
                format_cost(c.total_simulation_cost, currency),
                format_rate(c.effective_rate_baseline),
                format_rate(c.effective_rate_simulation),
                format_signed_percent(c.percent_difference),
            ]
        })
        .collect()
}

const COMPARISON_HEADERS: [&str; 8] = [
    "Writer",
    "Articles",
    "Words",
    "Baseline",
    "Simulation",
    "Rate B",
    "Rate S",
    "Diff",
];

/// Render a simulation as Markdown.
#[must_use]
pub fn render_simulate_md(payload: &SimulatePayload, currency: &str) -> String {
    let s = &payload.summary;
    let mut out = String::new();

    let _ = writeln!(out, "# Simulation: {}\n", payload.source);
    let _ = writeln!(out, "- articles: {}", s.total_articles);
    let _ = writeln!(out, "- writers: {}", s.writer_count);
    let _ = writeln!(out, "- skipped_rows: {}", payload.skipped_rows);
    let _ = writeln!(out, "- mean_words: {}", format_words(s.mean_word_count));
    let _ = writeln!(out, "- median_words: {}", format_words(s.median_word_count));
    let _ = writeln!(out, "- global_cv: {:.2}", s.global_cv);
    let _ = writeln!(
        out,
        "- baseline_total: {}",
        format_cost(s.total_baseline_cost, currency)
    );
    let _ = writeln!(
        out,
        "- simulation_total: {}",
        format_cost(s.total_simulation_cost, currency)
    );
    let _ = writeln!(
        out,
        "- difference: {} ({})",
        format_signed_cost(s.savings, currency),
        format_signed_percent(s.savings_percent)
    );

    out.push_str("\n## Configuration\n\n");
    let config = &payload.configuration;
    let _ = writeln!(out, "- baseline: {}", config.baseline.describe());
    let _ = writeln!(out, "- simulation: {}", config.simulation.describe());
    for entry in &config.overrides {
        if let Some(baseline) = &entry.scenarios.baseline {
            let _ = writeln!(out, "- {} baseline: {}", entry.writer, baseline.describe());
        }
        if let Some(simulation) = &entry.scenarios.simulation {
            let _ = writeln!(
                out,
                "- {} simulation: {}",
                entry.writer,
                simulation.describe()
            );
        }
    }

    out.push_str("\n## Writers\n\n");
    md_table(
        &mut out,
        &COMPARISON_HEADERS,
        &comparison_rows(&payload.writers, currency),
    );

    if let Some(top) = &payload.top_writers {
        let _ = writeln!(out, "\n## Top {} writers by cost\n", top.len());
        md_table(&mut out, &COMPARISON_HEADERS, &comparison_rows(top, currency));
    }

    if let Some(trend) = &payload.trend {
        out.push_str("\n## Monthly trend\n\n");
        let rows: Vec<Vec<String>> = trend
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    p.articles.to_string(),
                    format!("{:.0}", p.average_word_count),
                ]
            })
            .collect();
        md_table(&mut out, &["Month", "Articles", "Avg words"], &rows);
    }

    if let Some(articles) = &payload.articles {
        out.push_str("\n## Articles\n\n");
        let rows: Vec<Vec<String>> = articles
            .iter()
            .map(|p| {
                vec![
                    p.article.url.clone(),
                    p.article.writer.clone(),
                    p.article.publish_date.format("%d/%m/%Y").to_string(),
                    p.article.word_count.to_string(),
                    format_cost(p.baseline_cost, currency),
                    format_cost(p.simulation_cost, currency),
                ]
            })
            .collect();
        md_table(
            &mut out,
            &["URL", "Writer", "Date", "Words", "Baseline", "Simulation"],
            &rows,
        );
    }

    out
}

/// Render writer statistics as Markdown.
#[must_use]
pub fn render_writers_md(payload: &WritersPayload) -> String {
    let mut out = format!("# Writers: {}\n\n", payload.source);
    let rows: Vec<Vec<String>> = payload
        .writers
        .iter()
        .map(|w| {
            vec![
                w.writer.clone(),
                w.stats.count.to_string(),
                format!("{:.0}", w.stats.mean),
                format!("{:.0}", w.stats.median),
                format!("{:.2}", w.stats.cv),
                format!("{:.0}", w.stats.p25),
                format!("{:.0}", w.stats.p75),
                w.recommendation.profile.label().to_string(),
                w.recommendation.suggested.describe(),
            ]
        })
        .collect();
    md_table(
        &mut out,
        &[
            "Writer",
            "Articles",
            "Mean",
            "Median",
            "CV",
            "P25",
            "P75",
            "Profile",
            "Suggested",
        ],
        &rows,
    );
    out
}

/// Render a quote as Markdown.
#[must_use]
pub fn render_quote_md(payload: &QuotePayload, currency: &str) -> String {
    let mut out = String::from("## Quote\n");
    let _ = writeln!(out, "- model: {}", payload.config.describe());
    let _ = writeln!(out, "- words: {}", payload.word_count);
    let _ = writeln!(out, "- base_cost: {}", format_cost(payload.base_cost, currency));
    let _ = writeln!(out, "- cost: {}", format_cost(payload.cost, currency));
    let _ = writeln!(out, "- per_word: {}", format_rate(payload.effective_rate));
    out
}

/// Render the model catalogue as Markdown.
#[must_use]
pub fn render_models_md(models: &[ModelInfo]) -> String {
    let mut out = String::from("# Cost models\n\n");
    for model in models {
        let _ = writeln!(out, "## {} ({})", model.name, model.code);
        for param in &model.params {
            let _ = writeln!(out, "- {}: {}", param.name, format_param(param.default));
        }
        out.push('\n');
    }
    out
}
