//! Human-readable output using rich_rust.
//!
//! Summaries are drawn as panels; per-writer and per-article data as
//! aligned plain-text tables.

use crate::core::analytics::{CostComparison, MonthlyPoint, WriterProfile};
use crate::core::engine::PricedArticle;
use crate::core::models::{ModelInfo, QuotePayload, SimulatePayload, WritersPayload};
use crate::util::format::{
    format_cost, format_param, format_rate, format_signed_cost, format_signed_percent,
    format_words,
};
use super::{colored, segments_to_string};
use rich_rust::prelude::*;
use rich_rust::{ColorSystem, Segment, Style};

const PANEL_WIDTH: usize = 72;

/// Green for savings, red for extra spend.
fn delta_style(delta: f64) -> Style {
    if delta < 0.0 {
        colored("green")
    } else if delta > 0.0 {
        colored("red")
    } else {
        Style::new()
    }
}

fn title(text: &str, color: &str, no_color: bool) -> Text {
    if no_color {
        Text::new(text)
    } else {
        Text::styled(text, colored(color).bold())
    }
}

fn labelled<'a>(label: &str, value: String) -> Vec<Segment<'a>> {
    vec![
        Segment::styled(format!("{label}: "), Style::new().bold()),
        Segment::plain(value),
    ]
}

fn panel(lines: Vec<Vec<Segment<'_>>>, heading: &str, color: &str, no_color: bool) -> String {
    let mut panel = Panel::new(lines)
        .title(title(heading, color, no_color))
        .padding((0, 1));
    if !no_color {
        panel = panel.border_style(colored(color));
    }
    segments_to_string(&panel.render(PANEL_WIDTH), no_color)
}

/// Render rows as left-aligned first column and right-aligned numbers.
fn table(headers: &[&str], rows: &[Vec<String>], no_color: bool) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                if i == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    let header = line(&header_cells);
    let mut out = if no_color {
        header
    } else {
        Style::new()
            .bold()
            .render(&header, ColorSystem::TrueColor)
    };
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn section(heading: &str, no_color: bool) -> String {
    if no_color {
        format!("\n{heading}\n")
    } else {
        format!(
            "\n{}\n",
            colored("cyan").bold().render(heading, ColorSystem::TrueColor)
        )
    }
}

// =============================================================================
// simulate
// =============================================================================

/// Render a simulation for human consumption.
#[must_use]
pub fn render_simulate(payload: &SimulatePayload, currency: &str, no_color: bool) -> String {
    let s = &payload.summary;
    let delta = delta_style(s.savings);
    let delta = if no_color { Style::new() } else { delta };

    let mut lines = vec![
        labelled(
            "Articles",
            format!("{} by {} writer(s)", s.total_articles, s.writer_count),
        ),
        labelled(
            "Word count",
            format!(
                "mean {} · median {} · CV {:.2}",
                format_words(s.mean_word_count),
                format_words(s.median_word_count),
                s.global_cv
            ),
        ),
        labelled(
            "Baseline",
            format!(
                "{} total · {} per article",
                format_cost(s.total_baseline_cost, currency),
                format_cost(s.avg_baseline_cost, currency)
            ),
        ),
        labelled(
            "Simulation",
            format!(
                "{} total · {} per article",
                format_cost(s.total_simulation_cost, currency),
                format_cost(s.avg_simulation_cost, currency)
            ),
        ),
    ];
    lines.push(vec![
        Segment::styled("Difference: ", Style::new().bold()),
        Segment::styled(
            format!(
                "{} ({})",
                format_signed_cost(s.savings, currency),
                format_signed_percent(s.savings_percent)
            ),
            delta,
        ),
    ]);
    if payload.skipped_rows > 0 {
        lines.push(vec![Segment::styled(
            format!("{} malformed row(s) skipped", payload.skipped_rows),
            if no_color { Style::new() } else { colored("yellow") },
        )]);
    }

    let config = &payload.configuration;
    let mut config_lines = vec![
        labelled("Baseline", config.baseline.describe()),
        labelled("Simulation", config.simulation.describe()),
    ];
    for entry in &config.overrides {
        let mut parts = Vec::new();
        if let Some(baseline) = &entry.scenarios.baseline {
            parts.push(format!("baseline {}", baseline.describe()));
        }
        if let Some(simulation) = &entry.scenarios.simulation {
            parts.push(format!("simulation {}", simulation.describe()));
        }
        config_lines.push(labelled(&entry.writer, parts.join(" · ")));
    }

    let mut out = panel(lines, &payload.source, "cyan", no_color);
    out.push('\n');
    out.push_str(&panel(config_lines, "Configuration", "blue", no_color));

    out.push_str(&section("Writers", no_color));
    out.push_str(&comparison_table(&payload.writers, currency, no_color));

    if let Some(top) = &payload.top_writers {
        out.push_str(&section(&format!("Top {} writers by cost", top.len()), no_color));
        out.push_str(&comparison_table(top, currency, no_color));
    }

    if let Some(trend) = &payload.trend {
        out.push_str(&section("Monthly trend", no_color));
        out.push_str(&trend_table(trend, no_color));
    }

    if let Some(articles) = &payload.articles {
        let heading = payload.filter.as_ref().map_or_else(
            || "Articles".to_string(),
            |term| format!("Articles matching \"{term}\""),
        );
        out.push_str(&section(&heading, no_color));
        out.push_str(&article_table(articles, currency, no_color));
    }

    out
}

fn comparison_table(rows: &[CostComparison], currency: &str, no_color: bool) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|c| {
            vec![
                c.writer.clone(),
                c.article_count.to_string(),
                format_words(c.total_words as f64),
                format_cost(c.total_baseline_cost, currency),
                format_cost(c.total_simulation_cost, currency),
                format_rate(c.effective_rate_baseline),
                format_rate(c.effective_rate_simulation),
                format_signed_percent(c.percent_difference),
            ]
        })
        .collect();
    table(
        &[
            "Writer",
            "Articles",
            "Words",
            "Baseline",
            "Simulation",
            "Rate B",
            "Rate S",
            "Diff",
        ],
        &rows,
        no_color,
    )
}

fn trend_table(points: &[MonthlyPoint], no_color: bool) -> String {
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.month.clone(),
                p.articles.to_string(),
                format_words(p.average_word_count),
            ]
        })
        .collect();
    table(&["Month", "Articles", "Avg words"], &rows, no_color)
}

fn article_table(articles: &[PricedArticle], currency: &str, no_color: bool) -> String {
    if articles.is_empty() {
        return "No matching articles.\n".to_string();
    }
    let rows: Vec<Vec<String>> = articles
        .iter()
        .map(|p| {
            vec![
                p.article.publish_date.format("%d/%m/%Y").to_string(),
                p.article.writer.clone(),
                format_words(p.article.word_count as f64),
                format_cost(p.baseline_cost, currency),
                format_cost(p.simulation_cost, currency),
                format_signed_cost(p.difference(), currency),
                p.article.url.clone(),
            ]
        })
        .collect();
    table(
        &["Date", "Writer", "Words", "Baseline", "Simulation", "Diff", "URL"],
        &rows,
        no_color,
    )
}

// =============================================================================
// writers
// =============================================================================

/// Render writer statistics and recommendations.
#[must_use]
pub fn render_writers(payload: &WritersPayload, no_color: bool) -> String {
    let mut out = String::new();

    for &profile in WriterProfile::ALL {
        let group: Vec<_> = payload
            .writers
            .iter()
            .filter(|w| w.recommendation.profile == profile)
            .collect();
        if group.is_empty() {
            continue;
        }

        out.push_str(&section(
            &format!(
                "{} writers: {} ({})",
                profile.label(),
                profile.description(),
                profile.suggested_model().code()
            ),
            no_color,
        ));
        let rows: Vec<Vec<String>> = group
            .iter()
            .map(|w| {
                vec![
                    w.writer.clone(),
                    w.stats.count.to_string(),
                    format_words(w.stats.mean),
                    format_words(w.stats.median),
                    format!("{:.2}", w.stats.cv),
                    format_words(w.stats.p25),
                    format_words(w.stats.p75),
                    w.recommendation.suggested.describe(),
                ]
            })
            .collect();
        out.push_str(&table(
            &[
                "Writer", "Articles", "Mean", "Median", "CV", "P25", "P75", "Suggested",
            ],
            &rows,
            no_color,
        ));
    }

    if payload.skipped_rows > 0 {
        out.push_str(&format!(
            "\n{} malformed row(s) skipped\n",
            payload.skipped_rows
        ));
    }
    out
}

// =============================================================================
// quote / models
// =============================================================================

/// Render a single-article quote.
#[must_use]
pub fn render_quote(payload: &QuotePayload, currency: &str, no_color: bool) -> String {
    let lines = vec![
        labelled("Model", payload.config.describe()),
        labelled("Words", format_words(payload.word_count as f64)),
        labelled("Base cost", format_cost(payload.base_cost, currency)),
        labelled("Cost", format_cost(payload.cost, currency)),
        labelled("Per word", format_rate(payload.effective_rate)),
    ];
    panel(lines, "Quote", "magenta", no_color)
}

/// Render the model catalogue.
#[must_use]
pub fn render_models(models: &[ModelInfo], no_color: bool) -> String {
    let rows: Vec<Vec<String>> = models
        .iter()
        .map(|m| {
            let params = m
                .params
                .iter()
                .map(|p| format!("{}={}", p.name, format_param(p.default)))
                .collect::<Vec<_>>()
                .join(" ");
            vec![m.code.to_string(), m.name.to_string(), params]
        })
        .collect();
    table(&["Code", "Model", "Default parameters"], &rows, no_color)
}
