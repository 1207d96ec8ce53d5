//! Error rendering for pricesim.
//!
//! Rich rendering with fix suggestions for terminals, simple text
//! otherwise, and structured JSON in robot modes.

use serde::Serialize;

use super::{colored, segments_to_string};
use crate::cli::args::OutputFormat;
use crate::error::{FixSuggestion, SimError};
use crate::util::env::{Stream, color_allowed};
use rich_rust::prelude::*;
use rich_rust::{Segment, Style};

const WRAP_WIDTH: usize = 60;

// =============================================================================
// Public API
// =============================================================================

/// Render an error for stderr.
///
/// JSON and Markdown formats get structured JSON. Human format uses the
/// rich panel when color is allowed and stderr is a terminal.
#[must_use]
pub fn render_error_full(
    error: &SimError,
    format: OutputFormat,
    no_color: bool,
    pretty: bool,
) -> String {
    match format {
        OutputFormat::Json => return render_error_json(error, pretty),
        OutputFormat::Md => return render_error_json(error, true),
        OutputFormat::Human => {}
    }

    if color_allowed(Stream::Stderr, no_color) {
        render_rich(error)
    } else {
        render_simple(error)
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &SimError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error))
}

// =============================================================================
// Rich Terminal Rendering
// =============================================================================

fn render_rich(error: &SimError) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines: Vec<Vec<Segment>> = vec![
        vec![
            Segment::styled(error.to_string(), colored("red").bold()),
            Segment::styled(format!(" [{}]", error.error_code()), Style::new().dim()),
        ],
        Vec::new(),
    ];

    if !suggestions.is_empty() {
        lines.extend(suggestion_lines(&suggestions));
    }

    if let Some(first) = suggestions.first() {
        if !first.context.is_empty() {
            lines.push(Vec::new());
            lines.push(vec![Segment::styled(
                "Why this happened:",
                colored("yellow").bold(),
            )]);
            lines.extend(
                wrap_text(&first.context, WRAP_WIDTH)
                    .into_iter()
                    .map(|l| vec![Segment::plain(format!("  {l}"))]),
            );
        }
        if let Some(prevention) = &first.prevention {
            lines.push(Vec::new());
            lines.push(vec![Segment::styled("Prevention:", colored("green").bold())]);
            lines.extend(
                wrap_text(prevention, WRAP_WIDTH)
                    .into_iter()
                    .map(|l| vec![Segment::plain(format!("  {l}"))]),
            );
        }
    }

    let panel = Panel::new(lines)
        .title(Text::new(error.category().to_string()))
        .border_style(colored("red"))
        .padding((1, 2));
    segments_to_string(&panel.render(70), false)
}

fn suggestion_lines(suggestions: &[FixSuggestion]) -> Vec<Vec<Segment<'static>>> {
    let mut lines = vec![vec![Segment::styled(
        "How to fix:",
        colored("cyan").bold(),
    )]];
    for (i, suggestion) in suggestions.iter().enumerate() {
        for (j, cmd) in suggestion.commands.iter().enumerate() {
            let prefix = if j == 0 {
                format!("  {}. ", i + 1)
            } else {
                "     Or: ".to_string()
            };
            lines.push(vec![
                Segment::plain(prefix),
                Segment::styled(cmd.clone(), colored("cyan")),
            ]);
        }
    }
    lines
}

// =============================================================================
// Simple Text Rendering
// =============================================================================

/// Render error as simple text (no ANSI codes).
fn render_simple(error: &SimError) -> String {
    let suggestions = error.fix_suggestions();
    let mut lines = vec![format!("Error [{}]: {}", error.error_code(), error)];

    // First runnable command; comment lines are hints, shown as-is.
    if let Some(suggestion) = suggestions.first() {
        match suggestion.commands.iter().find(|c| !c.starts_with('#')) {
            Some(cmd) => lines.push(format!("Fix: {cmd}")),
            None => {
                if let Some(hint) = suggestion.commands.first() {
                    lines.push(format!("Hint: {}", hint.trim_start_matches('#').trim()));
                }
            }
        }
    }

    lines.join("\n")
}

// =============================================================================
// JSON Rendering
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorJson {
    error_code: &'static str,
    category: String,
    message: String,
    exit_code: i32,
    suggestions: Vec<SuggestionJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionJson {
    commands: Vec<String>,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prevention: Option<String>,
}

impl ErrorJson {
    fn from_error(error: &SimError) -> Self {
        Self {
            error_code: error.error_code(),
            category: error.category().to_string(),
            message: error.to_string(),
            exit_code: error.exit_code().into(),
            suggestions: error
                .fix_suggestions()
                .into_iter()
                .map(|s| SuggestionJson {
                    commands: s.commands,
                    context: s.context,
                    prevention: s.prevention,
                })
                .collect(),
        }
    }
}

/// Greedy word wrap.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
