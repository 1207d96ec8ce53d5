//! Output rendering for human and robot modes.

pub mod error;
pub mod human;
pub mod robot;

use std::io::Write;

use rich_rust::{Color, ColorSystem, Segment, Style};

use crate::cli::args::OutputFormat;
use crate::core::models::{ModelInfo, QuotePayload, SimulatePayload, WritersPayload};
use crate::error::{Result, SimError};

/// Output settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub no_color: bool,
    pub currency: String,
}

/// Render a simulation.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_simulate(payload: &SimulatePayload, opts: &RenderOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Human => Ok(human::render_simulate(payload, &opts.currency, opts.no_color)),
        OutputFormat::Json => robot::render_envelope_with_warnings(
            "simulate",
            payload,
            robot::skipped_rows_warnings(payload.skipped_rows),
            opts.pretty,
        ),
        OutputFormat::Md => Ok(robot::render_simulate_md(payload, &opts.currency)),
    }
}

/// Render writer statistics.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_writers(payload: &WritersPayload, opts: &RenderOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Human => Ok(human::render_writers(payload, opts.no_color)),
        OutputFormat::Json => robot::render_envelope_with_warnings(
            "writers",
            payload,
            robot::skipped_rows_warnings(payload.skipped_rows),
            opts.pretty,
        ),
        OutputFormat::Md => Ok(robot::render_writers_md(payload)),
    }
}

/// Render a quote.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_quote(payload: &QuotePayload, opts: &RenderOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Human => Ok(human::render_quote(payload, &opts.currency, opts.no_color)),
        OutputFormat::Json => robot::render_envelope("quote", payload, opts.pretty),
        OutputFormat::Md => Ok(robot::render_quote_md(payload, &opts.currency)),
    }
}

/// Render the model catalogue.
///
/// # Errors
///
/// JSON serialization failures.
pub fn render_models(models: &[ModelInfo], opts: &RenderOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Human => Ok(human::render_models(models, opts.no_color)),
        OutputFormat::Json => robot::render_envelope("models", models, opts.pretty),
        OutputFormat::Md => Ok(robot::render_models_md(models)),
    }
}

/// Print rendered command output to stdout.
///
/// # Errors
///
/// `SimError::Other` when stdout is closed or unwritable.
pub fn emit(output: &str) -> Result<()> {
    write_output(&mut std::io::stdout().lock(), output)
}

fn write_output<W: Write>(out: &mut W, output: &str) -> Result<()> {
    writeln!(out, "{}", output.trim_end())
        .and_then(|()| out.flush())
        .map_err(|e| SimError::Other(anyhow::anyhow!("write command output: {e}")))
}

/// Convert segments to a string, with ANSI styling unless `no_color`.
pub(crate) fn segments_to_string(segments: &[Segment], no_color: bool) -> String {
    segments
        .iter()
        .map(|seg| match (&seg.style, no_color) {
            (Some(style), false) => style.render(&seg.text, ColorSystem::TrueColor),
            _ => seg.text.to_string(),
        })
        .collect()
}

/// A style with the named foreground color, or a plain style if the name
/// does not parse.
pub(crate) fn colored(name: &str) -> Style {
    Color::parse(name).map_or_else(|_| Style::new(), |color| Style::new().color(color))
}
