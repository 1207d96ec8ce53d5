//! Fix suggestions for pricesim errors.
//!
//! Provides actionable fix suggestions mapped to specific error types,
//! including commands, context explanations, and prevention tips.

use crate::core::import::{COL_PUBLISH_DATE, COL_URL, COL_WORD_COUNT, COL_WRITER};
use crate::core::pricing::ModelKind;

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct FixSuggestion {
    /// Fix commands in order of preference, copy-paste ready.
    pub commands: Vec<String>,

    /// Explanation of why this error occurred.
    pub context: String,

    /// Tips to prevent this error in the future.
    pub prevention: Option<String>,
}

impl FixSuggestion {
    /// Creates a new fix suggestion with required fields.
    #[must_use]
    pub fn new(commands: Vec<String>, context: impl Into<String>) -> Self {
        Self {
            commands,
            context: context.into(),
            prevention: None,
        }
    }

    /// Builder: adds prevention tips.
    #[must_use]
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = Some(prevention.into());
        self
    }
}

fn expected_header() -> String {
    format!("{COL_URL},{COL_WRITER},{COL_PUBLISH_DATE},{COL_WORD_COUNT}")
}

fn model_list() -> String {
    ModelKind::ALL
        .iter()
        .map(|k| k.code())
        .collect::<Vec<_>>()
        .join(", ")
}

#[must_use]
pub fn no_valid_rows_suggestions(skipped: usize) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec![format!("# Header row must be: {}", expected_header())],
            format!(
                "None of the {skipped} data row(s) had a writer, a DD/MM/YYYY publish date, \
                 and an integer word count."
            ),
        )
        .with_prevention("Export dates as DD/MM/YYYY and word counts without separators."),
    ]
}

#[must_use]
pub fn csv_unreadable_suggestions(path: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("ls -l {path}")],
        "The article CSV could not be opened. Check the path and permissions.",
    )]
}

#[must_use]
pub fn csv_structure_suggestions(message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("# Header row must be: {}", expected_header())],
        format!("The CSV structure could not be read: {message}"),
    )]
}

#[must_use]
pub fn unknown_model_suggestions(model: &str) -> Vec<FixSuggestion> {
    vec![
        FixSuggestion::new(
            vec!["pricesim models".to_string()],
            format!(
                "'{model}' is not a pricing model. Valid models: {}",
                model_list()
            ),
        )
        .with_prevention("Use a short code (PW, CO, ...) or a kebab name (cap-plus-overage)."),
    ]
}

#[must_use]
pub fn config_not_found_suggestions(path: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("touch {path}")],
        "An explicit config path was given but the file does not exist.",
    )]
}

#[must_use]
pub fn config_parse_suggestions(path: &str, message: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec![format!("$EDITOR {path}")],
        format!("The config file is not valid TOML: {message}"),
    )]
}

#[must_use]
pub fn config_invalid_suggestions(key: &str, value: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["pricesim --help".to_string()],
        format!("The value '{value}' is not allowed for '{key}'."),
    )]
}

#[must_use]
pub fn invalid_param_suggestions(arg: &str) -> Vec<FixSuggestion> {
    vec![FixSuggestion::new(
        vec!["pricesim simulate data.csv --model CO --param cap=4000".to_string()],
        format!("'{arg}' must have the form KEY=NUMBER."),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_lists_codes() {
        let suggestions = unknown_model_suggestions("tiered");
        assert!(suggestions[0].context.contains("PW, FP, HY, DMR, CO"));
    }

    #[test]
    fn no_valid_rows_shows_header() {
        let suggestions = no_valid_rows_suggestions(3);
        assert!(suggestions[0].commands[0].contains("URL,Writer,Publish Date,Word Count"));
        assert!(suggestions[0].prevention.is_some());
    }
}
