//! Error types for pricesim.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Import**: the article CSV yields no usable rows or cannot be read
//! - **Configuration**: config file parsing, validation, unknown models
//! - **Usage**: malformed command-line values
//! - **Internal**: I/O, serialization, unclassified
//!
//! Each error has a stable error code (e.g., `PSIM-I001`) for programmatic
//! handling, and can provide fix suggestions via
//! [`SimError::fix_suggestions()`].
//!
//! Malformed CSV rows are not errors: they are skipped during import and
//! only counted.

pub mod suggestions;

use thiserror::Error;

pub use suggestions::FixSuggestion;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Article import issues.
    Import,
    /// Configuration issues (parse errors, invalid values, unknown models).
    Configuration,
    /// Invalid command-line input.
    Usage,
    /// Internal errors (I/O, serialization, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Import => "Import error",
            Self::Configuration => "Configuration error",
            Self::Usage => "Usage error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Import => "I",
            Self::Configuration => "C",
            Self::Usage => "U",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure (I/O, serialization)
    GeneralError = 1,
    /// Invalid command-line values
    InvalidInput = 2,
    /// Import, parse, or configuration errors
    ParseError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for pricesim operations.
#[derive(Error, Debug)]
pub enum SimError {
    // ==========================================================================
    // Import errors (Category: Import)
    // ==========================================================================
    /// The CSV contained no row with a writer, a DD/MM/YYYY date, and an
    /// integer word count.
    #[error("no valid rows found in article CSV ({skipped} row(s) skipped)")]
    NoValidRows { skipped: usize },

    /// The CSV file could not be opened.
    #[error("cannot read article CSV {path}: {message}")]
    CsvUnreadable { path: String, message: String },

    /// The CSV structure could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Unknown cost model identifier.
    #[error("unknown pricing model '{0}'")]
    UnknownModel(String),

    /// Configuration file not found at an explicitly requested path.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: String },

    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ==========================================================================
    // Usage errors (Category: Usage)
    // ==========================================================================
    /// A `--param` value is not `KEY=NUMBER`.
    #[error("invalid parameter '{arg}': {reason}")]
    InvalidParam { arg: String, reason: String },

    /// A requested writer has no articles.
    #[error("writer not found: {0}")]
    WriterNotFound(String),

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    /// Map error to a process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::NoValidRows { .. }
            | Self::CsvUnreadable { .. }
            | Self::Csv(_)
            | Self::UnknownModel(_)
            | Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ExitCode::ParseError,

            Self::InvalidParam { .. } | Self::WriterNotFound(_) => ExitCode::InvalidInput,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NoValidRows { .. } | Self::CsvUnreadable { .. } | Self::Csv(_) => {
                ErrorCategory::Import
            }

            Self::UnknownModel(_)
            | Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ErrorCategory::Configuration,

            Self::InvalidParam { .. } | Self::WriterNotFound(_) => ErrorCategory::Usage,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `PSIM-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            // Import errors (I001-I099)
            Self::NoValidRows { .. } => "PSIM-I001",
            Self::CsvUnreadable { .. } => "PSIM-I002",
            Self::Csv(_) => "PSIM-I003",

            // Configuration errors (C001-C099)
            Self::ConfigNotFound { .. } => "PSIM-C001",
            Self::ConfigParse { .. } => "PSIM-C002",
            Self::ConfigInvalid { .. } => "PSIM-C003",
            Self::Config(_) => "PSIM-C004",
            Self::UnknownModel(_) => "PSIM-C010",

            // Usage errors (U001-U099)
            Self::InvalidParam { .. } => "PSIM-U001",
            Self::WriterNotFound(_) => "PSIM-U002",

            // Internal errors (X001-X099)
            Self::Io(_) => "PSIM-X001",
            Self::Json(_) => "PSIM-X002",
            Self::Other(_) => "PSIM-X099",
        }
    }

    /// Returns actionable fix suggestions for this error.
    #[must_use]
    pub fn fix_suggestions(&self) -> Vec<FixSuggestion> {
        match self {
            Self::NoValidRows { skipped } => suggestions::no_valid_rows_suggestions(*skipped),
            Self::CsvUnreadable { path, .. } => suggestions::csv_unreadable_suggestions(path),
            Self::Csv(e) => suggestions::csv_structure_suggestions(&e.to_string()),
            Self::UnknownModel(model) => suggestions::unknown_model_suggestions(model),
            Self::ConfigNotFound { path } => suggestions::config_not_found_suggestions(path),
            Self::ConfigParse { path, message } => {
                suggestions::config_parse_suggestions(path, message)
            }
            Self::ConfigInvalid { key, value, .. } => {
                suggestions::config_invalid_suggestions(key, value)
            }
            Self::Config(msg) => vec![FixSuggestion::new(
                vec!["pricesim --help".to_string()],
                format!("Configuration issue: {msg}"),
            )],
            Self::InvalidParam { arg, .. } => suggestions::invalid_param_suggestions(arg),
            Self::WriterNotFound(writer) => vec![FixSuggestion::new(
                vec!["pricesim writers <CSV>".to_string()],
                format!("No article in the CSV is attributed to '{writer}'."),
            )],
            Self::Io(_) | Self::Json(_) | Self::Other(_) => Vec::new(),
        }
    }
}

/// Result type alias for pricesim operations.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_category_code_prefix() {
        assert_eq!(ErrorCategory::Import.code_prefix(), "I");
        assert_eq!(ErrorCategory::Configuration.code_prefix(), "C");
        assert_eq!(ErrorCategory::Usage.code_prefix(), "U");
        assert_eq!(ErrorCategory::Internal.code_prefix(), "X");
    }

    #[test]
    fn error_code_matches_category_prefix() {
        let errors = [
            SimError::NoValidRows { skipped: 0 },
            SimError::UnknownModel("tiered".to_string()),
            SimError::InvalidParam {
                arg: "rate".to_string(),
                reason: "missing '='".to_string(),
            },
            SimError::Io(std::io::Error::other("boom")),
        ];
        for error in errors {
            let code = error.error_code();
            let prefix = format!("PSIM-{}", error.category().code_prefix());
            assert!(code.starts_with(&prefix), "{code} vs {prefix}");
        }
    }

    #[test]
    fn import_errors_exit_with_parse_error() {
        assert_eq!(
            SimError::NoValidRows { skipped: 4 }.exit_code(),
            ExitCode::ParseError
        );
        assert_eq!(i32::from(ExitCode::ParseError), 3);
    }

    #[test]
    fn invalid_param_exits_with_invalid_input() {
        let err = SimError::InvalidParam {
            arg: "x".to_string(),
            reason: "bad".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }

    #[test]
    fn no_valid_rows_message_mentions_skipped() {
        let err = SimError::NoValidRows { skipped: 7 };
        assert!(err.to_string().contains("7 row(s) skipped"));
        assert!(!err.fix_suggestions().is_empty());
    }
}
