//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::core::pricing::{ModelKind, ParamMap};
use crate::error::{Result, SimError};

/// Writer pricing simulator - compare a baseline against a proposed pricing.
#[derive(Parser, Debug)]
#[command(name = "pricesim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Output format given on the command line, if any.
    #[must_use]
    pub const fn explicit_format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }

    /// Resolve the effective output format from flags alone.
    #[must_use]
    pub fn effective_format(&self) -> OutputFormat {
        self.explicit_format().unwrap_or_default()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price every article under both scenarios and compare
    Simulate(SimulateArgs),

    /// Show per-writer statistics and recommended models
    Writers(WritersArgs),

    /// Price a single word count
    Quote(QuoteArgs),

    /// List the available cost models and their default parameters
    Models,

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Pricing flags shared by `simulate` and `quote`.
#[derive(Args, Debug, Clone, Default)]
pub struct PricingArgs {
    /// Cost model for the simulation (PW, FP, HY, DMR, CO or a kebab name)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Model parameter override, repeatable (e.g. --param cap=4000)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Bonus percentage applied on top of the model cost
    #[arg(long, value_name = "PCT")]
    pub bonus: Option<f64>,
}

impl PricingArgs {
    /// Parse `--model`, if given.
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownModel` for an unrecognized model.
    pub fn model_kind(&self) -> Result<Option<ModelKind>> {
        self.model.as_deref().map(ModelKind::from_arg).transpose()
    }

    /// Parse every `--param` into a map.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidParam` for the first malformed entry.
    pub fn param_map(&self) -> Result<ParamMap> {
        let mut map = ParamMap::new();
        for arg in &self.params {
            let (key, value) = parse_param(arg)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Arguments for the `simulate` command.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Article CSV (URL, Writer, Publish Date, Word Count)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Strategy preset (optimize, quality)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    #[command(flatten)]
    pub pricing: PricingArgs,

    /// Give each writer a simulation override matching their profile
    #[arg(long)]
    pub recommend: bool,

    /// List every priced article
    #[arg(long)]
    pub articles: bool,

    /// Only list articles matching this term (implies --articles)
    #[arg(long, value_name = "TERM")]
    pub filter: Option<String>,

    /// Show the N writers with the highest total cost
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Show average word count per month
    #[arg(long)]
    pub trend: bool,
}

impl SimulateArgs {
    /// Whether the strategy or model was chosen on the command line.
    #[must_use]
    pub const fn selects_simulation(&self) -> bool {
        self.strategy.is_some() || self.pricing.model.is_some()
    }

    /// Whether the article grid is shown.
    #[must_use]
    pub const fn shows_articles(&self) -> bool {
        self.articles || self.filter.is_some()
    }
}

/// Arguments for the `writers` command.
#[derive(Parser, Debug)]
pub struct WritersArgs {
    /// Article CSV (URL, Writer, Publish Date, Word Count)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Only report this writer (exact name)
    #[arg(long, value_name = "NAME")]
    pub writer: Option<String>,
}

/// Arguments for the `quote` command.
#[derive(Parser, Debug)]
pub struct QuoteArgs {
    /// Word count to price
    #[arg(long, value_name = "N")]
    pub words: u64,

    #[command(flatten)]
    pub pricing: PricingArgs,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable rich output
    #[default]
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}

impl OutputFormat {
    /// Parse from a config or env value.
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Md),
            _ => None,
        }
    }
}

/// Parse a `KEY=NUMBER` parameter.
///
/// # Errors
///
/// Returns `SimError::InvalidParam` when the separator, key, or number is
/// missing or the number is not finite.
pub fn parse_param(arg: &str) -> Result<(String, f64)> {
    let invalid = |reason: &str| SimError::InvalidParam {
        arg: arg.to_string(),
        reason: reason.to_string(),
    };

    let (key, value) = arg.split_once('=').ok_or_else(|| invalid("missing '='"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid("empty key"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("value is not a number"))?;
    if !value.is_finite() {
        return Err(invalid("value must be finite"));
    }
    Ok((key.to_string(), value))
}
