//! Configuration file loading and resolution.
//!
//! Loads configuration from:
//! - Linux: `~/.config/pricesim/config.toml`
//! - macOS: `~/Library/Application Support/com.pricesim.pricesim/config.toml`
//! - Windows: `%APPDATA%/pricesim/config/config.toml`
//!
//! ## Precedence
//!
//! Output settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `PRICESIM_FORMAT`: Output format (human, json, md)
//! - `PRICESIM_NO_COLOR` or `NO_COLOR`: Disable colors
//! - `PRICESIM_PRETTY`: Pretty-print JSON output (1, true, yes)
//! - `PRICESIM_CONFIG`: Override config file path
//!
//! ## Pricing
//!
//! `[pricing.baseline]` and `[pricing.simulation]` set the global defaults,
//! and `[overrides."Writer".baseline|simulation]` set per-writer models.
//! Model identifiers are checked when the file is turned into pricing
//! configuration; an unknown model is an error, never a silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, OutputFormat};
use crate::core::pricing::{CostModel, ModelKind, ParamMap, PricingConfig};
use crate::core::resolver::{Scenario, WriterOverrides};
use crate::error::{Result, SimError};

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for output format.
pub const ENV_FORMAT: &str = "PRICESIM_FORMAT";
/// Environment variable to disable colors.
pub const ENV_NO_COLOR: &str = "PRICESIM_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
/// Environment variable for pretty JSON output.
pub const ENV_PRETTY: &str = "PRICESIM_PRETTY";
/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "PRICESIM_CONFIG";

const DEFAULT_CURRENCY: &str = "€";

// =============================================================================
// File Model
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output settings.
    pub output: OutputConfig,
    /// Global pricing defaults.
    pub pricing: PricingSection,
    /// Per-writer pricing overrides, in file order.
    pub overrides: IndexMap<String, WriterOverrideConfig>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, md).
    pub format: Option<String>,
    /// Whether to use colors in output.
    pub color: bool,
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
    /// Currency symbol appended to costs.
    pub currency: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            pretty: false,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// `[pricing]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingSection {
    pub baseline: Option<ScenarioConfig>,
    pub simulation: Option<ScenarioConfig>,
}

/// `[overrides."Writer"]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WriterOverrideConfig {
    pub baseline: Option<ScenarioConfig>,
    pub simulation: Option<ScenarioConfig>,
}

impl WriterOverrideConfig {
    const fn get(&self, scenario: Scenario) -> Option<&ScenarioConfig> {
        match scenario {
            Scenario::Baseline => self.baseline.as_ref(),
            Scenario::Simulation => self.simulation.as_ref(),
        }
    }
}

/// One scenario's model as written in the file.
///
/// Parameters are a loose name to number table; missing parameters are 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub model: String,
    #[serde(default)]
    pub bonus_percent: f64,
    #[serde(default)]
    pub params: ParamMap,
}

impl ScenarioConfig {
    /// Assemble a pricing configuration.
    ///
    /// `key` names the table for error messages.
    ///
    /// # Errors
    ///
    /// `SimError::UnknownModel` for an unrecognized model, and
    /// `SimError::ConfigInvalid` for a negative bonus.
    pub fn to_pricing_config(&self, key: &str) -> Result<PricingConfig> {
        let kind = ModelKind::from_arg(&self.model)?;
        if self.bonus_percent < 0.0 || !self.bonus_percent.is_finite() {
            return Err(SimError::ConfigInvalid {
                key: format!("{key}.bonus_percent"),
                value: self.bonus_percent.to_string(),
                message: "bonus percentage must be a non-negative number".to_string(),
            });
        }
        Ok(PricingConfig::new(CostModel::from_params(kind, &self.params))
            .with_bonus(self.bonus_percent))
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// I/O failures reading an existing file and `SimError::ConfigParse` for
    /// invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SimError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration for a CLI invocation.
    ///
    /// `--config` wins over `PRICESIM_CONFIG`, which wins over the default
    /// location. An explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// `SimError::ConfigNotFound` for a missing explicit path, plus
    /// everything [`Config::load_from`] returns.
    pub fn load_for(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

        match explicit {
            Some(path) if !path.exists() => Err(SimError::ConfigNotFound {
                path: path.display().to_string(),
            }),
            Some(path) => Self::load_from(&path),
            None => Self::load(),
        }
    }

    /// Get the default config file path.
    #[must_use]
    pub fn config_path() -> PathBuf {
        AppPaths::new().config_file()
    }

    /// Validate configuration values.
    ///
    /// Checks that the output format is known and that every model id and
    /// bonus in the pricing tables is valid.
    ///
    /// # Errors
    ///
    /// The first invalid value found.
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.output.format
            && OutputFormat::from_arg(format).is_none()
        {
            return Err(SimError::ConfigInvalid {
                key: "output.format".to_string(),
                value: format.clone(),
                message: "valid formats: human, json, md".to_string(),
            });
        }

        self.baseline()?;
        self.simulation()?;
        self.writer_overrides()?;
        Ok(())
    }

    /// Global baseline from `[pricing.baseline]`, if present.
    ///
    /// # Errors
    ///
    /// See [`ScenarioConfig::to_pricing_config`].
    pub fn baseline(&self) -> Result<Option<PricingConfig>> {
        self.pricing
            .baseline
            .as_ref()
            .map(|c| c.to_pricing_config("pricing.baseline"))
            .transpose()
    }

    /// Global simulation from `[pricing.simulation]`, if present.
    ///
    /// # Errors
    ///
    /// See [`ScenarioConfig::to_pricing_config`].
    pub fn simulation(&self) -> Result<Option<PricingConfig>> {
        self.pricing
            .simulation
            .as_ref()
            .map(|c| c.to_pricing_config("pricing.simulation"))
            .transpose()
    }

    /// Per-writer overrides from `[overrides]`.
    ///
    /// # Errors
    ///
    /// See [`ScenarioConfig::to_pricing_config`].
    pub fn writer_overrides(&self) -> Result<WriterOverrides> {
        let mut overrides = WriterOverrides::new();
        for (writer, entry) in &self.overrides {
            for &scenario in Scenario::ALL {
                if let Some(config) = entry.get(scenario) {
                    let key = format!("overrides.\"{writer}\".{scenario}");
                    overrides.set(writer.clone(), scenario, config.to_pricing_config(&key)?);
                }
            }
        }
        Ok(overrides)
    }
}

// =============================================================================
// Resolved Output Settings
// =============================================================================

/// Output settings after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: OutputFormat,
    pub no_color: bool,
    pub pretty: bool,
    pub currency: String,
    sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub format: ConfigSource,
    pub no_color: ConfigSource,
    pub pretty: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from CLI flag.
    Cli,
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve output settings for a CLI invocation.
    ///
    /// # Errors
    ///
    /// `SimError::ConfigInvalid` when `PRICESIM_FORMAT` or the config file
    /// names an unknown format.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let mut sources = ConfigSources::default();

        let format = Self::resolve_format(cli, config, &mut sources.format)?;
        let no_color = Self::resolve_no_color(cli, config, &mut sources.no_color);
        let pretty = Self::resolve_pretty(cli, config, &mut sources.pretty);

        let resolved = Self {
            format,
            no_color,
            pretty,
            currency: config.output.currency.clone(),
            sources,
        };
        resolved.log_sources();
        Ok(resolved)
    }

    /// Debug-log where each setting came from (visible with `--verbose`).
    fn log_sources(&self) {
        tracing::debug!(
            format = ?self.format,
            format_source = %self.sources.format,
            no_color = self.no_color,
            no_color_source = %self.sources.no_color,
            pretty = self.pretty,
            pretty_source = %self.sources.pretty,
            "Resolved output settings"
        );
    }

    fn resolve_format(
        cli: &Cli,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<OutputFormat> {
        // 1. CLI --json / --format
        if let Some(format) = cli.explicit_format() {
            *source = ConfigSource::Cli;
            return Ok(format);
        }

        // 2. Environment variable
        if let Ok(format_env) = std::env::var(ENV_FORMAT) {
            *source = ConfigSource::Env;
            return Self::parse_format(ENV_FORMAT, &format_env);
        }

        // 3. Config file
        if let Some(ref format_str) = config.output.format {
            *source = ConfigSource::ConfigFile;
            return Self::parse_format("output.format", format_str);
        }

        // 4. Default
        *source = ConfigSource::Default;
        Ok(OutputFormat::Human)
    }

    fn parse_format(key: &str, s: &str) -> Result<OutputFormat> {
        OutputFormat::from_arg(s).ok_or_else(|| SimError::ConfigInvalid {
            key: key.to_string(),
            value: s.to_string(),
            message: "valid formats: human, json, md".to_string(),
        })
    }

    fn resolve_no_color(cli: &Cli, config: &Config, source: &mut ConfigSource) -> bool {
        // 1. CLI --no-color flag
        if cli.no_color {
            *source = ConfigSource::Cli;
            return true;
        }

        // 2. Environment variable (PRICESIM_NO_COLOR or standard NO_COLOR)
        if is_env_truthy(ENV_NO_COLOR) || std::env::var_os(ENV_NO_COLOR_STD).is_some() {
            *source = ConfigSource::Env;
            return true;
        }

        // 3. Config file (inverted)
        if !config.output.color {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }

    fn resolve_pretty(cli: &Cli, config: &Config, source: &mut ConfigSource) -> bool {
        if cli.pretty {
            *source = ConfigSource::Cli;
            return true;
        }

        if is_env_truthy(ENV_PRETTY) {
            *source = ConfigSource::Env;
            return true;
        }

        if config.output.pretty {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        *source = ConfigSource::Default;
        false
    }
}

/// Check if an environment variable is set to a truthy value.
#[must_use]
pub fn is_env_truthy(var: &str) -> bool {
    std::env::var(var)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
