//! Strategy presets for building a simulation configuration.
//!
//! An operator picks a strategy, optionally a model and parameter tweaks,
//! and optionally asks for per-writer overrides based on each writer's
//! profile. The baseline always stays on the historical per-word rate.

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::analytics::{WriterStatistics, classify_writer, smart_defaults};
use crate::core::pricing::{CostModel, ModelKind, ParamMap, PricingConfig};
use crate::core::resolver::{GlobalDefaults, Scenario, WriterOverrides};
use crate::error::{Result, SimError};

/// Bonus applied by the quality strategy.
pub const QUALITY_BONUS_PERCENT: f64 = 5.0;

/// Historical baseline: per word at the reference rate, no bonus.
#[must_use]
pub const fn historical_baseline() -> PricingConfig {
    PricingConfig::new(CostModel::PerWord { rate: 0.13 })
}

/// Goal of the proposed pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Reduce spend, starting from a capped price.
    #[default]
    Optimize,
    /// Reward quality with a per-word rate and a bonus.
    Quality,
}

impl Strategy {
    /// Parse from CLI argument (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` for an unknown strategy.
    pub fn from_arg(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "optimize" | "optimise" => Ok(Self::Optimize),
            "quality" => Ok(Self::Quality),
            other => Err(SimError::Config(format!(
                "Unknown strategy '{other}'. Valid strategies: optimize, quality"
            ))),
        }
    }

    /// Model preselected by this strategy.
    #[must_use]
    pub const fn preset_model(self) -> ModelKind {
        match self {
            Self::Optimize => ModelKind::CapPlusOverage,
            Self::Quality => ModelKind::PerWord,
        }
    }

    /// Bonus preselected by this strategy.
    #[must_use]
    pub const fn preset_bonus(self) -> f64 {
        match self {
            Self::Optimize => 0.0,
            Self::Quality => QUALITY_BONUS_PERCENT,
        }
    }
}

/// Choices that turn into a configuration.
#[derive(Debug, Clone, Default)]
pub struct WizardSelection {
    pub strategy: Strategy,
    /// Model for the simulation; the strategy preset when None.
    pub model: Option<ModelKind>,
    /// Parameter values replacing the model defaults.
    pub params: ParamMap,
    /// Bonus for the simulation; the strategy preset when None.
    pub bonus_percent: Option<f64>,
    /// Give every writer a simulation override from their profile.
    pub recommend_overrides: bool,
}

/// Reject a negative or non-finite bonus percentage.
///
/// # Errors
///
/// Returns `SimError::ConfigInvalid` naming the `bonus` key.
pub fn check_bonus(bonus: f64) -> Result<f64> {
    if bonus < 0.0 || !bonus.is_finite() {
        return Err(SimError::ConfigInvalid {
            key: "bonus".to_string(),
            value: bonus.to_string(),
            message: "bonus percentage must not be negative".to_string(),
        });
    }
    Ok(bonus)
}

/// Build global defaults and writer overrides from a selection.
///
/// # Errors
///
/// Returns `SimError::ConfigInvalid` for a negative bonus.
pub fn build_configuration(
    selection: &WizardSelection,
    stats: &IndexMap<String, WriterStatistics>,
) -> Result<(GlobalDefaults, WriterOverrides)> {
    let bonus = check_bonus(
        selection
            .bonus_percent
            .unwrap_or_else(|| selection.strategy.preset_bonus()),
    )?;

    let kind = selection
        .model
        .unwrap_or_else(|| selection.strategy.preset_model());
    let simulation =
        PricingConfig::new(kind.default_params().patched(&selection.params)).with_bonus(bonus);
    let defaults = GlobalDefaults::new(historical_baseline(), simulation);

    // Recommended overrides carry the strategy's bonus, not the explicit one.
    let override_bonus = selection.strategy.preset_bonus();
    let mut overrides = WriterOverrides::new();
    if selection.recommend_overrides {
        for (writer, writer_stats) in stats {
            let suggested = classify_writer(writer_stats).suggested_model();
            let config = PricingConfig::new(smart_defaults(suggested, writer_stats))
                .with_bonus(override_bonus);
            overrides.set(writer.clone(), Scenario::Simulation, config);
        }
        tracing::debug!(count = overrides.len(), "Applied recommended writer overrides");
    }

    Ok((defaults, overrides))
}
