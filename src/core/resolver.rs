//! Per-writer, per-scenario configuration resolution.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::pricing::PricingConfig;

/// Which side of the comparison a configuration applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Historical / reference pricing.
    Baseline,
    /// Proposed pricing.
    Simulation,
}

impl Scenario {
    pub const ALL: &'static [Self] = &[Self::Baseline, Self::Simulation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Simulation => "simulation",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration used for every writer without an override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalDefaults {
    pub baseline: PricingConfig,
    pub simulation: PricingConfig,
}

impl GlobalDefaults {
    #[must_use]
    pub const fn new(baseline: PricingConfig, simulation: PricingConfig) -> Self {
        Self {
            baseline,
            simulation,
        }
    }

    /// The default for one scenario.
    #[must_use]
    pub const fn get(&self, scenario: Scenario) -> &PricingConfig {
        match scenario {
            Scenario::Baseline => &self.baseline,
            Scenario::Simulation => &self.simulation,
        }
    }
}

/// Optional per-scenario replacements for a single writer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<PricingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<PricingConfig>,
}

impl ScenarioOverrides {
    #[must_use]
    pub const fn get(&self, scenario: Scenario) -> Option<&PricingConfig> {
        match scenario {
            Scenario::Baseline => self.baseline.as_ref(),
            Scenario::Simulation => self.simulation.as_ref(),
        }
    }

    pub fn set(&mut self, scenario: Scenario, config: PricingConfig) {
        match scenario {
            Scenario::Baseline => self.baseline = Some(config),
            Scenario::Simulation => self.simulation = Some(config),
        }
    }
}

/// Writer name to overrides, in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriterOverrides {
    entries: IndexMap<String, ScenarioOverrides>,
}

impl WriterOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one scenario for a writer, keeping any other scenario.
    pub fn set(&mut self, writer: impl Into<String>, scenario: Scenario, config: PricingConfig) {
        self.entries
            .entry(writer.into())
            .or_default()
            .set(scenario, config);
    }

    #[must_use]
    pub fn get(&self, writer: &str) -> Option<&ScenarioOverrides> {
        self.entries.get(writer)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writers that have at least one override.
    pub fn writers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScenarioOverrides)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Effective configuration for a writer in a scenario.
///
/// An override, when present for the scenario, replaces the default whole.
/// The returned reference points into either `overrides` or `defaults`.
#[must_use]
pub fn resolve<'a>(
    writer: &str,
    scenario: Scenario,
    defaults: &'a GlobalDefaults,
    overrides: &'a WriterOverrides,
) -> &'a PricingConfig {
    overrides
        .get(writer)
        .and_then(|o| o.get(scenario))
        .unwrap_or_else(|| defaults.get(scenario))
}
