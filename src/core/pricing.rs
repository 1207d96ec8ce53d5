//! Cost models and per-article cost calculation.
//!
//! A pricing configuration is a tagged union over the five supported models
//! plus a quality bonus. `compute_cost` is an exhaustive match, so every
//! model always carries exactly the parameters it needs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Loose parameter map as supplied by a config file or CLI flags.
pub type ParamMap = BTreeMap<String, f64>;

/// Identifier of a cost model, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    PerWord,
    FixedPrice,
    Hybrid,
    DecreasingMarginalRate,
    CapPlusOverage,
}

impl ModelKind {
    /// All model kinds in display order.
    pub const ALL: &'static [Self] = &[
        Self::PerWord,
        Self::FixedPrice,
        Self::Hybrid,
        Self::DecreasingMarginalRate,
        Self::CapPlusOverage,
    ];

    /// Parse a model identifier (short code or kebab name, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownModel` for anything else.
    pub fn from_arg(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pw" | "per-word" | "perword" | "per_word" => Ok(Self::PerWord),
            "fp" | "fixed-price" | "fixedprice" | "fixed_price" => Ok(Self::FixedPrice),
            "hy" | "hybrid" => Ok(Self::Hybrid),
            "dmr" | "decreasing-marginal-rate" | "decreasingmarginalrate"
            | "decreasing_marginal_rate" => Ok(Self::DecreasingMarginalRate),
            "co" | "cap-plus-overage" | "capplusoverage" | "cap_plus_overage" => {
                Ok(Self::CapPlusOverage)
            }
            _ => Err(SimError::UnknownModel(s.to_string())),
        }
    }

    /// Short code used in tables and config files.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PerWord => "PW",
            Self::FixedPrice => "FP",
            Self::Hybrid => "HY",
            Self::DecreasingMarginalRate => "DMR",
            Self::CapPlusOverage => "CO",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PerWord => "Per word",
            Self::FixedPrice => "Fixed price",
            Self::Hybrid => "Hybrid",
            Self::DecreasingMarginalRate => "Decreasing marginal rate",
            Self::CapPlusOverage => "Cap plus overage",
        }
    }

    /// Names of the parameters this model requires, in canonical order.
    #[must_use]
    pub const fn param_keys(self) -> &'static [&'static str] {
        match self {
            Self::PerWord => &["rate"],
            Self::FixedPrice => &["fixedAmount"],
            Self::Hybrid => &["baseFee", "reducedRate"],
            Self::DecreasingMarginalRate => &["standardRate", "threshold", "lowerRate"],
            Self::CapPlusOverage => &["fixedAmount", "cap", "overageRate"],
        }
    }

    /// Starting parameters offered before an operator edits anything.
    #[must_use]
    pub const fn default_params(self) -> CostModel {
        match self {
            Self::PerWord => CostModel::PerWord { rate: 0.13 },
            Self::FixedPrice => CostModel::FixedPrice {
                fixed_amount: 100.0,
            },
            Self::Hybrid => CostModel::Hybrid {
                base_fee: 50.0,
                reduced_rate: 0.08,
            },
            Self::DecreasingMarginalRate => CostModel::DecreasingMarginalRate {
                standard_rate: 0.13,
                threshold: 1000.0,
                lower_rate: 0.08,
            },
            Self::CapPlusOverage => CostModel::CapPlusOverage {
                fixed_amount: 500.0,
                cap: 5000.0,
                overage_rate: 0.13,
            },
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A cost model with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum CostModel {
    /// `words * rate`
    PerWord { rate: f64 },
    /// Constant amount regardless of length.
    FixedPrice { fixed_amount: f64 },
    /// Research fee plus a reduced per-word rate.
    Hybrid { base_fee: f64, reduced_rate: f64 },
    /// Standard rate up to a threshold, lower rate beyond it.
    DecreasingMarginalRate {
        standard_rate: f64,
        threshold: f64,
        lower_rate: f64,
    },
    /// Fixed amount up to a cap, per-word overage beyond it.
    CapPlusOverage {
        fixed_amount: f64,
        cap: f64,
        overage_rate: f64,
    },
}

impl CostModel {
    /// The identifier of this model.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::PerWord { .. } => ModelKind::PerWord,
            Self::FixedPrice { .. } => ModelKind::FixedPrice,
            Self::Hybrid { .. } => ModelKind::Hybrid,
            Self::DecreasingMarginalRate { .. } => ModelKind::DecreasingMarginalRate,
            Self::CapPlusOverage { .. } => ModelKind::CapPlusOverage,
        }
    }

    /// Assemble a model from a loose parameter map.
    ///
    /// Missing keys become 0. Keys are matched ignoring case, `_` and `-`,
    /// so `fixedAmount` and `fixed_amount` name the same parameter. Keys the
    /// model does not use are logged and ignored.
    #[must_use]
    pub fn from_params(kind: ModelKind, params: &ParamMap) -> Self {
        let expected = kind.param_keys();
        for key in params.keys() {
            if !expected.iter().any(|e| same_key(e, key)) {
                tracing::warn!(model = %kind, key = %key, "Ignoring unknown pricing parameter");
            }
        }

        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| same_key(name, k))
                .map_or(0.0, |(_, v)| *v)
        };

        match kind {
            ModelKind::PerWord => Self::PerWord { rate: get("rate") },
            ModelKind::FixedPrice => Self::FixedPrice {
                fixed_amount: get("fixedAmount"),
            },
            ModelKind::Hybrid => Self::Hybrid {
                base_fee: get("baseFee"),
                reduced_rate: get("reducedRate"),
            },
            ModelKind::DecreasingMarginalRate => Self::DecreasingMarginalRate {
                standard_rate: get("standardRate"),
                threshold: get("threshold"),
                lower_rate: get("lowerRate"),
            },
            ModelKind::CapPlusOverage => Self::CapPlusOverage {
                fixed_amount: get("fixedAmount"),
                cap: get("cap"),
                overage_rate: get("overageRate"),
            },
        }
    }

    /// Start from this model's values and replace any keys present in `patch`.
    #[must_use]
    pub fn patched(&self, patch: &ParamMap) -> Self {
        let mut merged: ParamMap = self
            .params()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        for (key, value) in patch {
            let canonical = self
                .kind()
                .param_keys()
                .iter()
                .find(|e| same_key(e, key))
                .map_or_else(|| key.clone(), |e| (*e).to_string());
            merged.insert(canonical, *value);
        }
        Self::from_params(self.kind(), &merged)
    }

    /// Named parameter values in canonical order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, f64)> {
        let keys = self.kind().param_keys();
        let values: Vec<f64> = match *self {
            Self::PerWord { rate } => vec![rate],
            Self::FixedPrice { fixed_amount } => vec![fixed_amount],
            Self::Hybrid {
                base_fee,
                reduced_rate,
            } => vec![base_fee, reduced_rate],
            Self::DecreasingMarginalRate {
                standard_rate,
                threshold,
                lower_rate,
            } => vec![standard_rate, threshold, lower_rate],
            Self::CapPlusOverage {
                fixed_amount,
                cap,
                overage_rate,
            } => vec![fixed_amount, cap, overage_rate],
        };
        keys.iter().copied().zip(values).collect()
    }

    /// Cost before bonus for the given word count.
    ///
    /// Each formula is evaluated as written, without fused multiply-add.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn base_cost(&self, word_count: u64) -> f64 {
        let words = word_count as f64;
        match *self {
            Self::PerWord { rate } => words * rate,
            Self::FixedPrice { fixed_amount } => fixed_amount,
            Self::Hybrid {
                base_fee,
                reduced_rate,
            } => base_fee + words * reduced_rate,
            Self::DecreasingMarginalRate {
                standard_rate,
                threshold,
                lower_rate,
            } => {
                if words <= threshold {
                    words * standard_rate
                } else {
                    threshold * standard_rate + (words - threshold) * lower_rate
                }
            }
            Self::CapPlusOverage {
                fixed_amount,
                cap,
                overage_rate,
            } => {
                if words <= cap {
                    fixed_amount
                } else {
                    fixed_amount + (words - cap) * overage_rate
                }
            }
        }
    }
}

fn same_key(a: &str, b: &str) -> bool {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    norm(a) == norm(b)
}

/// Effective pricing for one writer in one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(flatten)]
    pub model: CostModel,
    /// Percentage applied multiplicatively on top of the model cost.
    #[serde(default)]
    pub bonus_percent: f64,
}

impl PricingConfig {
    /// Create a config with no bonus.
    #[must_use]
    pub const fn new(model: CostModel) -> Self {
        Self {
            model,
            bonus_percent: 0.0,
        }
    }

    /// Builder: set the bonus percentage.
    #[must_use]
    pub const fn with_bonus(mut self, bonus_percent: f64) -> Self {
        self.bonus_percent = bonus_percent;
        self
    }

    /// One-line description such as `CO fixedAmount=500 cap=5000 overageRate=0.13 +5%`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.model.kind().code().to_string();
        for (key, value) in self.model.params() {
            out.push_str(&format!(" {key}={value}"));
        }
        if self.bonus_percent != 0.0 {
            out.push_str(&format!(" +{}%", self.bonus_percent));
        }
        out
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(ModelKind::PerWord.default_params())
    }
}

/// Cost of one article under a pricing configuration, bonus included.
#[must_use]
pub fn compute_cost(word_count: u64, config: &PricingConfig) -> f64 {
    config.model.base_cost(word_count) * (1.0 + config.bonus_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_float_eq;
    use tracing_test::traced_test;

    fn co(fixed_amount: f64, cap: f64, overage_rate: f64) -> PricingConfig {
        PricingConfig::new(CostModel::CapPlusOverage {
            fixed_amount,
            cap,
            overage_rate,
        })
    }

    fn dmr(standard_rate: f64, threshold: f64, lower_rate: f64) -> PricingConfig {
        PricingConfig::new(CostModel::DecreasingMarginalRate {
            standard_rate,
            threshold,
            lower_rate,
        })
    }

    #[test]
    fn per_word_is_linear() {
        let config = PricingConfig::new(CostModel::PerWord { rate: 0.13 });
        for words in [0_u64, 1, 250, 1000, 12_345] {
            assert_float_eq!(compute_cost(words, &config), words as f64 * 0.13, 1e-9);
        }
    }

    #[test]
    fn fixed_price_ignores_word_count() {
        let config = PricingConfig::new(CostModel::FixedPrice {
            fixed_amount: 120.0,
        });
        assert_float_eq!(compute_cost(0, &config), 120.0);
        assert_float_eq!(compute_cost(9000, &config), 120.0);
    }

    #[test]
    fn hybrid_adds_base_fee() {
        let config = PricingConfig::new(CostModel::Hybrid {
            base_fee: 50.0,
            reduced_rate: 0.08,
        });
        assert_float_eq!(compute_cost(1000, &config), 130.0, 1e-9);
        assert_float_eq!(compute_cost(0, &config), 50.0);
    }

    #[test]
    fn dmr_example_above_threshold() {
        let config = dmr(0.13, 1000.0, 0.08);
        assert_float_eq!(compute_cost(6000, &config), 530.0, 1e-9);
    }

    #[test]
    fn dmr_is_continuous_at_threshold() {
        let config = dmr(0.13, 1000.0, 0.08);
        let at = compute_cost(1000, &config);
        let lower_branch = 1000.0 * 0.13;
        let upper_branch = 1000.0 * 0.13 + 0.0 * 0.08;
        assert_float_eq!(at, lower_branch, 1e-9);
        assert_float_eq!(at, upper_branch, 1e-9);
        let just_above = compute_cost(1001, &config);
        assert_float_eq!(just_above - at, 0.08, 1e-9);
    }

    #[test]
    fn cap_plus_overage_flat_then_sloped() {
        let config = co(500.0, 5000.0, 0.13);
        assert_float_eq!(compute_cost(0, &config), 500.0);
        assert_float_eq!(compute_cost(1000, &config), 500.0);
        assert_float_eq!(compute_cost(5000, &config), 500.0);

        let mut prev = compute_cost(5000, &config);
        for words in 5001..5010 {
            let cost = compute_cost(words, &config);
            assert!(cost > prev);
            assert_float_eq!(cost - prev, 0.13, 1e-9);
            prev = cost;
        }
    }

    #[test]
    fn formulas_match_unfused_arithmetic() {
        let hybrid = PricingConfig::new(CostModel::Hybrid {
            base_fee: 50.0,
            reduced_rate: 0.08,
        });
        assert_eq!(
            compute_cost(1234, &hybrid).to_bits(),
            (50.0_f64 + 1234.0 * 0.08).to_bits()
        );
        assert_eq!(
            compute_cost(1777, &dmr(0.13, 1000.0, 0.08)).to_bits(),
            (1000.0_f64 * 0.13 + 777.0 * 0.08).to_bits()
        );
        assert_eq!(
            compute_cost(5333, &co(500.0, 5000.0, 0.13)).to_bits(),
            (500.0_f64 + 333.0 * 0.13).to_bits()
        );
    }

    #[test]
    fn bonus_is_multiplicative() {
        let config = PricingConfig::new(CostModel::PerWord { rate: 0.10 }).with_bonus(5.0);
        assert_float_eq!(compute_cost(1000, &config), 105.0, 1e-9);
    }

    #[test]
    fn negative_parameters_pass_through() {
        let config = PricingConfig::new(CostModel::PerWord { rate: -0.05 });
        assert_float_eq!(compute_cost(100, &config), -5.0, 1e-9);
    }

    #[test]
    fn from_params_defaults_missing_keys_to_zero() {
        let mut params = ParamMap::new();
        params.insert("cap".to_string(), 3000.0);
        let model = CostModel::from_params(ModelKind::CapPlusOverage, &params);
        assert_eq!(
            model,
            CostModel::CapPlusOverage {
                fixed_amount: 0.0,
                cap: 3000.0,
                overage_rate: 0.0,
            }
        );
    }

    #[test]
    fn from_params_accepts_snake_and_camel_keys() {
        let mut params = ParamMap::new();
        params.insert("base_fee".to_string(), 40.0);
        params.insert("reducedRate".to_string(), 0.07);
        let model = CostModel::from_params(ModelKind::Hybrid, &params);
        assert_eq!(
            model,
            CostModel::Hybrid {
                base_fee: 40.0,
                reduced_rate: 0.07,
            }
        );
    }

    #[test]
    fn patched_keeps_unlisted_values() {
        let mut patch = ParamMap::new();
        patch.insert("overage_rate".to_string(), 0.2);
        let model = ModelKind::CapPlusOverage.default_params().patched(&patch);
        assert_eq!(
            model,
            CostModel::CapPlusOverage {
                fixed_amount: 500.0,
                cap: 5000.0,
                overage_rate: 0.2,
            }
        );
    }

    #[test]
    fn model_kind_parses_codes_and_names() {
        assert_eq!(ModelKind::from_arg("co").unwrap(), ModelKind::CapPlusOverage);
        assert_eq!(
            ModelKind::from_arg("Decreasing-Marginal-Rate").unwrap(),
            ModelKind::DecreasingMarginalRate
        );
        assert_eq!(ModelKind::from_arg(" PW ").unwrap(), ModelKind::PerWord);
        assert!(matches!(
            ModelKind::from_arg("tiered"),
            Err(SimError::UnknownModel(_))
        ));
    }

    #[test]
    fn every_kind_round_trips_through_default_params() {
        for kind in ModelKind::ALL {
            let model = kind.default_params();
            assert_eq!(model.kind(), *kind);
            assert_eq!(model.params().len(), kind.param_keys().len());
        }
    }

    #[test]
    fn describe_lists_params_and_bonus() {
        let config = co(500.0, 5000.0, 0.13).with_bonus(5.0);
        assert_eq!(
            config.describe(),
            "CO fixedAmount=500 cap=5000 overageRate=0.13 +5%"
        );
    }

    #[test]
    fn serializes_as_tagged_object() {
        let config = co(500.0, 5000.0, 0.13);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["model"], "cap-plus-overage");
        assert_eq!(json["fixedAmount"], 500.0);
        assert_eq!(json["bonusPercent"], 0.0);
    }

    #[traced_test]
    #[test]
    fn unknown_params_are_ignored_with_warning() {
        let mut params = ParamMap::new();
        params.insert("rate".to_string(), 0.2);
        params.insert("ceiling".to_string(), 9.0);
        let model = CostModel::from_params(ModelKind::PerWord, &params);
        assert_eq!(model, CostModel::PerWord { rate: 0.2 });
        assert!(logs_contain("Ignoring unknown pricing parameter"));
        assert!(logs_contain("ceiling"));
    }
}

