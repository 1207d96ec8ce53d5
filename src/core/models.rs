//! Output payloads for robot (JSON/Markdown) rendering.
//!
//! Every command produces one payload type, wrapped in a [`RobotOutput`]
//! envelope when emitted as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::analytics::{
    CostComparison, MonthlyPoint, SessionSummary, WriterRecommendation, WriterStatistics,
};
use crate::core::engine::PricedArticle;
use crate::core::pricing::{ModelKind, PricingConfig};
use crate::core::resolver::{GlobalDefaults, ScenarioOverrides, WriterOverrides};

/// Schema version stamped on every JSON envelope.
pub const SCHEMA_VERSION: &str = "pricesim.v1";

// =============================================================================
// Simulate
// =============================================================================

/// Active configuration as shown to the operator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationView {
    pub baseline: PricingConfig,
    pub simulation: PricingConfig,
    pub overrides: Vec<OverrideView>,
}

/// One writer's overrides.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideView {
    pub writer: String,
    #[serde(flatten)]
    pub scenarios: ScenarioOverrides,
}

impl ConfigurationView {
    #[must_use]
    pub fn new(defaults: &GlobalDefaults, overrides: &WriterOverrides) -> Self {
        Self {
            baseline: defaults.baseline,
            simulation: defaults.simulation,
            overrides: overrides
                .iter()
                .map(|(writer, scenarios)| OverrideView {
                    writer: writer.to_string(),
                    scenarios: scenarios.clone(),
                })
                .collect(),
        }
    }
}

/// Result of `pricesim simulate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatePayload {
    /// Source CSV path.
    pub source: String,
    pub skipped_rows: usize,
    pub configuration: ConfigurationView,
    pub summary: SessionSummary,
    pub writers: Vec<CostComparison>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_writers: Option<Vec<CostComparison>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<MonthlyPoint>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<PricedArticle>>,

    /// Filter term applied to `articles`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

// =============================================================================
// Writers
// =============================================================================

/// One writer's statistics and recommendation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterReport {
    pub writer: String,
    pub stats: WriterStatistics,
    #[serde(flatten)]
    pub recommendation: RecommendationView,
}

/// Recommendation fields without the embedded statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub profile: crate::core::analytics::WriterProfile,
    pub suggested_model: ModelKind,
    pub suggested: PricingConfig,
}

impl From<&WriterRecommendation> for WriterReport {
    fn from(rec: &WriterRecommendation) -> Self {
        Self {
            writer: rec.writer.clone(),
            stats: rec.stats,
            recommendation: RecommendationView {
                profile: rec.profile,
                suggested_model: rec.suggested_model,
                suggested: PricingConfig::new(rec.suggested),
            },
        }
    }
}

/// Result of `pricesim writers`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritersPayload {
    pub source: String,
    pub skipped_rows: usize,
    pub writers: Vec<WriterReport>,
}

// =============================================================================
// Quote
// =============================================================================

/// Result of `pricesim quote`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub word_count: u64,
    pub config: PricingConfig,
    pub base_cost: f64,
    pub cost: f64,
    /// Cost per word, 0 for an empty article.
    pub effective_rate: f64,
}

// =============================================================================
// Models
// =============================================================================

/// One cost model as listed by `pricesim models`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: ModelKind,
    pub code: &'static str,
    pub name: &'static str,
    pub params: Vec<ParamInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamInfo {
    pub name: &'static str,
    pub default: f64,
}

impl From<ModelKind> for ModelInfo {
    fn from(kind: ModelKind) -> Self {
        Self {
            id: kind,
            code: kind.code(),
            name: kind.display_name(),
            params: kind
                .default_params()
                .params()
                .into_iter()
                .map(|(name, default)| ParamInfo { name, default })
                .collect(),
        }
    }
}

// =============================================================================
// Robot Output Envelope
// =============================================================================

/// Top-level JSON envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,

    #[serde(default)]
    pub errors: Vec<String>,

    pub meta: RobotMeta,
}

/// Metadata for robot output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotMeta {
    pub format: String,
    pub flags: Vec<String>,
    pub runtime: String,
}

impl<T> RobotOutput<T> {
    /// Create a new robot output envelope.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self::with_errors(command, data, Vec::new())
    }

    /// Create with errors (warnings that did not abort the command).
    pub fn with_errors(command: impl Into<String>, data: T, errors: Vec<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
            errors,
            meta: RobotMeta {
                format: "json".to_string(),
                flags: Vec::new(),
                runtime: "cli".to_string(),
            },
        }
    }
}
