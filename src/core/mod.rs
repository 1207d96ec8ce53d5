//! Core pricing model, analytics, and session state.

pub mod analytics;
pub mod engine;
pub mod import;
pub mod logging;
pub mod models;
pub mod pricing;
pub mod resolver;
pub mod session;
pub mod stats;
pub mod strategy;

pub use analytics::{
    CostComparison, MonthlyPoint, SessionSummary, WriterProfile, WriterRecommendation,
    WriterStatistics, aggregate_comparison, classify_writer, smart_defaults,
    statistics_by_writer,
};
pub use engine::{Article, PricedArticle, price_all};
pub use import::{ImportReport, import_articles, import_articles_from_path};
pub use models::{
    ModelInfo, QuotePayload, RobotOutput, SimulatePayload, WriterReport, WritersPayload,
};
pub use pricing::{CostModel, ModelKind, ParamMap, PricingConfig, compute_cost};
pub use resolver::{GlobalDefaults, Scenario, ScenarioOverrides, WriterOverrides, resolve};
pub use session::Session;
pub use strategy::{Strategy, WizardSelection, build_configuration};
