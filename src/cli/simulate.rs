//! Simulate command implementation.

use indexmap::IndexMap;

use crate::cli::args::SimulateArgs;
use crate::core::analytics::{self, WriterStatistics};
use crate::core::models::{ConfigurationView, SimulatePayload};
use crate::core::pricing::PricingConfig;
use crate::core::resolver::{GlobalDefaults, Scenario, WriterOverrides};
use crate::core::session::Session;
use crate::core::strategy::{Strategy, WizardSelection, build_configuration, check_bonus};
use crate::error::Result;
use crate::render::{self, RenderOptions};
use crate::storage::config::Config;

/// Execute the simulate command.
///
/// # Errors
///
/// Import failures, invalid flags or config, and render failures.
pub fn execute(args: &SimulateArgs, config: &Config, opts: &RenderOptions) -> Result<()> {
    let mut session = Session::default();
    let skipped = session.import_path(&args.csv)?;

    let (defaults, overrides) = assemble_configuration(args, config, &session.statistics())?;
    for writer in overrides.writers() {
        if !session.writers().iter().any(|w| w == writer) {
            tracing::warn!(writer, "Override names a writer not present in the CSV");
        }
    }
    session.apply_configuration(defaults, overrides);

    let payload = build_payload(&session, args, skipped);
    let output = render::render_simulate(&payload, opts)?;
    render::emit(&output)
}

/// Merge command-line choices with the config file into a configuration.
///
/// The simulation default comes from `--strategy`/`--model` when either is
/// given, else from `[pricing.simulation]`, else from the optimize preset.
/// `--param` and `--bonus` patch whichever default wins. Overrides from the
/// config file take precedence over recommended ones.
///
/// # Errors
///
/// Invalid flags (`UnknownModel`, `InvalidParam`, a negative bonus, an
/// unknown strategy) and invalid pricing tables in the config file.
pub fn assemble_configuration(
    args: &SimulateArgs,
    config: &Config,
    stats: &IndexMap<String, WriterStatistics>,
) -> Result<(GlobalDefaults, WriterOverrides)> {
    let strategy = args
        .strategy
        .as_deref()
        .map(Strategy::from_arg)
        .transpose()?
        .unwrap_or_default();
    let params = args.pricing.param_map()?;
    let file_simulation = if args.selects_simulation() {
        None
    } else {
        config.simulation()?
    };

    let selection = WizardSelection {
        strategy,
        model: args.pricing.model_kind()?,
        params: params.clone(),
        bonus_percent: args
            .pricing
            .bonus
            .or_else(|| file_simulation.map(|c| c.bonus_percent)),
        recommend_overrides: args.recommend,
    };
    let (mut defaults, mut overrides) = build_configuration(&selection, stats)?;

    if let Some(simulation) = file_simulation {
        let bonus = check_bonus(args.pricing.bonus.unwrap_or(simulation.bonus_percent))?;
        defaults.simulation =
            PricingConfig::new(simulation.model.patched(&params)).with_bonus(bonus);
    }
    if let Some(baseline) = config.baseline()? {
        defaults.baseline = baseline;
    }

    for (writer, scenarios) in config.writer_overrides()?.iter() {
        for &scenario in Scenario::ALL {
            if let Some(&c) = scenarios.get(scenario) {
                overrides.set(writer, scenario, c);
            }
        }
    }

    tracing::debug!(
        baseline = %defaults.baseline.describe(),
        simulation = %defaults.simulation.describe(),
        overrides = overrides.len(),
        "Assembled configuration"
    );
    Ok((defaults, overrides))
}

fn build_payload(session: &Session, args: &SimulateArgs, skipped: usize) -> SimulatePayload {
    let priced = session.priced();

    let articles = args.shows_articles().then(|| match &args.filter {
        Some(term) => analytics::filter_articles(&priced, term)
            .into_iter()
            .cloned()
            .collect(),
        None => priced.clone(),
    });

    SimulatePayload {
        source: args.csv.display().to_string(),
        skipped_rows: skipped,
        configuration: ConfigurationView::new(session.defaults(), session.overrides()),
        summary: analytics::summarize(&priced),
        writers: analytics::comparisons(&priced),
        top_writers: args.top.map(|n| analytics::top_writers_by_cost(&priced, n)),
        trend: args
            .trend
            .then(|| analytics::monthly_trend(session.articles())),
        articles,
        filter: args.filter.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::PricingArgs;
    use crate::core::analytics::statistics_by_writer;
    use crate::core::pricing::{CostModel, ModelKind};
    use crate::core::strategy::historical_baseline;
    use crate::test_utils::make_test_article;
    use std::path::PathBuf;

    fn args() -> SimulateArgs {
        SimulateArgs {
            csv: PathBuf::from("articles.csv"),
            strategy: None,
            pricing: PricingArgs::default(),
            recommend: false,
            articles: false,
            filter: None,
            top: None,
            trend: false,
        }
    }

    fn config(toml_src: &str) -> Config {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn defaults_to_optimize_preset() {
        let (defaults, overrides) =
            assemble_configuration(&args(), &Config::default(), &IndexMap::new()).unwrap();
        assert_eq!(defaults.baseline, historical_baseline());
        assert_eq!(defaults.simulation.model.kind(), ModelKind::CapPlusOverage);
        assert!(overrides.is_empty());
    }

    #[test]
    fn config_simulation_used_without_model_flag() {
        let cfg = config(
            r#"
[pricing.simulation]
model = "FP"
bonus_percent = 3.0
params = { fixed_amount = 200.0 }
"#,
        );
        let (defaults, _) = assemble_configuration(&args(), &cfg, &IndexMap::new()).unwrap();
        assert_eq!(
            defaults.simulation.model,
            CostModel::FixedPrice {
                fixed_amount: 200.0
            }
        );
        assert!((defaults.simulation.bonus_percent - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_flag_patches_config_simulation() {
        let cfg = config(
            r#"
[pricing.simulation]
model = "FP"
params = { fixed_amount = 200.0 }
"#,
        );
        let mut a = args();
        a.pricing.params = vec!["fixed_amount=250".to_string()];
        a.pricing.bonus = Some(10.0);
        let (defaults, _) = assemble_configuration(&a, &cfg, &IndexMap::new()).unwrap();
        assert_eq!(
            defaults.simulation.model,
            CostModel::FixedPrice {
                fixed_amount: 250.0
            }
        );
        assert!((defaults.simulation.bonus_percent - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn model_flag_beats_config_simulation() {
        let cfg = config(
            r#"
[pricing.simulation]
model = "FP"
"#,
        );
        let mut a = args();
        a.pricing.model = Some("HY".to_string());
        let (defaults, _) = assemble_configuration(&a, &cfg, &IndexMap::new()).unwrap();
        assert_eq!(defaults.simulation.model.kind(), ModelKind::Hybrid);
    }

    #[test]
    fn config_baseline_replaces_historical() {
        let cfg = config(
            r#"
[pricing.baseline]
model = "PW"
params = { rate = 0.10 }
"#,
        );
        let (defaults, _) = assemble_configuration(&args(), &cfg, &IndexMap::new()).unwrap();
        assert_eq!(defaults.baseline.model, CostModel::PerWord { rate: 0.10 });
    }

    #[test]
    fn config_override_beats_recommended() {
        let articles = vec![
            make_test_article("Alice", 1000),
            make_test_article("Alice", 1000),
            make_test_article("Bob", 100),
            make_test_article("Bob", 3000),
        ];
        let cfg = config(
            r#"
[overrides.Alice.simulation]
model = "FP"
params = { fixed_amount = 90.0 }
"#,
        );
        let mut a = args();
        a.recommend = true;
        let (_, overrides) =
            assemble_configuration(&a, &cfg, &statistics_by_writer(&articles)).unwrap();

        let alice = overrides.get("Alice").unwrap().simulation.unwrap();
        assert_eq!(
            alice.model,
            CostModel::FixedPrice {
                fixed_amount: 90.0
            }
        );
        let bob = overrides.get("Bob").unwrap().simulation.unwrap();
        assert_eq!(bob.model.kind(), ModelKind::PerWord);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let mut a = args();
        a.strategy = Some("cheapest".to_string());
        assert!(assemble_configuration(&a, &Config::default(), &IndexMap::new()).is_err());
    }

    #[test]
    fn negative_bonus_flag_is_rejected_with_config_simulation() {
        let cfg = config(
            r#"
[pricing.simulation]
model = "FP"
"#,
        );
        let mut a = args();
        a.pricing.bonus = Some(-5.0);
        assert!(assemble_configuration(&a, &cfg, &IndexMap::new()).is_err());
    }
}
