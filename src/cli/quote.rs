//! Quote command implementation.

use crate::cli::args::QuoteArgs;
use crate::core::models::QuotePayload;
use crate::core::pricing::{PricingConfig, compute_cost};
use crate::core::strategy::{check_bonus, historical_baseline};
use crate::error::Result;
use crate::render::{self, RenderOptions};
use crate::storage::config::Config;

/// Execute the quote command.
///
/// # Errors
///
/// Invalid flags or config and render failures.
pub fn execute(args: &QuoteArgs, config: &Config, opts: &RenderOptions) -> Result<()> {
    let pricing = quote_config(args, config)?;
    let payload = quote(args.words, pricing);
    let output = render::render_quote(&payload, opts)?;
    render::emit(&output)
}

/// Pricing for a quote: `--model`, else the configured simulation, else
/// the historical baseline. `--param` and `--bonus` patch the result.
///
/// # Errors
///
/// `UnknownModel`, `InvalidParam`, or a negative bonus.
pub fn quote_config(args: &QuoteArgs, config: &Config) -> Result<PricingConfig> {
    let params = args.pricing.param_map()?;
    let start = match args.pricing.model_kind()? {
        Some(kind) => PricingConfig::new(kind.default_params()),
        None => config.simulation()?.unwrap_or_else(historical_baseline),
    };
    let bonus = check_bonus(args.pricing.bonus.unwrap_or(start.bonus_percent))?;
    Ok(PricingConfig::new(start.model.patched(&params)).with_bonus(bonus))
}

/// Price one word count.
#[must_use]
pub fn quote(word_count: u64, config: PricingConfig) -> QuotePayload {
    let cost = compute_cost(word_count, &config);
    let effective_rate = if word_count == 0 {
        0.0
    } else {
        cost / word_count as f64
    };
    QuotePayload {
        word_count,
        config,
        base_cost: config.model.base_cost(word_count),
        cost,
        effective_rate,
    }
}
