//! pricesim - Writer Pricing Simulator
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use pricesim::cli::{Cli, Commands, OutputFormat};
use pricesim::core::logging;
use pricesim::render::RenderOptions;
use pricesim::storage::config::{Config, ResolvedConfig};
use pricesim::util::env::{Stream, color_allowed};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(logging::parse_log_level_from_env)
        .unwrap_or_default();
    let log_format = if cli.json_output {
        logging::LogFormat::Json
    } else {
        logging::parse_log_format_from_env().unwrap_or_default()
    };
    let log_file = logging::parse_log_file_from_env();
    logging::init(log_level, log_format, log_file, cli.verbose);

    let mut format = cli.effective_format();
    let mut no_color = cli.no_color;
    let mut pretty = cli.pretty;

    let result = load_settings(&cli).and_then(|(config, resolved)| {
        format = resolved.format;
        no_color = resolved.no_color;
        pretty = resolved.pretty;
        run(cli, &config, resolved)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), "{}", e);
            let error_output =
                pricesim::render::error::render_error_full(&e, format, no_color, pretty);
            eprintln!("{error_output}");
            ExitCode::from(i32::from(e.exit_code()) as u8)
        }
    }
}

fn load_settings(cli: &Cli) -> pricesim::Result<(Config, ResolvedConfig)> {
    let config = Config::load_for(cli.config.as_deref())?;
    config.validate()?;
    let resolved = ResolvedConfig::resolve(cli, &config)?;
    Ok((config, resolved))
}

fn run(cli: Cli, config: &Config, resolved: ResolvedConfig) -> pricesim::Result<()> {
    let no_color = resolved.no_color
        || (resolved.format == OutputFormat::Human
            && !color_allowed(Stream::Stdout, resolved.no_color));
    let opts = RenderOptions {
        format: resolved.format,
        pretty: resolved.pretty,
        no_color,
        currency: resolved.currency,
    };

    match cli.command {
        None => {
            print_quickstart();
            Ok(())
        }

        Some(Commands::Simulate(args)) => pricesim::cli::simulate::execute(&args, config, &opts),

        Some(Commands::Writers(args)) => pricesim::cli::writers::execute(&args, &opts),

        Some(Commands::Quote(args)) => pricesim::cli::quote::execute(&args, config, &opts),

        Some(Commands::Models) => pricesim::cli::models::execute(&opts),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "pricesim", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Print quickstart help when no command is given.
fn print_quickstart() {
    println!(
        r#"pricesim - Writer Pricing Simulator

Compare what your writers cost today with a proposed pricing model.

USAGE:
    pricesim [OPTIONS] <COMMAND>

COMMANDS:
    simulate        Price every article under both scenarios and compare
    writers         Show per-writer statistics and recommended models
    quote           Price a single word count
    models          List cost models and their default parameters
    completions     Generate shell completions

QUICK START:
    pricesim simulate articles.csv                  # Optimize preset (cap + overage)
    pricesim simulate articles.csv --strategy quality
    pricesim simulate articles.csv --model DMR --param threshold=1500
    pricesim simulate articles.csv --recommend      # Per-writer suggested models
    pricesim writers articles.csv                   # Writer profiles
    pricesim quote --words 1200 --model HY

ROBOT MODE (for AI agents):
    pricesim simulate articles.csv --json           # JSON output
    pricesim simulate articles.csv --format md      # Markdown output

For more help: pricesim --help
"#
    );
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
}
