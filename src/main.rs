use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chunkweave::{
    fetch_size, load_json, no_hooks, ConfigError, FetchError, InjectConfig, InjectionLedger,
    Interleaver, Post, ReportRow, Scenario, SimulationReport,
};

mod cli;
use cli::display;
use cli::{Cli, Commands};

/// Log filter variable, e.g. `CHUNKWEAVE_LOG=chunkweave=debug`.
const LOG_ENV: &str = "CHUNKWEAVE_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Merge {
            primary,
            secondary,
            before_each,
            per_inject,
            json,
        } => run_merge(&primary, &secondary, InjectConfig::new(before_each, per_inject), json),
        Commands::Plan {
            page_size,
            before_each,
            per_inject,
        } => {
            run_plan(page_size, InjectConfig::new(before_each, per_inject));
            Ok(())
        }
        Commands::Simulate { input, json } => run_simulate(&input, json),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_merge(
    primary_path: &str,
    secondary_path: &str,
    config: InjectConfig,
    json: bool,
) -> Result<(), CliError> {
    let primary: Vec<Post> = load_json(primary_path)?;
    let secondary: Vec<Post> = load_json(secondary_path)?;
    debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        "loaded merge inputs"
    );

    let mut interleaver = Interleaver::new(no_hooks());
    interleaver.set_configuration(config);
    interleaver.set_secondary_items(secondary);

    let mut ledger = InjectionLedger::new();
    let result = interleaver.inject(primary, &mut ledger);

    let report = SimulationReport {
        rows: result
            .items
            .into_iter()
            .enumerate()
            .map(|(position, post)| ReportRow {
                post,
                injector: ledger.injector_at(position),
            })
            .collect(),
        registered: vec![interleaver.id()],
        refused: Vec::new(),
    };
    emit(&report, "MERGE", json)
}

fn run_plan(page_size: usize, config: InjectConfig) {
    let fetch = fetch_size(&config, Some(page_size)).unwrap_or(0);
    display::print_plan(page_size, config.before_each_inject, config.per_inject, fetch);
}

fn run_simulate(input: &str, json: bool) -> Result<(), CliError> {
    let scenario = Scenario::load(input)?;
    let report = scenario.run()?;
    emit(&report, "SIMULATE", json)
}

fn emit(report: &SimulationReport, label: &str, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        display::print_report(label, report);
    }
    Ok(())
}
