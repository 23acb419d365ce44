//! Liver Simulator X - Entry point
//!
//! Runs one scenario preset and prints its diagnostics.
//!
//! CLI Usage:
//!   cargo run                              # Baseline, 200 steps
//!   cargo run -- --scenario dka            # DKA over its default 24 h
//!   cargo run -- -s nafld -n 600 --csv     # NAFLD, 10 h, CSV export
//!   cargo run -- -s normal --perfused      # Normal with oxygen supply

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Result};
use liver_simulator_x::{
    export::{export_history_csv, export_history_json},
    EngineParameters, HepaticEngine, ScenarioRegistry,
};

/// Parsed command line
struct CliArgs {
    scenario: String,
    ticks: Option<usize>,
    csv: bool,
    json: bool,
    perfused: bool,
    config_dir: Option<PathBuf>,
}

/// Parse CLI arguments
fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario: "baseline".to_string(),
        ticks: None,
        csv: false,
        json: false,
        perfused: false,
        config_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" | "-s" => {
                i += 1;
                if i < args.len() {
                    cli.scenario = args[i].clone();
                }
            }
            "-n" | "--ticks" => {
                i += 1;
                if i < args.len() {
                    cli.ticks = args[i].parse().ok();
                }
            }
            "--csv" => cli.csv = true,
            "--json" => cli.json = true,
            "--perfused" => cli.perfused = true,
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    cli.config_dir = Some(PathBuf::from(&args[i]));
                }
            }
            "--list" | "-l" => {
                println!("Available scenarios:");
                for name in ScenarioRegistry::list_presets() {
                    println!();
                    println!("[{}]", name);
                    if let Some(help) = ScenarioRegistry::help(name) {
                        println!("{}", help);
                    }
                }
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Liver Simulator X");
                println!();
                println!("Usage: liver-simulator-x [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --scenario NAME  Scenario preset (default: baseline)");
                println!("  -n, --ticks N        Number of ticks (default: scenario's own)");
                println!("  -c, --config DIR     Parameter directory (default: data/parameters)");
                println!("  --csv                Export history as CSV to exports/");
                println!("  --json               Export history as JSON to exports/");
                println!("  --perfused           Enable oxygen perfusion and basal ATP turnover");
                println!("  -l, --list           List scenario presets");
                println!("  --help, -h           Show this help");
                std::process::exit(0);
            }
            other => log::warn!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    cli
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = parse_args();

    let scenario = ScenarioRegistry::create(&cli.scenario).ok_or_else(|| {
        anyhow!(
            "unknown scenario '{}' (available: {})",
            cli.scenario,
            ScenarioRegistry::list_presets().join(", ")
        )
    })?;
    let ticks = cli.ticks.unwrap_or_else(|| scenario.default_ticks());

    let mut params = match &cli.config_dir {
        Some(dir) => EngineParameters::load_from_dir(dir),
        None => EngineParameters::load_or_default(),
    };
    if cli.perfused {
        params.exchange.enabled = true;
    }

    println!("=== Liver Simulator X ===");
    println!("{}", scenario.description());
    println!(
        "Ticks: {} ({:.1} {})",
        ticks,
        scenario.time_at(ticks),
        scenario.tick_unit().label()
    );
    println!();

    let mut engine = HepaticEngine::new(params);
    let start = Instant::now();
    let history = engine.run(scenario.as_ref(), ticks)?;
    let elapsed = start.elapsed();

    scenario.diagnostics(&history).print_summary();
    println!();
    println!("Elapsed: {:.2?} ({} records)", elapsed, history.len());

    if cli.csv {
        let path = export_history_csv(&history, scenario.name())?;
        println!("CSV written to {}", path.display());
    }
    if cli.json {
        let path = export_history_json(&history, scenario.name())?;
        println!("JSON written to {}", path.display());
    }

    Ok(())
}
