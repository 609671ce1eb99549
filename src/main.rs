use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use upzone::{telemetry, AppConfig, EntitlementEngine, MarketBook, RawParcelRecord};

/// Analyze what can be built on a parcel and rank the options.
#[derive(Debug, Parser)]
#[command(name = "upzone", version, about)]
struct Cli {
    /// Path to a parcel facts JSON file (the normalized record from the
    /// data-fetch layer).
    #[arg(long)]
    facts: PathBuf,

    /// Path to the market assumptions CSV, keyed by zone family.
    #[arg(long, default_value = "data/market_assumptions.csv")]
    market: PathBuf,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw: RawParcelRecord = serde_json::from_reader(File::open(&cli.facts)?)?;
    let market = MarketBook::from_csv_path(&cli.market)?;

    let engine = EntitlementEngine::with_rounding(market, config.unit_rounding);
    let report = engine.analyze(raw)?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");
    Ok(())
}
