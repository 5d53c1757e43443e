//! Run projections for every scenario in a CSV file
//!
//! Writes one summary row per scenario for side-by-side comparison

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use wealth_projection::{
    investment::{load_scenarios, DEFAULT_SCENARIOS_PATH},
    projection::annualized_return,
    InvestmentMode, ScenarioRunner,
};

#[derive(Debug, Parser)]
#[command(name = "run_scenarios", about = "Batch-project investment scenarios from CSV")]
struct Args {
    /// Scenario CSV: Amount,AnnualReturnRate,HorizonYears,Mode,Frequency
    #[arg(default_value = DEFAULT_SCENARIOS_PATH)]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(short, long, default_value = "scenario_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let inputs = load_scenarios(&args.input)
        .with_context(|| format!("Failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", inputs.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&inputs);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writer.write_record([
        "Scenario",
        "Mode",
        "Frequency",
        "Amount",
        "AnnualReturnRate",
        "HorizonYears",
        "TotalInvested",
        "TotalValue",
        "EstimatedReturns",
        "WealthMultiple",
        "AnnualizedReturnPct",
    ])?;

    for (idx, (input, result)) in inputs.iter().zip(&results).enumerate() {
        let summary = result.summary();
        let frequency = match input.mode {
            InvestmentMode::Sip => input.frequency.label(),
            InvestmentMode::Lumpsum => "",
        };
        writer.write_record(&[
            (idx + 1).to_string(),
            input.mode.label().to_string(),
            frequency.to_string(),
            input.amount.to_string(),
            input.annual_return_rate.to_string(),
            input.horizon_years.to_string(),
            format!("{:.0}", summary.total_invested),
            format!("{:.0}", summary.total_value),
            format!("{:.0}", summary.estimated_returns),
            summary.wealth_multiple.map(|m| format!("{:.4}", m)).unwrap_or_default(),
            annualized_return(input, result)
                .map(|r| format!("{:.4}", r * 100.0))
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
