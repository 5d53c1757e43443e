//! Wealth Projection CLI
//!
//! Projects a single SIP or lumpsum plan and prints the yearly growth table

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use wealth_projection::{
    format_currency,
    insight::{request_insight, GeminiConfig, GeminiInsightProvider},
    projection::annualized_return,
    project, Frequency, InvestmentInput, InvestmentMode,
};

#[derive(Debug, Parser)]
#[command(name = "wealth-projection", version, about = "Project SIP or lumpsum investment growth")]
struct Args {
    /// Periodic contribution (SIP) or one-time principal (Lumpsum)
    #[arg(short, long, default_value_t = 5000.0)]
    amount: f64,

    /// Expected annual return, in percent
    #[arg(short, long, default_value_t = 12.0)]
    rate: f64,

    /// Investment horizon in years
    #[arg(short, long, default_value_t = 10)]
    years: u32,

    /// SIP or Lumpsum
    #[arg(short, long, default_value = "SIP")]
    mode: InvestmentMode,

    /// Daily, Weekly, Monthly or Quarterly (SIP only; unknown values mean Monthly)
    #[arg(short, long, default_value = "Monthly")]
    frequency: Frequency,

    /// Write the yearly series to CSV (default name is dated)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    csv: Option<Option<PathBuf>>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Ask the Gemini advisor for commentary (needs GEMINI_API_KEY)
    #[arg(long)]
    insight: bool,
}

fn default_report_path(mode: InvestmentMode) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    PathBuf::from(format!("wealth_{}_projection_{}.csv", mode.label().to_lowercase(), date))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = InvestmentInput::new(args.amount, args.rate, args.years, args.mode, args.frequency)
        .context("Invalid investment parameters")?;
    if !input.within_limits() {
        log::warn!("inputs fall outside the usual calculator ranges");
    }

    let result = project(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Wealth Projection: {} of {}", input.plan_description(), format_currency(input.amount));
        println!("  Return: {}% p.a. over {} years\n", input.annual_return_rate, input.horizon_years);

        println!("{:>4} {:>18} {:>18} {:>18}", "Year", "Invested", "Total Value", "Returns");
        println!("{}", "-".repeat(61));
        for point in &result.yearly_series {
            println!(
                "{:>4} {:>18} {:>18} {:>18}",
                point.year,
                format_currency(point.invested),
                format_currency(point.total_value),
                format_currency(point.estimated_returns()),
            );
        }

        let summary = result.summary();
        println!("\nSummary:");
        println!("  Total Invested:    {}", format_currency(summary.total_invested));
        println!("  Estimated Returns: {}", format_currency(summary.estimated_returns));
        println!("  Total Value:       {}", format_currency(summary.total_value));
        if let Some(multiple) = summary.wealth_multiple {
            println!("  Wealth Multiple:   {:.2}x", multiple);
        }
        if let Some(irr) = annualized_return(&input, &result) {
            println!("  Annualized Return: {:.2}%", irr * 100.0);
        }
    }

    if let Some(path) = args.csv {
        let path = path.unwrap_or_else(|| default_report_path(input.mode));
        let file = File::create(&path).with_context(|| format!("Unable to create {}", path.display()))?;
        result
            .write_csv(file)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        println!("\nYearly series written to: {}", path.display());
    }

    if args.insight {
        let provider = GeminiInsightProvider::new(GeminiConfig::from_env())?;
        match request_insight(&provider, &input, &result).await {
            Ok(insight) => {
                println!("\nAdvisor Insight:");
                println!("  Analysis: {}", insight.analysis);
                println!("  Pro Tip:  {}", insight.pro_tip);
                println!("  Warning:  {}", insight.warning);
            }
            Err(e) => println!("\n{}", e),
        }
    }

    Ok(())
}
