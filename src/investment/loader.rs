//! Load batches of investment scenarios from CSV
//!
//! Expected columns: `Amount,AnnualReturnRate,HorizonYears,Mode,Frequency`.
//! `Frequency` may be left blank for lumpsum rows.

use super::{Frequency, InputError, InvestmentInput, InvestmentMode};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Default scenario file, relative to the working directory
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenarios: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid scenario on row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: InputError,
    },
}

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "AnnualReturnRate")]
    annual_return_rate: f64,
    #[serde(rename = "HorizonYears")]
    horizon_years: u32,
    #[serde(rename = "Mode")]
    mode: String,
    #[serde(rename = "Frequency", default)]
    frequency: String,
}

impl CsvRow {
    fn to_input(self) -> Result<InvestmentInput, InputError> {
        let mode: InvestmentMode = self.mode.parse()?;
        let frequency = Frequency::from_label(&self.frequency);
        InvestmentInput::new(
            self.amount,
            self.annual_return_rate,
            self.horizon_years,
            mode,
            frequency,
        )
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<InvestmentInput>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<InvestmentInput>, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

/// Load scenarios from `data/scenarios.csv`
pub fn load_default_scenarios() -> Result<Vec<InvestmentInput>, LoadError> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<InvestmentInput>, LoadError> {
    let mut inputs = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Row numbers count the header as row 1
        let input = row
            .to_input()
            .map_err(|source| LoadError::InvalidRow { row: idx + 2, source })?;
        inputs.push(input);
    }

    Ok(inputs)
}
