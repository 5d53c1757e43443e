//! Investment input records and their enumerations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when an input record falls outside the engine's domain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("investment amount must be a finite, non-negative number (got {0})")]
    InvalidAmount(f64),

    #[error("annual return rate must be a finite, non-negative percentage (got {0})")]
    InvalidRate(f64),

    #[error("unknown investment mode: {0}")]
    UnknownMode(String),
}

/// How the money goes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentMode {
    /// Systematic investment plan: a fixed contribution every period
    #[serde(rename = "SIP", alias = "sip")]
    Sip,
    /// One-time principal
    #[serde(alias = "lumpsum", alias = "LumpSum")]
    Lumpsum,
}

impl InvestmentMode {
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentMode::Sip => "SIP",
            InvestmentMode::Lumpsum => "Lumpsum",
        }
    }
}

impl fmt::Display for InvestmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvestmentMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(InvestmentMode::Sip),
            "lumpsum" | "lump-sum" | "one-time" => Ok(InvestmentMode::Lumpsum),
            _ => Err(InputError::UnknownMode(s.to_string())),
        }
    }
}

/// Contribution cadence for SIP mode
///
/// Deserializing or parsing an unrecognized label yields `Monthly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Frequency {
    /// Contribution periods in one year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Daily => 365,
            Frequency::Weekly => 52,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
        }
    }

    /// Parse a label, falling back to `Monthly` when it is not recognized
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "quarterly" => Frequency::Quarterly,
            other => {
                log::debug!("unrecognized frequency '{}', using Monthly", other);
                Frequency::Monthly
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Monthly
    }
}

impl From<String> for Frequency {
    fn from(label: String) -> Self {
        Frequency::from_label(&label)
    }
}

impl FromStr for Frequency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Frequency::from_label(s))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slider ranges offered by the calculator front end
///
/// Advisory only: `project` accepts anything `validate` accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLimits {
    pub min_amount: f64,
    pub max_amount: f64,
    pub amount_step: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_years: u32,
    pub max_years: u32,
}

impl InputLimits {
    pub const SIP: InputLimits = InputLimits {
        min_amount: 100.0,
        max_amount: 500_000.0,
        amount_step: 100.0,
        min_rate: 1.0,
        max_rate: 30.0,
        min_years: 1,
        max_years: 50,
    };

    pub const LUMPSUM: InputLimits = InputLimits {
        min_amount: 5_000.0,
        max_amount: 10_000_000.0,
        amount_step: 5_000.0,
        min_rate: 1.0,
        max_rate: 30.0,
        min_years: 1,
        max_years: 50,
    };

    pub fn for_mode(mode: InvestmentMode) -> Self {
        match mode {
            InvestmentMode::Sip => Self::SIP,
            InvestmentMode::Lumpsum => Self::LUMPSUM,
        }
    }
}

/// One set of projection parameters
///
/// Replaced wholesale whenever a parameter changes; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentInput {
    /// Periodic contribution (SIP) or one-time principal (Lumpsum)
    pub amount: f64,

    /// Expected return in percent per annum (12.0 = 12%)
    pub annual_return_rate: f64,

    /// Years projected
    pub horizon_years: u32,

    pub mode: InvestmentMode,

    /// Ignored in Lumpsum mode
    #[serde(default)]
    pub frequency: Frequency,
}

impl InvestmentInput {
    /// Build and validate an input record
    pub fn new(
        amount: f64,
        annual_return_rate: f64,
        horizon_years: u32,
        mode: InvestmentMode,
        frequency: Frequency,
    ) -> Result<Self, InputError> {
        let input = Self {
            amount,
            annual_return_rate,
            horizon_years,
            mode,
            frequency,
        };
        input.validate()?;
        Ok(input)
    }

    /// SIP input with the given cadence
    pub fn sip(amount: f64, annual_return_rate: f64, horizon_years: u32, frequency: Frequency) -> Result<Self, InputError> {
        Self::new(amount, annual_return_rate, horizon_years, InvestmentMode::Sip, frequency)
    }

    /// One-time investment
    pub fn lumpsum(amount: f64, annual_return_rate: f64, horizon_years: u32) -> Result<Self, InputError> {
        Self::new(amount, annual_return_rate, horizon_years, InvestmentMode::Lumpsum, Frequency::Monthly)
    }

    /// Reject negative or non-finite amounts and rates.
    ///
    /// A zero horizon is allowed and projects to an empty series.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(InputError::InvalidAmount(self.amount));
        }
        if !self.annual_return_rate.is_finite() || self.annual_return_rate < 0.0 {
            return Err(InputError::InvalidRate(self.annual_return_rate));
        }
        Ok(())
    }

    /// Whether the input sits inside the front-end slider ranges for its mode
    pub fn within_limits(&self) -> bool {
        let limits = InputLimits::for_mode(self.mode);
        (limits.min_amount..=limits.max_amount).contains(&self.amount)
            && (limits.min_rate..=limits.max_rate).contains(&self.annual_return_rate)
            && (limits.min_years..=limits.max_years).contains(&self.horizon_years)
    }

    /// Contribution periods per year; a lumpsum compounds once a year
    pub fn periods_per_year(&self) -> u32 {
        match self.mode {
            InvestmentMode::Sip => self.frequency.periods_per_year(),
            InvestmentMode::Lumpsum => 1,
        }
    }

    /// Human description of the plan, e.g. "Monthly SIP" or "One-time Lumpsum"
    pub fn plan_description(&self) -> String {
        match self.mode {
            InvestmentMode::Sip => format!("{} SIP", self.frequency.label()),
            InvestmentMode::Lumpsum => "One-time Lumpsum".to_string(),
        }
    }
}

impl Default for InvestmentInput {
    fn default() -> Self {
        Self {
            amount: 5000.0,
            annual_return_rate: 12.0,
            horizon_years: 10,
            mode: InvestmentMode::Sip,
            frequency: Frequency::Monthly,
        }
    }
}
