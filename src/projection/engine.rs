//! Core wealth projection engine
//!
//! SIP contributions are treated as an annuity-due (paid at the start of each
//! period); a lumpsum compounds annually. Figures are rounded to whole currency
//! units where they are produced, never re-rounded downstream.

use crate::investment::{InvestmentInput, InvestmentMode};
use super::series::{ProjectionResult, YearlyPoint};

/// Round to the nearest whole currency unit (halves away from zero)
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

/// Future value of `periods` contributions of `amount`, each paid at the start of a period
///
/// A zero periodic rate degenerates to plain accumulation. Growth is computed
/// through `ln_1p`/`exp_m1`, so at large magnitudes a rounded result can differ
/// by one unit from the plain `(1 + r).powf(n) - 1` form.
pub fn annuity_due_future_value(amount: f64, periodic_rate: f64, periods: f64) -> f64 {
    if periodic_rate == 0.0 {
        return amount * periods;
    }
    // (1 + r)^n - 1, stable for small r
    let growth = (periods * periodic_rate.ln_1p()).exp_m1();
    amount * growth / periodic_rate * (1.0 + periodic_rate)
}

/// Value of a single principal compounded annually for `years`
pub fn compound_future_value(principal: f64, annual_rate: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate).powf(years as f64)
}

/// Run a projection
///
/// Pure and total: any input yields a result, and identical inputs yield identical results.
pub fn project(input: &InvestmentInput) -> ProjectionResult {
    let yearly_series = match input.mode {
        InvestmentMode::Sip => project_sip(input),
        InvestmentMode::Lumpsum => project_lumpsum(input),
    };

    let total_invested = match input.mode {
        InvestmentMode::Sip => {
            let periods = input.horizon_years as f64 * input.frequency.periods_per_year() as f64;
            round_currency(input.amount * periods)
        }
        InvestmentMode::Lumpsum => round_currency(input.amount),
    };
    let total_value = yearly_series.last().map(|p| p.total_value).unwrap_or(0.0);

    ProjectionResult {
        total_invested,
        total_value,
        estimated_returns: total_value - total_invested,
        yearly_series,
    }
}

fn project_sip(input: &InvestmentInput) -> Vec<YearlyPoint> {
    let periods_per_year = input.frequency.periods_per_year();
    let periodic_rate = input.annual_return_rate / periods_per_year as f64 / 100.0;

    log::debug!(
        "SIP projection: {} x {} per year at {:.6} per period for {} years",
        input.amount, periods_per_year, periodic_rate, input.horizon_years
    );

    (1..=input.horizon_years)
        .map(|year| {
            let total_periods = year as f64 * periods_per_year as f64;
            YearlyPoint {
                year,
                invested: round_currency(input.amount * total_periods),
                total_value: round_currency(annuity_due_future_value(
                    input.amount,
                    periodic_rate,
                    total_periods,
                )),
            }
        })
        .collect()
}

fn project_lumpsum(input: &InvestmentInput) -> Vec<YearlyPoint> {
    let annual_rate = input.annual_return_rate / 100.0;

    log::debug!(
        "Lumpsum projection: {} at {:.4} for {} years",
        input.amount, annual_rate, input.horizon_years
    );

    let invested = round_currency(input.amount);
    (1..=input.horizon_years)
        .map(|year| YearlyPoint {
            year,
            invested,
            total_value: round_currency(compound_future_value(input.amount, annual_rate, year)),
        })
        .collect()
}
