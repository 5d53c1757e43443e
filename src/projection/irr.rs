//! Money-weighted annual return of a projection
//!
//! Treats every contribution as an outflow and the final projected value as the
//! single inflow, then solves for the internal rate of return.

use crate::investment::{InvestmentInput, InvestmentMode};
use super::series::ProjectionResult;

/// Calculate the Internal Rate of Return (IRR) for a series of cash flows
/// using the Newton-Raphson method.
///
/// # Arguments
/// * `cashflows` - Cash flow per period (positive = inflow, negative = outflow)
/// * `periods_per_year` - Number of periods per year (12 for monthly)
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (e.g., 0.12 for 12%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    calculate_irr_from(cashflows, periods_per_year, 0.05 / periods_per_year as f64)
}

/// Same as [`calculate_irr`], starting Newton-Raphson from `periodic_guess`
pub fn calculate_irr_from(cashflows: &[f64], periods_per_year: u32, periodic_guess: f64) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // An IRR needs at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = periodic_guess.clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);
    let tolerance = 1e-12;
    let max_iterations = 200;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        // Long vectors overflow far from the root
        if !npv.is_finite() || !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            break;
        }

        // Leaving the search range means Newton has lost the root
        let new_rate = rate - npv / dnpv;
        if !(MIN_PERIODIC_RATE..MAX_PERIODIC_RATE).contains(&new_rate) {
            break;
        }

        if (new_rate - rate).abs() < tolerance {
            return Some(annualize(new_rate, periods_per_year));
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows, periods_per_year)
}

const MIN_PERIODIC_RATE: f64 = -0.99;
const MAX_PERIODIC_RATE: f64 = 10.0;

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;
    let mut discount = 1.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        // discount = (1 + rate)^-t
        npv += cf * discount;
        dnpv -= t as f64 * cf * discount / (1.0 + rate);
        discount /= 1.0 + rate;
    }

    (npv, dnpv)
}

/// Fallback: bracket a sign change around zero, then bisect
fn calculate_irr_bisection(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let (mut low, mut high) = bracket_root(cashflows)?;
    let tolerance = 1e-12;
    let max_iterations = 1000;

    let mut npv_low = npv_at_rate(cashflows, low);
    if npv_low == 0.0 {
        return Some(annualize(low, periods_per_year));
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);
        if !npv_mid.is_finite() {
            return None;
        }

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid.signum() != npv_low.signum() {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Widen outward from a zero rate until NPV changes sign
///
/// Returns `(low, high)` with opposite-signed, finite NPVs at both ends.
fn bracket_root(cashflows: &[f64]) -> Option<(f64, f64)> {
    let npv_zero = npv_at_rate(cashflows, 0.0);
    if !npv_zero.is_finite() {
        return None;
    }
    if npv_zero == 0.0 {
        return Some((0.0, 0.0));
    }

    let mut upper = 0.0;
    let mut lower = 0.0;
    let mut step: f64 = 1e-6;
    let mut upper_open = true;
    let mut lower_open = true;

    while upper_open || lower_open {
        if upper_open {
            let rate = step.min(MAX_PERIODIC_RATE);
            let npv = npv_at_rate(cashflows, rate);
            if !npv.is_finite() || rate >= MAX_PERIODIC_RATE {
                upper_open = false;
            }
            if npv.is_finite() && npv.signum() != npv_zero.signum() {
                return Some((upper, rate));
            }
            upper = rate;
        }
        if lower_open {
            let rate = (-step).max(MIN_PERIODIC_RATE);
            let npv = npv_at_rate(cashflows, rate);
            if !npv.is_finite() || rate <= MIN_PERIODIC_RATE {
                lower_open = false;
            }
            if npv.is_finite() && npv.signum() != npv_zero.signum() {
                return Some((rate, lower));
            }
            lower = rate;
        }
        step *= 2.0;
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    let mut discount = 1.0;
    let mut npv = 0.0;
    for &cf in cashflows {
        npv += cf * discount;
        discount /= 1.0 + rate;
    }
    npv
}

/// Contribution cashflows of a projection, one entry per period
///
/// SIP pays `amount` at the start of every period; a lumpsum pays once at t=0.
/// The final projected value arrives at the end of the last period.
pub fn projection_cashflows(input: &InvestmentInput, result: &ProjectionResult) -> Vec<f64> {
    let periods = input.horizon_years as usize * input.periods_per_year() as usize;
    if periods == 0 {
        return Vec::new();
    }

    let mut cashflows = vec![0.0; periods + 1];
    match input.mode {
        InvestmentMode::Sip => cashflows[..periods].fill(-input.amount),
        InvestmentMode::Lumpsum => cashflows[0] = -input.amount,
    }
    cashflows[periods] += result.total_value;
    cashflows
}

/// Annualized money-weighted return of a projection
///
/// `None` for an empty projection or when nothing was invested. For a SIP this
/// recovers the effective annual rate `(1 + r)^n - 1` up to rounding of the
/// final value.
pub fn annualized_return(input: &InvestmentInput, result: &ProjectionResult) -> Option<f64> {
    if result.yearly_series.is_empty() || result.total_invested <= 0.0 {
        return None;
    }
    let periods_per_year = input.periods_per_year();
    // The contract rate is the root whenever the final value is the projected one
    let guess = input.annual_return_rate / periods_per_year as f64 / 100.0;
    calculate_irr_from(&projection_cashflows(input, result), periods_per_year, guess)
}
