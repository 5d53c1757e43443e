//! Wealth projection engine and derived analytics

mod engine;
mod series;
mod irr;

pub use engine::{project, round_currency, annuity_due_future_value, compound_future_value};
pub use series::{YearlyPoint, ProjectionResult, ProjectionSummary};
pub use irr::{calculate_irr, annualized_return, projection_cashflows};
