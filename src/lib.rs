//! Wealth Projection - growth curves for SIP and lumpsum investments
//!
//! This library provides:
//! - Year-by-year projections for periodic (SIP) and one-time investments
//! - Summary totals, wealth multiple and annualized return
//! - Rupee formatting with lakh/crore grouping
//! - Batch scenario runs
//! - Optional narrative insights from an external text model

pub mod investment;
pub mod projection;
pub mod format;
pub mod insight;
pub mod scenario;

// Re-export commonly used types
pub use investment::{InvestmentInput, InvestmentMode, Frequency, InputError};
pub use projection::{project, ProjectionResult, YearlyPoint, ProjectionSummary};
pub use format::format_currency;
pub use insight::{Insight, InsightProvider, InsightUnavailable, request_insight};
pub use scenario::ScenarioRunner;
