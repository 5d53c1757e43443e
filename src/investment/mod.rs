//! Investment inputs and scenario loading

mod data;
pub mod loader;

pub use data::{InvestmentInput, InvestmentMode, Frequency, InputLimits, InputError};
pub use loader::{load_scenarios, load_scenarios_from_reader, load_default_scenarios, LoadError, DEFAULT_SCENARIOS_PATH};
