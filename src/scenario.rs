//! Scenario runner for batch projections
//!
//! Projects many inputs at once, for comparison tables and what-if grids.

use crate::investment::{Frequency, InvestmentInput};
use crate::projection::{project, ProjectionResult};
use rayon::prelude::*;

/// Batch projection runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = InvestmentInput::default();
/// let results = runner.rate_sweep(&base, &[8.0, 10.0, 12.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Run batches on the rayon pool
    parallel: bool,
}

impl ScenarioRunner {
    /// Runner that projects batches in parallel
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Runner that projects batches on the calling thread
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Run a single projection
    pub fn run(&self, input: &InvestmentInput) -> ProjectionResult {
        project(input)
    }

    /// Run projections for many inputs; output order matches input order
    pub fn run_batch(&self, inputs: &[InvestmentInput]) -> Vec<ProjectionResult> {
        log::info!("Projecting {} scenarios", inputs.len());

        if self.parallel {
            inputs.par_iter().map(project).collect()
        } else {
            inputs.iter().map(project).collect()
        }
    }

    /// Same plan at several annual return rates
    pub fn rate_sweep(&self, base: &InvestmentInput, rates: &[f64]) -> Vec<ProjectionResult> {
        let inputs: Vec<_> = rates
            .iter()
            .map(|&annual_return_rate| InvestmentInput { annual_return_rate, ..*base })
            .collect();
        self.run_batch(&inputs)
    }

    /// Same SIP at every contribution frequency, keeping the amount per period fixed
    pub fn frequency_sweep(&self, base: &InvestmentInput) -> Vec<(Frequency, ProjectionResult)> {
        let frequencies = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly, Frequency::Quarterly];
        let inputs: Vec<_> = frequencies
            .iter()
            .map(|&frequency| InvestmentInput { frequency, ..*base })
            .collect();
        frequencies.into_iter().zip(self.run_batch(&inputs)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();
        let base = InvestmentInput::default();

        let results = runner.rate_sweep(&base, &[8.0, 10.0, 12.0]);
        assert_eq!(results.len(), 3);

        // Higher return rate should result in higher final value
        assert!(results[2].total_value > results[0].total_value);
        assert_eq!(results[2], project(&base));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs: Vec<_> = (1..=40)
            .map(|years| InvestmentInput::sip(1_500.0, 11.0, years, Frequency::Weekly).unwrap())
            .collect();

        let parallel = ScenarioRunner::new().run_batch(&inputs);
        let sequential = ScenarioRunner::sequential().run_batch(&inputs);
        assert_eq!(parallel, sequential);

        for (input, result) in inputs.iter().zip(&parallel) {
            assert_eq!(result.yearly_series.len() as u32, input.horizon_years);
        }
    }

    #[test]
    fn test_frequency_sweep() {
        let base = InvestmentInput::sip(1_000.0, 12.0, 5, Frequency::Monthly).unwrap();
        let sweep = ScenarioRunner::new().frequency_sweep(&base);

        assert_eq!(sweep.len(), 4);
        assert_eq!(sweep[0].0, Frequency::Daily);
        assert_eq!(sweep[0].1.total_invested, 1_000.0 * 365.0 * 5.0);
        assert_eq!(sweep[3].1.total_invested, 1_000.0 * 4.0 * 5.0);
    }
}
