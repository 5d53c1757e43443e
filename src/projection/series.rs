//! Projection output structures

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Projected position at the end of one elapsed year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyPoint {
    /// Elapsed year (1-indexed)
    pub year: u32,

    /// Principal contributed so far, whole currency units
    pub invested: f64,

    /// Projected value, whole currency units
    pub total_value: f64,
}

impl YearlyPoint {
    pub fn estimated_returns(&self) -> f64 {
        self.total_value - self.invested
    }
}

/// Complete projection result
///
/// Every monetary field holds a whole number of currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Principal contributed over the full horizon
    pub total_invested: f64,

    /// Value at the end of the horizon
    pub total_value: f64,

    /// `total_value - total_invested`
    pub estimated_returns: f64,

    /// One point per elapsed year, chronological
    pub yearly_series: Vec<YearlyPoint>,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let wealth_multiple = if self.total_invested > 0.0 {
            Some(self.total_value / self.total_invested)
        } else {
            None
        };

        ProjectionSummary {
            years: self.yearly_series.len() as u32,
            total_invested: self.total_invested,
            total_value: self.total_value,
            estimated_returns: self.estimated_returns,
            wealth_multiple,
        }
    }

    /// Final point of the series, if any year was projected
    pub fn final_year(&self) -> Option<&YearlyPoint> {
        self.yearly_series.last()
    }

    /// Write the yearly series as CSV: `Year,Invested,TotalValue,EstimatedReturns`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["Year", "Invested", "TotalValue", "EstimatedReturns"])?;

        for point in &self.yearly_series {
            out.write_record(&[
                point.year.to_string(),
                format!("{:.0}", point.invested),
                format!("{:.0}", point.total_value),
                format!("{:.0}", point.estimated_returns()),
            ])?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_invested: f64,
    pub total_value: f64,
    pub estimated_returns: f64,
    /// Final value per unit invested; `None` when nothing was invested
    pub wealth_multiple: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectionResult {
        ProjectionResult {
            total_invested: 24_000.0,
            total_value: 26_840.0,
            estimated_returns: 2_840.0,
            yearly_series: vec![
                YearlyPoint { year: 1, invested: 12_000.0, total_value: 12_809.0 },
                YearlyPoint { year: 2, invested: 24_000.0, total_value: 26_840.0 },
            ],
        }
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.years, 2);
        assert_eq!(summary.estimated_returns, 2_840.0);
        let multiple = summary.wealth_multiple.unwrap();
        assert!((multiple - 26_840.0 / 24_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_without_investment() {
        let empty = ProjectionResult {
            total_invested: 0.0,
            total_value: 0.0,
            estimated_returns: 0.0,
            yearly_series: Vec::new(),
        };
        let summary = empty.summary();
        assert_eq!(summary.years, 0);
        assert_eq!(summary.wealth_multiple, None);
        assert!(empty.final_year().is_none());
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Year,Invested,TotalValue,EstimatedReturns");
        assert_eq!(lines[1], "1,12000,12809,809");
        assert_eq!(lines[2], "2,24000,26840,2840");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalInvested"], 24_000.0);
        assert_eq!(json["yearlySeries"][0]["totalValue"], 12_809.0);
    }
}
