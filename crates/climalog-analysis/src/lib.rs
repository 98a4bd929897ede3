//! Statistical analysis of a temperature/humidity sample file.
//!
//! [`analyze`] loads a sample file and computes an [`AnalysisReport`]:
//!
//! 1. **Per-variable statistics** ([`ComprehensiveStats`](climalog_stats::comprehensive::ComprehensiveStats))
//!    for temperature and humidity
//! 2. **Reference test**: one-sample t-test of the mean temperature against a
//!    reference temperature
//! 3. **Period comparison**: Welch t-test of the first half of the night
//!    against the second half
//! 4. **Correlation** between temperature and humidity
//! 5. **Rolling statistics** of the temperature, for long enough series
//!
//! Statistics that are undefined for the data at hand (too few samples, a
//! constant variable) are kept in the report as
//! [`Undefined`](climalog_stats::Undefined) reasons rather than failing the
//! whole analysis.
//!
//! # Examples
//!
//! ```no_run
//! use climalog_analysis::{AnalysisOptions, analyze};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = analyze("sensor_data.csv", &AnalysisOptions::default())?;
//! if let Ok(mean) = report.temperature.descriptive.mean {
//!     println!("mean temperature: {mean:.2}°C");
//! }
//! # Ok(())
//! # }
//! ```

pub use self::{
    options::AnalysisOptions,
    report::{
        AnalysisReport, CorrelationSummary, PeriodComparison, ReferenceTest, RollingSummary,
        TimeRange, analyze,
    },
};

mod options;
mod report;
