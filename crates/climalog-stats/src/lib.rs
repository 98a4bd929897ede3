//! Statistical analysis of sensor readings.
//!
//! This crate provides the statistics used to summarize temperature and
//! humidity logs:
//!
//! - **Descriptive statistics**: mean, median, mode, variance, standard deviation,
//!   range, quartiles, IQR and coefficient of variation
//! - **Distributions**: equal-width frequency distributions, z-scores and outlier detection
//! - **Correlation**: covariance and Pearson correlation between paired sequences
//! - **Hypothesis testing**: one-sample and Welch two-sample t-tests, confidence intervals
//! - **Rolling statistics**: moving-window mean and standard deviation
//! - **Comprehensive statistics**: all per-variable measures in one structure
//!
//! Every statistic that can be mathematically undefined for its input (an empty
//! sequence, fewer than two values for a variance, a zero divisor) returns
//! [`StatResult`], whose error variant [`Undefined`] names the reason. No function
//! in this crate returns `NaN` or panics on short input.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`distribution`]: Frequency distributions and outlier detection
//! - [`correlation`]: Relationships between two variables
//! - [`hypothesis`]: t-tests and confidence intervals
//! - [`rolling`]: Moving-window statistics
//! - [`comprehensive`]: Combined per-variable analysis
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use climalog_stats::descriptive::{self, Estimator};
//!
//! let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(descriptive::mean(&values), Ok(5.0));
//! assert_eq!(descriptive::variance(&values, Estimator::Population), Ok(4.0));
//! ```
//!
//! ## Handling undefined results
//!
//! ```
//! use climalog_stats::{Undefined, descriptive::{self, Estimator}};
//!
//! let result = descriptive::std_dev(&[21.5], Estimator::Sample);
//! assert_eq!(result, Err(Undefined::TooFewValues { required: 2, actual: 1 }));
//! ```
//!
//! ## Detecting outliers
//!
//! ```
//! use climalog_stats::distribution::{detect_outliers_iqr, detect_outliers_zscore};
//!
//! let values = [10.0, 12.0, 12.0, 13.0, 12.0, 11.0, 14.0, 13.0, 15.0, 102.0];
//! assert_eq!(detect_outliers_iqr(&values).unwrap().outliers, [102.0]);
//! assert_eq!(detect_outliers_zscore(&values, 2.5).unwrap()[0].value, 102.0);
//! ```

pub use self::undefined::{StatResult, Undefined};

pub mod comprehensive;
pub mod correlation;
pub mod descriptive;
pub mod distribution;
pub mod hypothesis;
pub mod rolling;
mod undefined;

#[cfg(test)]
pub(crate) mod test_util {
    #[track_caller]
    pub(crate) fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }
}
