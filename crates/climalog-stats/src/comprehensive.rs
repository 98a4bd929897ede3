use crate::{
    descriptive::{self, DescriptiveStats, Quartiles},
    distribution::{self, FrequencyBin, IqrOutliers, ZScoreOutlier},
    hypothesis::{self, ConfidenceInterval},
    undefined::StatResult,
};

/// Comprehensive statistical analysis of a single variable.
///
/// This structure provides a complete overview of a dataset by combining:
/// - Descriptive statistics (mean, median, mode, spread)
/// - Quartiles and a confidence interval for the mean
/// - IQR and z-score outlier detection
/// - A frequency distribution
///
/// # Examples
///
/// ```
/// use climalog_stats::comprehensive::ComprehensiveStats;
///
/// let values = [10.0, 12.0, 12.0, 13.0, 12.0, 11.0, 14.0, 13.0, 15.0, 102.0];
/// let stats = ComprehensiveStats::new(
///     &values,
///     8,    // Number of histogram bins
///     0.95, // Confidence level
///     2.5,  // z-score outlier threshold
/// );
///
/// assert_eq!(stats.descriptive.count, 10);
/// assert_eq!(stats.iqr_outliers.unwrap().outliers, [102.0]);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComprehensiveStats {
    /// Basic descriptive statistics for the dataset.
    pub descriptive: DescriptiveStats,
    /// Q1, median and Q3.
    pub quartiles: StatResult<Quartiles>,
    /// Confidence interval for the mean.
    pub confidence_interval: StatResult<ConfidenceInterval>,
    /// Values outside the 1.5 × IQR fences.
    pub iqr_outliers: StatResult<IqrOutliers>,
    /// Values whose `|z|` exceeds the threshold.
    pub zscore_outliers: StatResult<Vec<ZScoreOutlier>>,
    /// Equal-width frequency distribution.
    pub distribution: StatResult<Vec<FrequencyBin>>,
}

impl ComprehensiveStats {
    /// Computes comprehensive statistics.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to analyze
    /// * `hist_num_bins` - The number of frequency distribution bins
    /// * `confidence` - Confidence level of the interval for the mean (e.g. `0.95`)
    /// * `z_threshold` - `|z|` above which a value is a z-score outlier
    #[must_use]
    pub fn new(values: &[f64], hist_num_bins: usize, confidence: f64, z_threshold: f64) -> Self {
        Self {
            descriptive: DescriptiveStats::new(values),
            quartiles: descriptive::quartiles(values),
            confidence_interval: hypothesis::confidence_interval(values, confidence),
            iqr_outliers: distribution::detect_outliers_iqr(values),
            zscore_outliers: distribution::detect_outliers_zscore(values, z_threshold),
            distribution: distribution::frequency_distribution(values, hist_num_bins),
        }
    }
}
