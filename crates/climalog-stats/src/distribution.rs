//! Frequency distributions, z-scores and outlier detection.

use crate::{
    descriptive::{self, Estimator},
    undefined::{StatResult, Undefined, per_deviation},
};

/// Default `|z|` above which [`detect_outliers_zscore`] flags a value.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.5;

/// Multiple of the IQR added beyond Q1/Q3 to form the outlier fences.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// A single equal-width bin of a frequency distribution.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FrequencyBin {
    /// Midpoint of the bin interval.
    pub center: f64,
    /// Number of values that fall in this bin.
    pub count: usize,
    /// `count / n`.
    pub relative_frequency: f64,
}

/// A value flagged by [`detect_outliers_zscore`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ZScoreOutlier {
    pub value: f64,
    pub z_score: f64,
}

/// Result of [`detect_outliers_iqr`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IqrOutliers {
    /// Values strictly outside the fences, in input order.
    pub outliers: Vec<f64>,
    /// `Q1 - 1.5 × IQR`.
    pub lower_bound: f64,
    /// `Q3 + 1.5 × IQR`.
    pub upper_bound: f64,
}

impl IqrOutliers {
    /// Returns `true` if `value` lies outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }
}

/// Builds a histogram of `values` with `bins` equal-width bins over `[min, max]`.
///
/// Each value goes to bin `floor((x - min) / width)`, clamped to the last bin
/// so that the maximum is counted in bin `bins - 1`. When every value is equal
/// the width is zero and a single bin holding all values is returned.
///
/// # Examples
///
/// ```
/// # use climalog_stats::distribution::frequency_distribution;
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let bins = frequency_distribution(&values, 3).unwrap();
/// assert_eq!(bins.len(), 3);
/// assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 10);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn frequency_distribution(values: &[f64], bins: usize) -> StatResult<Vec<FrequencyBin>> {
    if bins == 0 {
        return Err(Undefined::InvalidParameter { name: "bins" });
    }
    let (min, max) = descriptive::min_max(values)?;
    let n = values.len() as f64;

    let bin_width = (max - min) / bins as f64;
    if bin_width == 0.0 {
        return Ok(vec![FrequencyBin {
            center: min,
            count: values.len(),
            relative_frequency: 1.0,
        }]);
    }

    let mut counts = vec![0_usize; bins];
    for &value in values {
        let idx = (((value - min) / bin_width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| FrequencyBin {
            center: min + (i as f64 + 0.5) * bin_width,
            count,
            relative_frequency: count as f64 / n,
        })
        .collect())
}

/// Number of sample standard deviations `value` lies from the mean of `values`.
pub fn z_score(value: f64, values: &[f64]) -> StatResult<f64> {
    let mean = descriptive::mean(values)?;
    let std_dev = descriptive::std_dev(values, Estimator::Sample)?;
    per_deviation(value - mean, std_dev)
}

/// Finds values whose `|z|` exceeds `threshold`.
///
/// The mean and standard deviation are computed once for the whole dataset.
pub fn detect_outliers_zscore(values: &[f64], threshold: f64) -> StatResult<Vec<ZScoreOutlier>> {
    let mean = descriptive::mean(values)?;
    let std_dev = descriptive::std_dev(values, Estimator::Sample)?;
    if std_dev == 0.0 {
        return Err(Undefined::ZeroDeviation);
    }

    Ok(values
        .iter()
        .map(|&value| ZScoreOutlier {
            value,
            z_score: (value - mean) / std_dev,
        })
        .filter(|outlier| outlier.z_score.abs() > threshold)
        .collect())
}

/// Finds values outside `[Q1 - 1.5 × IQR, Q3 + 1.5 × IQR]`.
///
/// Quartiles follow the split convention of [`descriptive::quartiles`].
pub fn detect_outliers_iqr(values: &[f64]) -> StatResult<IqrOutliers> {
    let quartiles = descriptive::quartiles(values)?;
    let iqr = quartiles.iqr();
    let lower_bound = quartiles.q1 - IQR_FENCE_FACTOR * iqr;
    let upper_bound = quartiles.q3 + IQR_FENCE_FACTOR * iqr;

    let outliers = values
        .iter()
        .copied()
        .filter(|&v| v < lower_bound || v > upper_bound)
        .collect();

    Ok(IqrOutliers {
        outliers,
        lower_bound,
        upper_bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_close;

    const WITH_SPIKE: [f64; 10] = [10.0, 12.0, 12.0, 13.0, 12.0, 11.0, 14.0, 13.0, 15.0, 102.0];

    #[test]
    fn test_frequency_distribution_places_max_in_last_bin() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins = frequency_distribution(&values, 3).unwrap();

        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 10);
        // width 3: [1, 4) [4, 7) [7, 10]
        assert_eq!(
            bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            [3, 3, 4]
        );
        assert_close(bins[0].center, 2.5);
        assert_close(bins[2].center, 8.5);
        assert_close(bins[2].relative_frequency, 0.4);
    }

    #[test]
    fn test_frequency_distribution_relative_frequencies_sum_to_one() {
        let bins = frequency_distribution(&WITH_SPIKE, 8).unwrap();
        assert_eq!(bins.len(), 8);
        let total = bins.iter().map(|b| b.relative_frequency).sum::<f64>();
        assert_close(total, 1.0);
        assert_eq!(bins[7].count, 1);
    }

    #[test]
    fn test_frequency_distribution_of_constant_values() {
        let bins = frequency_distribution(&[21.0, 21.0, 21.0], 5).unwrap();
        assert_eq!(
            bins,
            [FrequencyBin {
                center: 21.0,
                count: 3,
                relative_frequency: 1.0
            }]
        );
    }

    #[test]
    fn test_frequency_distribution_rejects_bad_input() {
        assert_eq!(
            frequency_distribution(&[1.0, 2.0], 0),
            Err(Undefined::InvalidParameter { name: "bins" })
        );
        assert_eq!(frequency_distribution(&[], 4), Err(Undefined::EmptyInput));
    }

    #[test]
    fn test_z_score() {
        let values = [2.0, 4.0, 6.0];
        // mean 4, sample std-dev 2
        assert_close(z_score(8.0, &values).unwrap(), 2.0);
        assert_close(z_score(4.0, &values).unwrap(), 0.0);
        assert_eq!(z_score(1.0, &[3.0, 3.0]), Err(Undefined::ZeroDeviation));
        assert!(z_score(1.0, &[3.0]).is_err());
    }

    #[test]
    fn test_zscore_outliers_flag_spike() {
        let outliers = detect_outliers_zscore(&WITH_SPIKE, DEFAULT_Z_THRESHOLD).unwrap();
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].value, 102.0);
        assert!(outliers[0].z_score > DEFAULT_Z_THRESHOLD);
    }

    #[test]
    fn test_zscore_outliers_of_constant_values_is_undefined() {
        assert_eq!(
            detect_outliers_zscore(&[5.0, 5.0, 5.0], DEFAULT_Z_THRESHOLD),
            Err(Undefined::ZeroDeviation)
        );
    }

    #[test]
    fn test_iqr_outliers_flag_spike() {
        let result = detect_outliers_iqr(&WITH_SPIKE).unwrap();
        // Q1 = 12, Q3 = 14, IQR = 2
        assert_close(result.lower_bound, 9.0);
        assert_close(result.upper_bound, 17.0);
        assert_eq!(result.outliers, [102.0]);
        assert!(result.is_outlier(102.0));
        assert!(!result.is_outlier(17.0));
    }

    #[test]
    fn test_iqr_outliers_keep_input_order() {
        let values = [-50.0, 1.0, 2.0, 3.0, 4.0, 5.0, 60.0];
        let result = detect_outliers_iqr(&values).unwrap();
        assert_eq!(result.outliers, [-50.0, 60.0]);
    }
}
