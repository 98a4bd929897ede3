//! Student's and Welch's t-tests and normal-approximation confidence intervals.

use crate::{
    descriptive::{self, Estimator},
    undefined::{StatResult, Undefined, per_deviation},
};

/// Critical values used by [`confidence_interval`], keyed by confidence level.
///
/// These are large-sample normal quantiles, not Student's t quantiles, so
/// intervals are approximate (too narrow) for small datasets.
pub const CRITICAL_VALUES: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

/// Critical value used for confidence levels missing from [`CRITICAL_VALUES`].
pub const FALLBACK_CRITICAL_VALUE: f64 = 1.96;

/// Outcome of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TTest {
    pub t_statistic: f64,
    /// `n - 1` for the one-sample test; Welch–Satterthwaite for two samples.
    pub degrees_of_freedom: f64,
}

impl TTest {
    /// Returns `true` if `|t|` exceeds `critical_value`.
    #[must_use]
    pub fn rejects_at(&self, critical_value: f64) -> bool {
        self.t_statistic.abs() > critical_value
    }
}

/// Interval estimate of a mean.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ConfidenceInterval {
    /// Requested confidence level, e.g. `0.95`.
    pub confidence: f64,
    pub mean: f64,
    /// Half-width of the interval.
    pub margin: f64,
    pub lower: f64,
    pub upper: f64,
}

/// One-sample t-test of `H0: μ = mu0` against `H1: μ ≠ mu0`.
///
/// `t = (x̄ - mu0) / (s / √n)` with `n - 1` degrees of freedom.
///
/// # Examples
///
/// ```
/// # use climalog_stats::hypothesis::one_sample_t_test;
/// let test = one_sample_t_test(&[21.0, 22.0, 23.0, 22.0, 21.0], 22.0).unwrap();
/// assert_eq!(test.degrees_of_freedom, 4.0);
/// assert!(test.t_statistic.is_finite());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn one_sample_t_test(values: &[f64], mu0: f64) -> StatResult<TTest> {
    let mean = descriptive::mean(values)?;
    let std_dev = descriptive::std_dev(values, Estimator::Sample)?;
    let n = values.len() as f64;

    let standard_error = std_dev / n.sqrt();
    Ok(TTest {
        t_statistic: per_deviation(mean - mu0, standard_error)?,
        degrees_of_freedom: n - 1.0,
    })
}

/// Welch's two-sample t-test of `H0: μ1 = μ2`; does not assume equal variances.
///
/// `t = (x̄1 - x̄2) / √(v1/n1 + v2/n2)` and
/// `df = (v1/n1 + v2/n2)² / ((v1/n1)²/(n1-1) + (v2/n2)²/(n2-1))`.
#[expect(clippy::cast_precision_loss)]
pub fn two_sample_t_test(xs: &[f64], ys: &[f64]) -> StatResult<TTest> {
    let (m1, m2) = (descriptive::mean(xs)?, descriptive::mean(ys)?);
    let v1 = descriptive::variance(xs, Estimator::Sample)?;
    let v2 = descriptive::variance(ys, Estimator::Sample)?;
    let (n1, n2) = (xs.len() as f64, ys.len() as f64);

    let a = v1 / n1;
    let b = v2 / n2;
    if a + b == 0.0 {
        return Err(Undefined::ZeroDeviation);
    }

    let t_statistic = (m1 - m2) / (a + b).sqrt();
    let degrees_of_freedom = (a + b).powi(2) / (a.powi(2) / (n1 - 1.0) + b.powi(2) / (n2 - 1.0));
    Ok(TTest {
        t_statistic,
        degrees_of_freedom,
    })
}

/// Looks up the critical value for `confidence`, falling back to 1.96.
#[must_use]
pub fn critical_value(confidence: f64) -> f64 {
    CRITICAL_VALUES
        .iter()
        .find(|(level, _)| (level - confidence).abs() < 1e-9)
        .map_or(FALLBACK_CRITICAL_VALUE, |(_, critical)| *critical)
}

/// Confidence interval for the mean, `x̄ ± z × s / √n`.
///
/// # Examples
///
/// ```
/// # use climalog_stats::hypothesis::confidence_interval;
/// let ci = confidence_interval(&[20.0, 22.0, 24.0, 22.0], 0.95).unwrap();
/// assert!(ci.lower < 22.0 && 22.0 < ci.upper);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn confidence_interval(values: &[f64], confidence: f64) -> StatResult<ConfidenceInterval> {
    let mean = descriptive::mean(values)?;
    let std_dev = descriptive::std_dev(values, Estimator::Sample)?;
    let standard_error = std_dev / (values.len() as f64).sqrt();
    let margin = critical_value(confidence) * standard_error;

    Ok(ConfidenceInterval {
        confidence,
        mean,
        margin,
        lower: mean - margin,
        upper: mean + margin,
    })
}
