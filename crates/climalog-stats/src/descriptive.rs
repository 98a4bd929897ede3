use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use crate::undefined::{StatResult, Undefined, require_len};

/// Which divisor to use when estimating variance.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimator {
    /// Divide by `n - 1` (Bessel's correction). Use this for sensor samples.
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

/// Most frequent value(s) of a dataset.
#[derive(Debug, Clone, PartialEq, serde::Serialize, derive_more::IsVariant)]
#[serde(untagged)]
pub enum Mode {
    /// Exactly one value reaches the highest occurrence count.
    Single(f64),
    /// Several values tie for the highest count, in order of first occurrence.
    Multiple(Vec<f64>),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Single(value) => write!(f, "{value}"),
            Mode::Multiple(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// First, second and third quartiles of a dataset.
///
/// See [`quartiles`] for the split convention.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Quartiles {
    /// Median of the lower half.
    pub q1: f64,
    /// Median of the whole dataset.
    pub q2: f64,
    /// Median of the upper half.
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range, `Q3 - Q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Descriptive statistics summarizing a dataset.
///
/// Each measure is computed independently, so an undefined measure (for
/// example the variance of a single value) does not hide the others.
///
/// # Examples
///
/// ```
/// use climalog_stats::descriptive::DescriptiveStats;
///
/// let stats = DescriptiveStats::new(&[5.0, 2.0, 4.0, 1.0, 3.0]);
/// assert_eq!(stats.count, 5);
/// assert_eq!(stats.mean, Ok(3.0));
/// assert_eq!(stats.median, Ok(3.0));
/// assert_eq!(stats.range, Ok(4.0));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value.
    pub min: StatResult<f64>,
    /// The maximum value.
    pub max: StatResult<f64>,
    /// The arithmetic mean.
    pub mean: StatResult<f64>,
    /// The median.
    pub median: StatResult<f64>,
    /// The most frequent value(s).
    pub mode: StatResult<Mode>,
    /// The sample variance (`n - 1` divisor).
    pub variance: StatResult<f64>,
    /// The sample standard deviation.
    pub std_dev: StatResult<f64>,
    /// `max - min`.
    pub range: StatResult<f64>,
    /// Standard deviation relative to the mean, in percent.
    pub coefficient_of_variation: StatResult<f64>,
}

impl DescriptiveStats {
    /// Computes all descriptive statistics of `values`.
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let bounds = min_max(values);
        Self {
            count: values.len(),
            min: bounds.map(|(min, _)| min),
            max: bounds.map(|(_, max)| max),
            mean: mean(values),
            median: median(values),
            mode: mode(values),
            variance: variance(values, Estimator::Sample),
            std_dev: std_dev(values, Estimator::Sample),
            range: bounds.map(|(min, max)| max - min),
            coefficient_of_variation: coefficient_of_variation(values),
        }
    }
}

/// Calculates the arithmetic mean.
///
/// # Returns
///
/// * `Ok(mean)` - if `values` is not empty
/// * `Err(Undefined::EmptyInput)` - otherwise
///
/// # Examples
///
/// ```
/// # use climalog_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Ok(2.5));
/// assert!(mean(&[]).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> StatResult<f64> {
    require_len(values, 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculates the median (middle value when sorted).
///
/// For an even count the two central values are averaged.
///
/// # Examples
///
/// ```
/// # use climalog_stats::descriptive::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Ok(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Ok(2.5));
/// ```
pub fn median(values: &[f64]) -> StatResult<f64> {
    median_of_sorted(&sorted(values))
}

/// Median of values already sorted in ascending order.
pub(crate) fn median_of_sorted(sorted_values: &[f64]) -> StatResult<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    require_len(sorted_values, 1)?;

    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 0 {
        Ok((sorted_values[mid - 1] + sorted_values[mid]) / 2.0)
    } else {
        Ok(sorted_values[mid])
    }
}

/// Finds the most frequent value(s).
///
/// Values are compared bit-for-bit, with `-0.0` and `0.0` treated as equal.
///
/// # Examples
///
/// ```
/// # use climalog_stats::descriptive::{mode, Mode};
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0]), Ok(Mode::Single(2.0)));
/// assert_eq!(mode(&[1.0, 2.0, 2.0, 1.0]), Ok(Mode::Multiple(vec![1.0, 2.0])));
/// ```
pub fn mode(values: &[f64]) -> StatResult<Mode> {
    require_len(values, 1)?;

    // (value, count) in order of first occurrence
    let mut counts: Vec<(f64, usize)> = vec![];
    let mut slots: HashMap<u64, usize> = HashMap::new();
    for &value in values {
        let key = if value == 0.0 { 0 } else { value.to_bits() };
        match slots.entry(key) {
            Entry::Occupied(slot) => counts[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(counts.len());
                counts.push((value, 1));
            }
        }
    }

    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let mut modes = counts
        .into_iter()
        .filter(|(_, count)| *count == max_count)
        .map(|(value, _)| value)
        .collect::<Vec<_>>();

    if modes.len() == 1 {
        Ok(Mode::Single(modes.remove(0)))
    } else {
        Ok(Mode::Multiple(modes))
    }
}

/// Calculates the variance.
///
/// Population variance: `σ² = (1/n) Σ(xᵢ - μ)²`.
/// Sample variance: `s² = (1/(n-1)) Σ(xᵢ - x̄)²`.
///
/// Undefined for fewer than two values, whichever estimator is used.
///
/// # Examples
///
/// ```
/// # use climalog_stats::descriptive::{variance, Estimator};
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(variance(&values, Estimator::Population), Ok(4.0));
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn variance(values: &[f64], estimator: Estimator) -> StatResult<f64> {
    require_len(values, 2)?;

    let mean = mean(values)?;
    let sum_of_squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    let n = values.len() as f64;
    match estimator {
        Estimator::Sample => Ok(sum_of_squares / (n - 1.0)),
        Estimator::Population => Ok(sum_of_squares / n),
    }
}

/// Square root of [`variance`]. A zero variance yields a zero deviation.
pub fn std_dev(values: &[f64], estimator: Estimator) -> StatResult<f64> {
    variance(values, estimator).map(f64::sqrt)
}

/// `max - min` of the dataset.
pub fn range(values: &[f64]) -> StatResult<f64> {
    min_max(values).map(|(min, max)| max - min)
}

/// Smallest and largest value of the dataset.
pub(crate) fn min_max(values: &[f64]) -> StatResult<(f64, f64)> {
    require_len(values, 1)?;
    Ok(values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
        (min.min(v), max.max(v))
    }))
}

/// Calculates Q1, Q2 (median) and Q3.
///
/// Q2 is the median of the whole sorted dataset. Q1 is the median of the
/// lower half `sorted[..n/2]`; Q3 is the median of the upper half, which is
/// `sorted[n/2..]` for even `n` and `sorted[n/2 + 1..]` for odd `n`. The
/// middle element of an odd-length dataset belongs to neither half.
///
/// Requires at least two values so that both halves are non-empty.
///
/// # Examples
///
/// ```
/// # use climalog_stats::descriptive::quartiles;
/// let q = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
/// assert_eq!((q.q1, q.q2, q.q3), (2.5, 4.5, 6.5));
/// assert_eq!(q.iqr(), 4.0);
/// ```
pub fn quartiles(values: &[f64]) -> StatResult<Quartiles> {
    require_len(values, 2)?;

    let sorted = sorted(values);
    let n = sorted.len();
    let mid = n / 2;
    let lower_half = &sorted[..mid];
    let upper_half = if n % 2 == 1 {
        &sorted[mid + 1..]
    } else {
        &sorted[mid..]
    };

    Ok(Quartiles {
        q1: median_of_sorted(lower_half)?,
        q2: median_of_sorted(&sorted)?,
        q3: median_of_sorted(upper_half)?,
    })
}

/// Interquartile range, `Q3 - Q1`.
pub fn iqr(values: &[f64]) -> StatResult<f64> {
    quartiles(values).map(|q| q.iqr())
}

/// Coefficient of variation: `std_dev / |mean| × 100`.
///
/// Useful for comparing the variability of measurements on different scales.
pub fn coefficient_of_variation(values: &[f64]) -> StatResult<f64> {
    let mean = mean(values)?;
    let std_dev = std_dev(values, Estimator::Sample)?;
    if mean == 0.0 {
        return Err(Undefined::ZeroMean);
    }
    Ok(std_dev / mean.abs() * 100.0)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
