//! Covariance and Pearson correlation between paired sequences.

use std::fmt;

use crate::{
    descriptive::{self, Estimator},
    undefined::{StatResult, Undefined, require_len},
};

/// Sample covariance, `Σ(xᵢ - x̄)(yᵢ - ȳ) / (n - 1)`.
///
/// Requires equal-length sequences with at least two values.
#[expect(clippy::cast_precision_loss)]
pub fn covariance(xs: &[f64], ys: &[f64]) -> StatResult<f64> {
    if xs.len() != ys.len() {
        return Err(Undefined::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    require_len(xs, 2)?;

    let x_mean = descriptive::mean(xs)?;
    let y_mean = descriptive::mean(ys)?;
    let sum_of_products = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum::<f64>();
    Ok(sum_of_products / (xs.len() - 1) as f64)
}

/// Pearson correlation coefficient, `cov(X, Y) / (σx × σy)`.
///
/// * `1.0`: perfect positive linear relationship
/// * `-1.0`: perfect negative linear relationship
/// * `0.0`: no linear relationship
///
/// Undefined when either sequence is constant.
///
/// # Examples
///
/// ```
/// # use climalog_stats::correlation::correlation;
/// let xs = [1.0, 2.0, 3.0, 4.0];
/// let r = correlation(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// assert!(correlation(&xs, &[5.0; 4]).is_err());
/// ```
pub fn correlation(xs: &[f64], ys: &[f64]) -> StatResult<f64> {
    let covariance = covariance(xs, ys)?;
    let x_std = descriptive::std_dev(xs, Estimator::Sample)?;
    let y_std = descriptive::std_dev(ys, Estimator::Sample)?;
    if x_std == 0.0 || y_std == 0.0 {
        return Err(Undefined::ZeroDeviation);
    }
    Ok((covariance / (x_std * y_std)).clamp(-1.0, 1.0))
}

/// How strong a linear relationship a correlation coefficient indicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, derive_more::Display)]
pub enum Strength {
    #[display("Weak or no linear relationship")]
    Weak,
    #[display("Moderate linear relationship")]
    Moderate,
    #[display("Strong linear relationship")]
    Strong,
}

/// Sign of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, derive_more::Display)]
pub enum Direction {
    #[display("positive")]
    Positive,
    #[display("negative")]
    Negative,
}

/// Plain-language reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Interpretation {
    pub strength: Strength,
    pub direction: Direction,
}

impl Interpretation {
    /// Classifies `r`: `|r| < 0.3` is weak, `|r| < 0.7` moderate, otherwise strong.
    #[must_use]
    pub fn of(r: f64) -> Self {
        let strength = match r.abs() {
            a if a < 0.3 => Strength::Weak,
            a if a < 0.7 => Strength::Moderate,
            _ => Strength::Strong,
        };
        let direction = if r > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        };
        Self {
            strength,
            direction,
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.strength, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_close;

    #[test]
    fn test_covariance() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        // var(xs) = 2.5, ys = 2 * xs
        assert_close(covariance(&xs, &ys).unwrap(), 5.0);
        assert_close(covariance(&xs, &xs).unwrap(), 2.5);
    }

    #[test]
    fn test_covariance_requires_matching_lengths() {
        assert_eq!(
            covariance(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Undefined::LengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(
            covariance(&[1.0], &[1.0]),
            Err(Undefined::TooFewValues {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_correlation_with_itself_is_one() {
        let xs = [21.3, 22.8, 20.1, 23.4, 22.2, 19.9];
        assert_close(correlation(&xs, &xs).unwrap(), 1.0);
    }

    #[test]
    fn test_correlation_with_constant_is_undefined() {
        let xs = [21.3, 22.8, 20.1];
        assert_eq!(
            correlation(&xs, &[57.0; 3]),
            Err(Undefined::ZeroDeviation)
        );
        assert_eq!(
            correlation(&[57.0; 3], &xs),
            Err(Undefined::ZeroDeviation)
        );
    }

    #[test]
    fn test_uncorrelated_sequences() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, -1.0, -1.0, 1.0];
        assert_close(correlation(&xs, &ys).unwrap(), 0.0);
    }

    #[test]
    fn test_interpretation() {
        assert_eq!(
            Interpretation::of(-0.85),
            Interpretation {
                strength: Strength::Strong,
                direction: Direction::Negative
            }
        );
        assert_eq!(Interpretation::of(0.5).strength, Strength::Moderate);
        assert_eq!(Interpretation::of(0.29).strength, Strength::Weak);
        assert_eq!(Interpretation::of(0.7).strength, Strength::Strong);
        assert_eq!(
            Interpretation::of(0.1).to_string(),
            "Weak or no linear relationship (positive)"
        );
    }
}
