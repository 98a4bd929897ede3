//! Moving-window statistics over an ordered sequence.
//!
//! Output element `i` summarizes `values[i..i + window]`, so the output has
//! `len - window + 1` elements and is empty when the window is longer than
//! the input.

use crate::{
    descriptive::{self, Estimator},
    undefined::{StatResult, Undefined},
};

/// Rolling arithmetic mean.
///
/// # Examples
///
/// ```
/// # use climalog_stats::rolling::rolling_mean;
/// let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert_eq!(means, [2.0, 3.0, 4.0]);
/// ```
pub fn rolling_mean(values: &[f64], window: usize) -> StatResult<Vec<f64>> {
    rolling(values, window, descriptive::mean)
}

/// Rolling sample standard deviation. Windows shorter than two values are undefined.
pub fn rolling_std(values: &[f64], window: usize) -> StatResult<Vec<f64>> {
    if window == 1 {
        return Err(Undefined::TooFewValues {
            required: 2,
            actual: 1,
        });
    }
    rolling(values, window, |w| descriptive::std_dev(w, Estimator::Sample))
}

fn rolling<F>(values: &[f64], window: usize, stat: F) -> StatResult<Vec<f64>>
where
    F: Fn(&[f64]) -> StatResult<f64>,
{
    if window == 0 {
        return Err(Undefined::InvalidParameter { name: "window" });
    }
    values.windows(window).map(stat).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_close;

    #[test]
    fn test_rolling_mean() {
        assert_eq!(
            rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3),
            Ok(vec![2.0, 3.0, 4.0])
        );
        assert_eq!(rolling_mean(&[1.0, 2.0], 1), Ok(vec![1.0, 2.0]));
    }

    #[test]
    fn test_rolling_std() {
        let stds = rolling_std(&[1.0, 2.0, 3.0, 5.0, 7.0], 3).unwrap();
        assert_eq!(stds.len(), 3);
        assert_close(stds[0], 1.0);
        assert_close(stds[1], (7.0_f64 / 3.0).sqrt());
        assert_close(stds[2], 2.0);
    }

    #[test]
    fn test_window_longer_than_input_is_empty() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 3), Ok(vec![]));
        assert_eq!(rolling_std(&[1.0, 2.0], 3), Ok(vec![]));
        assert_eq!(rolling_mean(&[], 2), Ok(vec![]));
    }

    #[test]
    fn test_output_length() {
        let values = (0..30).map(f64::from).collect::<Vec<_>>();
        assert_eq!(rolling_mean(&values, 20).unwrap().len(), 11);
        assert_eq!(rolling_std(&values, 20).unwrap().len(), 11);
        assert_eq!(rolling_mean(&values, 30).unwrap().len(), 1);
    }

    #[test]
    fn test_degenerate_windows_are_errors() {
        assert_eq!(
            rolling_mean(&[1.0, 2.0], 0),
            Err(Undefined::InvalidParameter { name: "window" })
        );
        assert_eq!(
            rolling_std(&[1.0, 2.0], 0),
            Err(Undefined::InvalidParameter { name: "window" })
        );
        assert!(rolling_std(&[1.0, 2.0], 1).is_err());
    }
}
