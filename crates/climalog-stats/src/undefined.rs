/// Reason a statistic has no value for the given input.
///
/// Every fallible function in this crate returns [`StatResult`], so a caller
/// cannot feed an undefined statistic into further arithmetic by accident.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, derive_more::Display, derive_more::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum Undefined {
    /// The input sequence contains no values.
    #[display("input sequence is empty")]
    EmptyInput,
    /// The statistic needs more values than were supplied.
    #[display("at least {required} values required, got {actual}")]
    TooFewValues { required: usize, actual: usize },
    /// A standard deviation used as a divisor is zero.
    #[display("standard deviation is zero")]
    ZeroDeviation,
    /// A mean used as a divisor is zero.
    #[display("mean is zero")]
    ZeroMean,
    /// Paired sequences have different lengths.
    #[display("sequence lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    /// A parameter is outside its domain (e.g. zero bins or a zero-width window).
    #[display("parameter `{name}` must be positive")]
    InvalidParameter { name: &'static str },
}

/// Result of a statistic that may be undefined.
pub type StatResult<T> = Result<T, Undefined>;

/// Checks that `values` holds at least `required` elements.
pub(crate) fn require_len(values: &[f64], required: usize) -> StatResult<()> {
    match values.len() {
        0 => Err(Undefined::EmptyInput),
        actual if actual < required => Err(Undefined::TooFewValues { required, actual }),
        _ => Ok(()),
    }
}

/// Divides by `divisor`, reporting a zero divisor as [`Undefined::ZeroDeviation`].
pub(crate) fn per_deviation(numerator: f64, divisor: f64) -> StatResult<f64> {
    if divisor == 0.0 {
        return Err(Undefined::ZeroDeviation);
    }
    Ok(numerator / divisor)
}
