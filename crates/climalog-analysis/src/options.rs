use serde::{Deserialize, Serialize};

/// Parameters of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Number of bins of the frequency distributions.
    pub histogram_bins: usize,
    /// Temperature the one-sample t-test compares the mean against, in °C.
    pub reference_temperature: f64,
    /// Confidence level of the mean's confidence interval.
    pub confidence: f64,
    /// `|z|` above which a value is a z-score outlier.
    pub z_threshold: f64,
    /// Window length of the rolling statistics.
    pub rolling_window: usize,
    /// Rolling statistics are only computed from this many samples on.
    pub rolling_min_samples: usize,
    /// `|t|` above which a t-test rejects its null hypothesis.
    pub critical_value: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 8,
            reference_temperature: 22.0,
            confidence: 0.95,
            z_threshold: climalog_stats::distribution::DEFAULT_Z_THRESHOLD,
            rolling_window: 20,
            rolling_min_samples: 30,
            critical_value: 2.0,
        }
    }
}
