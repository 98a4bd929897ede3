use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Settings of a collection run.
///
/// Missing fields take their default when deserialized, so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// CSV file samples are appended to.
    pub output_file: PathBuf,
    /// Delay between collection cycles, in seconds.
    pub sample_interval_secs: u64,
    /// Number of stored readings after which the run stops.
    pub target_readings: usize,
    /// Retry settings of a single cycle's sensor read.
    pub retry: RetryPolicy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from("sensor_data.csv"),
            sample_interval_secs: 10,
            target_readings: 500,
            retry: RetryPolicy::default(),
        }
    }
}

impl CollectorConfig {
    #[must_use]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }

    /// Wall-clock time a run needs if every read succeeds at the first attempt.
    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        self.sample_interval()
            .saturating_mul(u32::try_from(self.target_readings).unwrap_or(u32::MAX))
    }
}
