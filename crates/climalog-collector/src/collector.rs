use climalog_store::{InvalidSample, Sample, StoreError, file};

use crate::{
    clock::Clock,
    config::CollectorConfig,
    sensor::{Reading, Sensor},
};

/// Failure that stops a collection run.
///
/// Sensor failures never stop a run; they are counted instead.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CollectError {
    #[display("reading cannot be stored: {_0}")]
    InvalidReading(InvalidSample),
    #[display("{_0}")]
    Store(StoreError),
}

/// Outcome of a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CollectionSummary {
    /// Readings appended to the sample file.
    pub readings: usize,
    /// Cycles whose sensor read failed after every retry.
    pub errors: usize,
}

impl CollectionSummary {
    /// Failed cycles as a fraction of all cycles, in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use climalog_collector::CollectionSummary;
    ///
    /// assert_eq!(CollectionSummary { readings: 0, errors: 0 }.error_rate(), 0.0);
    /// assert_eq!(CollectionSummary { readings: 3, errors: 1 }.error_rate(), 0.25);
    /// ```
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn error_rate(&self) -> f64 {
        self.errors as f64 / (self.readings + self.errors).max(1) as f64
    }
}

/// Polls a sensor and appends successful readings to the sample file.
#[derive(Debug)]
pub struct DataCollector<S, C> {
    sensor: S,
    clock: C,
    config: CollectorConfig,
    readings: usize,
    errors: usize,
}

impl<S, C> DataCollector<S, C>
where
    S: Sensor,
    C: Clock,
{
    /// Creates a collector, writing the header row if the output file does not exist.
    pub fn new(sensor: S, clock: C, config: CollectorConfig) -> Result<Self, StoreError> {
        file::create_if_missing(&config.output_file)?;
        Ok(Self {
            sensor,
            clock,
            config,
            readings: 0,
            errors: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            readings: self.readings,
            errors: self.errors,
        }
    }

    /// Reads the sensor under the retry policy.
    ///
    /// Returns `None` and counts one error when every attempt fails.
    pub fn collect_single(&mut self) -> Option<Reading> {
        let Self {
            sensor,
            clock,
            config,
            ..
        } = self;
        match config
            .retry
            .retry(clock, |_| sensor.read().and_then(Reading::validate))
        {
            Ok(reading) => Some(reading),
            Err(e) => {
                self.errors += 1;
                tracing::warn!(error = %e, "sensor read failed after retries");
                None
            }
        }
    }

    /// Appends `reading` to the sample file, stamped with the current time.
    pub fn save_reading(&mut self, reading: Reading) -> Result<Sample, CollectError> {
        let sample = Sample::new(self.clock.now(), reading.temperature, reading.humidity)?;
        file::append(&self.config.output_file, &sample)?;
        self.readings += 1;
        tracing::debug!(path = %self.config.output_file.display(), "appended sample");
        Ok(sample)
    }

    /// Collects until the configured number of readings has been stored.
    ///
    /// Every cycle reads the sensor once (with retries), stores the reading if
    /// there is one, and then waits for the sample interval. No wait follows
    /// the cycle that reaches the target.
    pub fn run(&mut self) -> Result<CollectionSummary, CollectError> {
        let target = self.config.target_readings;
        #[expect(clippy::cast_precision_loss)]
        let estimated_minutes = self.config.estimated_duration().as_secs() as f64 / 60.0;
        tracing::info!(
            target_readings = target,
            interval_secs = self.config.sample_interval_secs,
            output = %self.config.output_file.display(),
            "starting data collection (estimated time: {estimated_minutes:.1} minutes)"
        );

        while self.readings < target {
            if let Some(reading) = self.collect_single() {
                self.save_reading(reading)?;
                #[expect(clippy::cast_precision_loss)]
                let progress = self.readings as f64 / target as f64 * 100.0;
                tracing::info!(
                    "[{}/{target}] Temp: {}°C, Humidity: {}% ({progress:.1}% complete)",
                    self.readings,
                    reading.temperature,
                    reading.humidity,
                );
            } else {
                tracing::warn!(
                    "[{}/{target}] Read failed (total errors: {})",
                    self.readings,
                    self.errors,
                );
            }

            if self.readings < target {
                let interval = self.config.sample_interval();
                self.clock.sleep(interval);
            }
        }

        let summary = self.summary();
        tracing::info!(
            readings = summary.readings,
            errors = summary.errors,
            "collection complete (error rate: {:.1}%)",
            summary.error_rate() * 100.0
        );
        Ok(summary)
    }
}
