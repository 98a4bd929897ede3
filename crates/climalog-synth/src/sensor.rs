use climalog_collector::{Reading, Sensor, SensorError};
use rand::Rng;

use crate::model::OvernightModel;

/// A [`Sensor`] backed by an [`OvernightModel`].
///
/// Each successful read advances the simulated night by one sample interval.
/// Reads fail transiently with the configured probability, the way a cheap
/// one-wire sensor drops readings.
#[derive(Debug, Clone)]
pub struct SimulatedSensor<R> {
    model: OvernightModel,
    rng: R,
    interval_secs: u32,
    failure_probability: f64,
    readings: u32,
}

impl<R> SimulatedSensor<R>
where
    R: Rng,
{
    #[must_use]
    pub fn new(model: OvernightModel, rng: R, interval_secs: u32) -> Self {
        Self {
            model,
            rng,
            interval_secs,
            failure_probability: 0.0,
            readings: 0,
        }
    }

    /// Sets the chance that a read fails, clamped to `[0, 1]`. `NaN` disables failures.
    #[must_use]
    pub fn with_failure_probability(mut self, probability: f64) -> Self {
        self.failure_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    fn elapsed_minutes(&self) -> f64 {
        f64::from(self.readings) * f64::from(self.interval_secs) / 60.0
    }
}

impl<R> Sensor for SimulatedSensor<R>
where
    R: Rng,
{
    fn read(&mut self) -> Result<Reading, SensorError> {
        if self.rng.random_bool(self.failure_probability) {
            return Err(match self.rng.random_range(0..3) {
                0 => SensorError::NoResponse,
                1 => SensorError::Checksum,
                _ => SensorError::Incomplete,
            });
        }
        let minutes = self.elapsed_minutes();
        let temperature = self.model.temperature(minutes, &mut self.rng);
        let humidity = self.model.humidity(minutes, temperature, &mut self.rng);
        self.readings += 1;
        Ok(Reading {
            temperature,
            humidity,
        })
    }
}
