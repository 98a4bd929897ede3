use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Upper bound of relative humidity, in percent.
pub const MAX_HUMIDITY: f64 = 100.0;

/// One sensor observation.
///
/// Samples are immutable once created. The serialized field names match the
/// columns of the sample file (`timestamp,temperature_c,humidity_pct`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Local wall-clock time of the reading, without offset.
    timestamp: NaiveDateTime,
    /// Temperature in degrees Celsius.
    #[serde(rename = "temperature_c")]
    temperature: f64,
    /// Relative humidity in percent.
    #[serde(rename = "humidity_pct")]
    humidity: f64,
}

/// A sample whose values cannot describe a real reading.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidSample {
    #[display("temperature {value} is not a finite number")]
    NonFiniteTemperature { value: f64 },
    #[display("humidity {value} is outside 0-100%")]
    HumidityOutOfRange { value: f64 },
}

impl Sample {
    /// Creates a sample, rejecting non-finite temperatures and humidity outside 0-100%.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDateTime;
    /// # use climalog_store::Sample;
    /// let at: NaiveDateTime = "2024-12-23T22:00:00".parse().unwrap();
    /// let sample = Sample::new(at, 23.3, 57.0).unwrap();
    /// assert_eq!(sample.temperature(), 23.3);
    /// assert!(Sample::new(at, 23.3, 140.0).is_err());
    /// ```
    pub fn new(
        timestamp: NaiveDateTime,
        temperature: f64,
        humidity: f64,
    ) -> Result<Self, InvalidSample> {
        let sample = Self {
            timestamp,
            temperature,
            humidity,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Checks the invariants enforced by [`Sample::new`].
    pub fn validate(&self) -> Result<(), InvalidSample> {
        if !self.temperature.is_finite() {
            return Err(InvalidSample::NonFiniteTemperature {
                value: self.temperature,
            });
        }
        if !(0.0..=MAX_HUMIDITY).contains(&self.humidity) {
            return Err(InvalidSample::HumidityOutOfRange {
                value: self.humidity,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub fn humidity(&self) -> f64 {
        self.humidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_accepts_boundaries() {
        assert!(Sample::new(at("2024-12-23T22:00:00"), -10.0, 0.0).is_ok());
        assert!(Sample::new(at("2024-12-23T22:00:00"), 40.0, 100.0).is_ok());
    }

    #[test]
    fn test_new_rejects_impossible_values() {
        let t = at("2024-12-23T22:00:00");
        assert_eq!(
            Sample::new(t, f64::NAN, 50.0).map_err(|e| e.to_string()),
            Err("temperature NaN is not a finite number".to_owned())
        );
        assert_eq!(
            Sample::new(t, 21.0, -1.0),
            Err(InvalidSample::HumidityOutOfRange { value: -1.0 })
        );
        assert!(Sample::new(t, 21.0, f64::NAN).is_err());
        assert!(Sample::new(t, f64::INFINITY, 50.0).is_err());
    }
}
