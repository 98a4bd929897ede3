use climalog_store::MAX_HUMIDITY;

/// A successful sensor read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl Reading {
    /// Rejects values a working sensor cannot report.
    pub fn validate(self) -> Result<Self, SensorError> {
        if self.temperature.is_finite() && (0.0..=MAX_HUMIDITY).contains(&self.humidity) {
            Ok(self)
        } else {
            Err(SensorError::Implausible {
                temperature: self.temperature,
                humidity: self.humidity,
            })
        }
    }
}

/// A transient failure of a single sensor read.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SensorError {
    #[display("sensor did not respond")]
    NoResponse,
    #[display("checksum mismatch")]
    Checksum,
    #[display("sensor returned an incomplete reading")]
    Incomplete,
    #[display("implausible reading: {temperature}°C, {humidity}%")]
    Implausible { temperature: f64, humidity: f64 },
}

/// A source of temperature/humidity readings.
///
/// Reads may fail transiently; callers retry through
/// [`RetryPolicy`](crate::retry::RetryPolicy).
pub trait Sensor {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

impl<S> Sensor for &mut S
where
    S: Sensor + ?Sized,
{
    fn read(&mut self) -> Result<Reading, SensorError> {
        (**self).read()
    }
}

impl<S> Sensor for Box<S>
where
    S: Sensor + ?Sized,
{
    fn read(&mut self) -> Result<Reading, SensorError> {
        (**self).read()
    }
}
