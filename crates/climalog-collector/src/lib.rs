//! Sensor polling with bounded retry, appending readings to the sample file.
//!
//! A [`DataCollector`] owns a [`Sensor`] and a [`Clock`]. Each cycle it reads
//! the sensor under a [`RetryPolicy`], appends a successful reading to the CSV
//! file named in its [`CollectorConfig`], and sleeps for the sample interval.
//! Reads that fail after every retry are counted and the loop goes on.
//!
//! The clock is injected so that runs can be driven by a [`ManualClock`]
//! without real delays.

pub use self::{
    clock::{Clock, ManualClock, SystemClock},
    collector::{CollectError, CollectionSummary, DataCollector},
    config::CollectorConfig,
    retry::RetryPolicy,
    sensor::{Reading, Sensor, SensorError},
};

pub mod clock;
mod collector;
mod config;
pub mod retry;
mod sensor;
