//! Storage of timestamped temperature/humidity samples.
//!
//! Samples live in a CSV file with the header `timestamp,temperature_c,humidity_pct`.
//! The file is written by appending one row per reading and loaded as a whole
//! into a [`SampleSeries`] for analysis.
//!
//! # Examples
//!
//! ```
//! use climalog_store::{Sample, file};
//!
//! let csv = "timestamp,temperature_c,humidity_pct\n2024-12-23T22:00:00,23.3,57\n";
//! let series = file::read_samples(csv.as_bytes()).unwrap();
//! assert_eq!(series.len(), 1);
//! assert_eq!(series.humidities(), [57.0]);
//! ```

pub use self::{
    file::StoreError,
    sample::{InvalidSample, MAX_HUMIDITY, Sample},
    series::SampleSeries,
};

pub mod file;
mod sample;
mod series;
