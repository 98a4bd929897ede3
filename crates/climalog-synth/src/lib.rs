//! Synthetic overnight indoor climate data.
//!
//! [`OvernightModel`] describes how a heated room cools down during a winter
//! night. [`OvernightGenerator`] samples the model into a full
//! [`SampleSeries`](climalog_store::SampleSeries) with occasional disturbances
//! ([`ClimateEvent`]), and [`SimulatedSensor`] exposes the same model through
//! the collector's [`Sensor`](climalog_collector::Sensor) trait.
//!
//! All randomness comes from a caller-supplied RNG, so a seeded generator
//! reproduces the same data.

pub use self::{
    event::{ClimateEvent, EventKind},
    generator::{DEFAULT_START, OvernightGenerator},
    model::OvernightModel,
    sensor::SimulatedSensor,
    summary::{HourlyAverage, NightSummary, Span},
};

mod event;
mod generator;
mod model;
mod sensor;
pub mod summary;
