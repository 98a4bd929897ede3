use std::{f64::consts::PI, ops::RangeInclusive};

use rand::Rng;

use crate::model::round_to_tenth;

/// Something that briefly disturbs the room climate near the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Someone walks past the sensor: warmer and more humid.
    BodyHeat,
    /// A door or window is opened: colder and drier.
    Draft,
}

impl EventKind {
    /// Peak change of temperature (°C) and humidity (%).
    #[must_use]
    pub fn peak_delta(self) -> (f64, f64) {
        match self {
            Self::BodyHeat => (2.0, 10.0),
            Self::Draft => (-1.0, -5.0),
        }
    }
}

/// An event spanning `duration` consecutive readings from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateEvent {
    pub kind: EventKind,
    pub start: usize,
    pub duration: usize,
}

/// Humidity bounds of readings touched by an event, in percent.
pub const EVENT_HUMIDITY_RANGE: RangeInclusive<f64> = 45.0..=85.0;

/// Placement of the overnight events, as fractions of an 8-hour night
/// sampled every 10 seconds (2880 readings).
const SCHEDULE: [(EventKind, usize, usize, usize); 3] = [
    // Late-night bathroom trip.
    (EventKind::BodyHeat, 1400, 1500, 25),
    // Early-morning trip.
    (EventKind::BodyHeat, 2400, 2520, 20),
    // Someone checks a window.
    (EventKind::Draft, 1700, 1900, 15),
];
const SCHEDULE_BASE_LEN: usize = 2880;

impl ClimateEvent {
    /// Picks the usual overnight events at random positions within a series
    /// of `len` readings.
    pub fn overnight<R>(len: usize, rng: &mut R) -> Vec<Self>
    where
        R: Rng + ?Sized,
    {
        SCHEDULE
            .iter()
            .map(|&(kind, earliest, latest, duration)| {
                let earliest = earliest * len / SCHEDULE_BASE_LEN;
                let latest = latest * len / SCHEDULE_BASE_LEN;
                Self {
                    kind,
                    start: rng.random_range(earliest..=latest),
                    duration,
                }
            })
            .collect()
    }

    /// Adds the event to the readings it spans.
    ///
    /// The disturbance ramps up and back down as `sin(π·progress)`. Touched
    /// temperatures are rounded to 0.1 °C and humidities clamped to
    /// [`EVENT_HUMIDITY_RANGE`] and rounded to whole percent. Readings past
    /// the end of the slices are ignored.
    pub fn apply(&self, temperatures: &mut [f64], humidities: &mut [f64]) {
        let (peak_temperature, peak_humidity) = self.kind.peak_delta();
        let end = (self.start + self.duration)
            .min(temperatures.len())
            .min(humidities.len());
        for idx in self.start..end {
            #[expect(clippy::cast_precision_loss)]
            let progress = (idx - self.start) as f64 / self.duration as f64;
            let spike = (progress * PI).sin();
            temperatures[idx] = round_to_tenth(temperatures[idx] + peak_temperature * spike);
            humidities[idx] = (humidities[idx] + peak_humidity * spike)
                .clamp(*EVENT_HUMIDITY_RANGE.start(), *EVENT_HUMIDITY_RANGE.end())
                .round();
        }
    }
}
