use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use climalog_store::{InvalidSample, Sample, SampleSeries};
use rand::Rng;

use crate::{event::ClimateEvent, model::OvernightModel};

/// 10 PM on the night the reference recording was made.
pub const DEFAULT_START: NaiveDateTime = NaiveDateTime::new(
    NaiveDate::from_ymd_opt(2024, 12, 23).expect("valid date"),
    NaiveTime::from_hms_opt(22, 0, 0).expect("valid time"),
);

/// Generates a night of samples from an [`OvernightModel`].
///
/// # Examples
///
/// ```
/// use climalog_synth::OvernightGenerator;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let generator = OvernightGenerator::default();
/// let series = generator.generate(&mut Pcg32::seed_from_u64(42)).unwrap();
/// assert_eq!(series.len(), 2880);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OvernightGenerator {
    pub model: OvernightModel,
    /// Timestamp of the first sample.
    pub start: NaiveDateTime,
    /// Length of the night, in hours.
    pub duration_hours: u32,
    /// Time between samples, in seconds.
    pub interval_secs: u32,
    /// Whether to add the overnight events on top of the model.
    pub with_events: bool,
}

impl Default for OvernightGenerator {
    fn default() -> Self {
        Self {
            model: OvernightModel::default(),
            start: DEFAULT_START,
            duration_hours: 8,
            interval_secs: 10,
            with_events: true,
        }
    }
}

impl OvernightGenerator {
    /// Number of samples one night produces.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        if self.interval_secs == 0 {
            return 0;
        }
        let total_secs = u64::from(self.duration_hours) * 3600;
        usize::try_from(total_secs.div_ceil(u64::from(self.interval_secs))).unwrap_or(usize::MAX)
    }

    pub fn generate<R>(&self, rng: &mut R) -> Result<SampleSeries, InvalidSample>
    where
        R: Rng + ?Sized,
    {
        let len = self.sample_count();
        let step = TimeDelta::seconds(i64::from(self.interval_secs));

        let mut timestamps = Vec::with_capacity(len);
        let mut temperatures = Vec::with_capacity(len);
        let mut humidities = Vec::with_capacity(len);
        let mut timestamp = self.start;
        for i in 0..len {
            #[expect(clippy::cast_precision_loss)]
            let minutes = (i as f64) * f64::from(self.interval_secs) / 60.0;
            let temperature = self.model.temperature(minutes, rng);
            let humidity = self.model.humidity(minutes, temperature, rng);
            timestamps.push(timestamp);
            temperatures.push(temperature);
            humidities.push(humidity);
            timestamp += step;
        }

        if self.with_events {
            for event in ClimateEvent::overnight(len, rng) {
                tracing::debug!(kind = ?event.kind, start = event.start, duration = event.duration, "adding event");
                event.apply(&mut temperatures, &mut humidities);
            }
        }

        timestamps
            .into_iter()
            .zip(temperatures)
            .zip(humidities)
            .map(|((timestamp, temperature), humidity)| {
                Sample::new(timestamp, temperature, humidity)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_default_night() {
        let series = OvernightGenerator::default()
            .generate(&mut Pcg32::seed_from_u64(3))
            .unwrap();

        assert_eq!(series.len(), 2880);
        assert_eq!(
            series.time_range(),
            Some((
                "2024-12-23T22:00:00".parse().unwrap(),
                "2024-12-24T05:59:50".parse().unwrap()
            ))
        );

        let temperatures = series.temperatures();
        assert!((temperatures[0] - 23.3).abs() < 0.6);
        assert!(temperatures.iter().all(|t| (15.0..=26.0).contains(t)));
        assert!(
            series
                .humidities()
                .iter()
                .all(|h| (45.0..=85.0).contains(h))
        );
    }

    #[test]
    fn test_same_seed_same_series() {
        let generator = OvernightGenerator::default();
        let a = generator.generate(&mut Pcg32::seed_from_u64(9)).unwrap();
        let b = generator.generate(&mut Pcg32::seed_from_u64(9)).unwrap();
        let c = generator.generate(&mut Pcg32::seed_from_u64(10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_night_cools_down() {
        let generator = OvernightGenerator {
            with_events: false,
            ..OvernightGenerator::default()
        };
        let temperatures = generator
            .generate(&mut Pcg32::seed_from_u64(5))
            .unwrap()
            .temperatures();
        let first_hour: f64 = temperatures[..360].iter().sum::<f64>() / 360.0;
        let last_hour: f64 = temperatures[2520..].iter().sum::<f64>() / 360.0;
        assert!(first_hour - last_hour > 3.0);
    }

    #[test]
    fn test_custom_length() {
        let generator = OvernightGenerator {
            duration_hours: 1,
            interval_secs: 60,
            ..OvernightGenerator::default()
        };
        assert_eq!(generator.sample_count(), 60);
        let series = generator.generate(&mut Pcg32::seed_from_u64(0)).unwrap();
        assert_eq!(series.len(), 60);

        let zero = OvernightGenerator {
            interval_secs: 0,
            ..OvernightGenerator::default()
        };
        assert!(zero.generate(&mut Pcg32::seed_from_u64(0)).unwrap().is_empty());
    }
}
