use std::f64::consts::PI;

use rand::Rng;
use rand_distr::StandardNormal;

/// Indoor climate of a heated room cooling down overnight.
///
/// Temperature follows Newton's law of cooling towards the outdoor
/// temperature, with a short heating bump at the start of every thermostat
/// cycle. Relative humidity rises as the air cools and as occupants breathe.
#[derive(Debug, Clone, PartialEq)]
pub struct OvernightModel {
    /// Indoor temperature at the start of the night, in °C.
    pub evening_temperature: f64,
    /// Temperature the room cools towards, in °C.
    pub outdoor_temperature: f64,
    /// Cooling constant `k` of `exp(-k·t)`, per hour.
    pub cooling_rate: f64,
    /// Length of a thermostat cycle, in minutes.
    pub hvac_cycle_minutes: f64,
    /// Fraction of each cycle the heating runs.
    pub hvac_duty: f64,
    /// Peak temperature added by the heating, in °C.
    pub hvac_boost: f64,
    /// Standard deviation of the temperature noise, in °C.
    pub temperature_noise: f64,
    /// Relative humidity at the start of the night, in percent.
    pub evening_humidity: f64,
    /// Humidity gained per °C of cooling, in percent.
    pub humidity_per_degree: f64,
    /// Humidity gained per hour from breathing, in percent.
    pub breath_moisture_per_hour: f64,
    /// Standard deviation of the humidity noise, in percent.
    pub humidity_noise: f64,
    /// Lowest humidity the model reports, in percent.
    pub min_humidity: f64,
    /// Highest humidity the model reports, in percent.
    pub max_humidity: f64,
}

impl Default for OvernightModel {
    fn default() -> Self {
        Self {
            evening_temperature: 23.3,
            outdoor_temperature: 10.0,
            cooling_rate: 0.08,
            hvac_cycle_minutes: 120.0,
            hvac_duty: 0.2,
            hvac_boost: 0.3,
            temperature_noise: 0.1,
            evening_humidity: 57.0,
            humidity_per_degree: 2.5,
            breath_moisture_per_hour: 0.5,
            humidity_noise: 1.5,
            min_humidity: 50.0,
            max_humidity: 78.0,
        }
    }
}

impl OvernightModel {
    /// Noise-free temperature `minutes` after the start of the night.
    ///
    /// # Examples
    ///
    /// ```
    /// use climalog_synth::OvernightModel;
    ///
    /// let model = OvernightModel::default();
    /// assert!((model.expected_temperature(0.0) - 23.3).abs() < 1e-9);
    /// assert!(model.expected_temperature(480.0) < 20.0);
    /// ```
    #[must_use]
    pub fn expected_temperature(&self, minutes: f64) -> f64 {
        let hours = minutes / 60.0;
        let cooled = self.outdoor_temperature
            + (self.evening_temperature - self.outdoor_temperature)
                * (-self.cooling_rate * hours).exp();
        cooled + self.hvac_contribution(minutes)
    }

    fn hvac_contribution(&self, minutes: f64) -> f64 {
        let position = (minutes % self.hvac_cycle_minutes) / self.hvac_cycle_minutes;
        if position < self.hvac_duty {
            self.hvac_boost * (position / self.hvac_duty * PI).sin()
        } else {
            0.0
        }
    }

    /// Noisy temperature reading at `minutes`, rounded to 0.1 °C.
    pub fn temperature<R>(&self, minutes: f64, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let noise: f64 = rng.sample(StandardNormal);
        round_to_tenth(self.expected_temperature(minutes) + noise * self.temperature_noise)
    }

    /// Noisy humidity reading at `minutes` given the current temperature,
    /// clamped to the model's range and rounded to whole percent.
    pub fn humidity<R>(&self, minutes: f64, temperature: f64, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let hours = minutes / 60.0;
        let noise: f64 = rng.sample(StandardNormal);
        let humidity = self.evening_humidity
            + (self.evening_temperature - temperature) * self.humidity_per_degree
            + hours * self.breath_moisture_per_hour
            + noise * self.humidity_noise;
        humidity.clamp(self.min_humidity, self.max_humidity).round()
    }
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_cooling_curve() {
        let model = OvernightModel::default();
        // Outside the heating window the curve is pure exponential decay.
        let at_3h = model.expected_temperature(180.0);
        let expected = 10.0 + 13.3 * (-0.24_f64).exp();
        assert!((at_3h - expected).abs() < 1e-9);

        let mut previous = f64::INFINITY;
        for hour in 1..=8 {
            let t = model.expected_temperature(f64::from(hour) * 60.0 - 30.0);
            assert!(t < previous);
            previous = t;
        }
    }

    #[test]
    fn test_hvac_bump_peaks_mid_duty() {
        let model = OvernightModel::default();
        // Peak of the bump is at 10% of a 120-minute cycle.
        assert!((model.hvac_contribution(12.0) - 0.3).abs() < 1e-9);
        assert!((model.hvac_contribution(132.0) - 0.3).abs() < 1e-9);
        assert_eq!(model.hvac_contribution(24.0), 0.0);
        assert_eq!(model.hvac_contribution(60.0), 0.0);
    }

    #[test]
    fn test_noisy_readings_stay_in_range() {
        let model = OvernightModel::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for step in 0..2880 {
            let minutes = f64::from(step) / 6.0;
            let t = model.temperature(minutes, &mut rng);
            let h = model.humidity(minutes, t, &mut rng);
            assert!((t - model.expected_temperature(minutes)).abs() < 1.0);
            assert_eq!(round_to_tenth(t), t);
            assert!((50.0..=78.0).contains(&h));
            assert_eq!(h.fract(), 0.0);
        }
    }

    #[test]
    fn test_noiseless_humidity() {
        let model = OvernightModel {
            humidity_noise: 0.0,
            ..OvernightModel::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        // 57 + 2.5 * (23.3 - 21.3) + 0.5 * 2 = 63
        assert_eq!(model.humidity(120.0, 21.3, &mut rng), 63.0);
        assert_eq!(model.humidity(0.0, 0.0, &mut rng), 78.0);
    }
}
