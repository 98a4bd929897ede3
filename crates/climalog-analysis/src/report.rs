use std::path::Path;

use chrono::NaiveDateTime;
use climalog_stats::{
    StatResult, Undefined,
    comprehensive::ComprehensiveStats,
    correlation::{self, Interpretation},
    descriptive,
    hypothesis::{self, TTest},
    rolling,
};
use climalog_store::{SampleSeries, StoreError, file};
use serde::Serialize;

use crate::options::AnalysisOptions;

/// Everything the analysis of a sample file computes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub sample_count: usize,
    /// Timestamps of the first and last sample.
    pub time_range: Option<TimeRange>,
    pub temperature: ComprehensiveStats,
    pub humidity: ComprehensiveStats,
    /// One-sample t-test of the temperature against the reference temperature.
    pub reference_test: StatResult<ReferenceTest>,
    /// Welch t-test of the first half of the temperatures against the second.
    pub period_comparison: StatResult<PeriodComparison>,
    pub correlation: CorrelationSummary,
    /// Rolling temperature statistics; undefined for short series.
    pub rolling: StatResult<RollingSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceTest {
    /// Hypothesized mean temperature, in °C.
    pub reference: f64,
    pub test: TTest,
    pub critical_value: f64,
    /// `|t| > critical_value`.
    pub rejected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub first_half_count: usize,
    pub first_half_mean: f64,
    pub second_half_count: usize,
    pub second_half_mean: f64,
    pub test: TTest,
    pub critical_value: f64,
    /// `|t| > critical_value`.
    pub significant: bool,
}

/// Relationship between temperature and humidity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationSummary {
    pub coefficient: StatResult<f64>,
    pub covariance: StatResult<f64>,
    pub interpretation: Option<Interpretation>,
}

/// Rolling temperature statistics.
///
/// Element `i` of every vector belongs to the window that ends at
/// `window_end[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingSummary {
    pub window: usize,
    pub window_end: Vec<NaiveDateTime>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

/// Loads the sample file at `path` and analyzes it.
pub fn analyze<P>(path: P, options: &AnalysisOptions) -> Result<AnalysisReport, StoreError>
where
    P: AsRef<Path>,
{
    let series = file::load(path)?;
    Ok(AnalysisReport::from_series(&series, options))
}

impl AnalysisReport {
    #[must_use]
    pub fn from_series(series: &SampleSeries, options: &AnalysisOptions) -> Self {
        let temperatures = series.temperatures();
        let humidities = series.humidities();
        tracing::debug!(samples = series.len(), "analyzing series");

        let per_variable = |values: &[f64]| {
            ComprehensiveStats::new(
                values,
                options.histogram_bins,
                options.confidence,
                options.z_threshold,
            )
        };

        Self {
            sample_count: series.len(),
            time_range: series
                .time_range()
                .map(|(start, end)| TimeRange { start, end }),
            temperature: per_variable(&temperatures),
            humidity: per_variable(&humidities),
            reference_test: reference_test(&temperatures, options),
            period_comparison: period_comparison(&temperatures, options),
            correlation: CorrelationSummary::new(&temperatures, &humidities),
            rolling: RollingSummary::new(series, &temperatures, options),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

fn reference_test(temperatures: &[f64], options: &AnalysisOptions) -> StatResult<ReferenceTest> {
    let test = hypothesis::one_sample_t_test(temperatures, options.reference_temperature)?;
    Ok(ReferenceTest {
        reference: options.reference_temperature,
        test,
        critical_value: options.critical_value,
        rejected: test.rejects_at(options.critical_value),
    })
}

fn period_comparison(
    temperatures: &[f64],
    options: &AnalysisOptions,
) -> StatResult<PeriodComparison> {
    let (first, second) = temperatures.split_at(temperatures.len() / 2);
    let test = hypothesis::two_sample_t_test(first, second)?;
    Ok(PeriodComparison {
        first_half_count: first.len(),
        first_half_mean: descriptive::mean(first)?,
        second_half_count: second.len(),
        second_half_mean: descriptive::mean(second)?,
        test,
        critical_value: options.critical_value,
        significant: test.rejects_at(options.critical_value),
    })
}

impl CorrelationSummary {
    fn new(temperatures: &[f64], humidities: &[f64]) -> Self {
        let coefficient = correlation::correlation(temperatures, humidities);
        Self {
            coefficient,
            covariance: correlation::covariance(temperatures, humidities),
            interpretation: coefficient.ok().map(Interpretation::of),
        }
    }
}

impl RollingSummary {
    fn new(
        series: &SampleSeries,
        temperatures: &[f64],
        options: &AnalysisOptions,
    ) -> StatResult<Self> {
        if temperatures.len() < options.rolling_min_samples {
            return Err(Undefined::TooFewValues {
                required: options.rolling_min_samples,
                actual: temperatures.len(),
            });
        }
        let window = options.rolling_window;
        let mean = rolling::rolling_mean(temperatures, window)?;
        let std_dev = rolling::rolling_std(temperatures, window)?;
        let window_end = series
            .iter()
            .skip(window - 1)
            .map(climalog_store::Sample::timestamp)
            .collect();
        Ok(Self {
            window,
            window_end,
            mean,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use climalog_store::Sample;

    use super::*;

    fn series_from(temperatures: &[f64], humidities: &[f64]) -> SampleSeries {
        let start: NaiveDateTime = "2024-12-23T22:00:00".parse().unwrap();
        temperatures
            .iter()
            .zip(humidities)
            .zip(0..)
            .map(|((&t, &h), i)| Sample::new(start + TimeDelta::seconds(10 * i), t, h).unwrap())
            .collect()
    }

    fn cooling_night(n: usize) -> SampleSeries {
        let temperatures: Vec<f64> = (0..n).map(|i| 23.0 - 0.01 * i as f64 + 0.1 * (i % 3) as f64).collect();
        let humidities: Vec<f64> = temperatures.iter().map(|t| 57.0 + 2.5 * (23.3 - t)).collect();
        series_from(&temperatures, &humidities)
    }

    #[test]
    fn test_empty_series() {
        let report = AnalysisReport::from_series(&SampleSeries::new(), &AnalysisOptions::default());
        assert!(report.is_empty());
        assert_eq!(report.time_range, None);
        assert_eq!(report.temperature.descriptive.mean, Err(Undefined::EmptyInput));
        assert_eq!(report.reference_test, Err(Undefined::EmptyInput));
        assert_eq!(report.period_comparison, Err(Undefined::EmptyInput));
        assert_eq!(report.correlation.interpretation, None);
        assert!(report.rolling.is_err());
    }

    #[test]
    fn test_single_sample() {
        let report =
            AnalysisReport::from_series(&series_from(&[21.0], &[60.0]), &AnalysisOptions::default());
        assert_eq!(report.sample_count, 1);
        assert_eq!(report.temperature.descriptive.mean, Ok(21.0));
        assert_eq!(
            report.temperature.descriptive.std_dev,
            Err(Undefined::TooFewValues {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(report.correlation.coefficient, report.correlation.covariance);
        assert!(report.reference_test.is_err());
    }

    #[test]
    fn test_reference_test_rejects_warm_room() {
        let series = series_from(
            &[24.0, 24.2, 23.8, 24.1, 23.9, 24.0],
            &[55.0, 56.0, 55.0, 54.0, 55.0, 56.0],
        );
        let report = AnalysisReport::from_series(&series, &AnalysisOptions::default());
        let reference = report.reference_test.unwrap();
        assert_eq!(reference.reference, 22.0);
        assert_eq!(reference.test.degrees_of_freedom, 5.0);
        assert!(reference.test.t_statistic > 2.0);
        assert!(reference.rejected);
    }

    #[test]
    fn test_period_comparison_splits_halves() {
        let series = series_from(
            &[23.0, 23.2, 22.8, 23.1, 20.0, 20.3, 19.8, 20.1, 20.0],
            &[57.0; 9],
        );
        let comparison = AnalysisReport::from_series(&series, &AnalysisOptions::default())
            .period_comparison
            .unwrap();
        assert_eq!(comparison.first_half_count, 4);
        assert_eq!(comparison.second_half_count, 5);
        assert!((comparison.first_half_mean - 23.025).abs() < 1e-9);
        assert!(comparison.test.t_statistic > 0.0);
        assert!(comparison.significant);
    }

    #[test]
    fn test_constant_humidity_has_no_correlation() {
        let series = series_from(&[20.0, 21.0, 22.0], &[60.0, 60.0, 60.0]);
        let report = AnalysisReport::from_series(&series, &AnalysisOptions::default());
        assert_eq!(report.correlation.coefficient, Err(Undefined::ZeroDeviation));
        assert_eq!(report.correlation.covariance, Ok(0.0));
        assert_eq!(report.correlation.interpretation, None);
    }

    #[test]
    fn test_cooling_night_correlation_is_strong_negative() {
        let report = AnalysisReport::from_series(&cooling_night(120), &AnalysisOptions::default());
        let r = report.correlation.coefficient.unwrap();
        assert!((r + 1.0).abs() < 1e-9);
        let interpretation = report.correlation.interpretation.unwrap();
        assert_eq!(
            interpretation.strength,
            climalog_stats::correlation::Strength::Strong
        );
        assert_eq!(
            interpretation.direction,
            climalog_stats::correlation::Direction::Negative
        );
    }

    #[test]
    fn test_rolling_requires_min_samples() {
        let report = AnalysisReport::from_series(&cooling_night(29), &AnalysisOptions::default());
        assert_eq!(
            report.rolling,
            Err(Undefined::TooFewValues {
                required: 30,
                actual: 29
            })
        );
    }

    #[test]
    fn test_rolling_aligns_window_ends() {
        let series = cooling_night(30);
        let report = AnalysisReport::from_series(&series, &AnalysisOptions::default());
        let rolling = report.rolling.unwrap();
        assert_eq!(rolling.window, 20);
        assert_eq!(rolling.mean.len(), 11);
        assert_eq!(rolling.std_dev.len(), 11);
        assert_eq!(rolling.window_end.len(), 11);
        assert_eq!(rolling.window_end[0], series.as_slice()[19].timestamp());
        assert_eq!(rolling.window_end.last(), series.last().map(|s| s.timestamp()).as_ref());

        let expected: f64 = series.temperatures()[..20].iter().sum::<f64>() / 20.0;
        assert!((rolling.mean[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor_data.csv");
        let series = cooling_night(50);
        file::write_series(&path, &series).unwrap();

        let report = analyze(&path, &AnalysisOptions::default()).unwrap();
        assert_eq!(report, AnalysisReport::from_series(&series, &AnalysisOptions::default()));
        assert_eq!(
            report.time_range,
            Some(TimeRange {
                start: "2024-12-23T22:00:00".parse().unwrap(),
                end: "2024-12-23T22:08:10".parse().unwrap(),
            })
        );
    }

    #[test]
    fn test_analyze_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(analyze(dir.path().join("nope.csv"), &AnalysisOptions::default()).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let report = AnalysisReport::from_series(&cooling_night(40), &AnalysisOptions::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sample_count"], 40);
        assert_eq!(json["time_range"]["start"], "2024-12-23T22:00:00");
        assert_eq!(json["rolling"]["Ok"]["window"], 20);
        assert_eq!(
            json["correlation"]["interpretation"]["direction"],
            "Negative"
        );
    }
}
