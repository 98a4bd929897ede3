use chrono::{NaiveDate, NaiveDateTime, Timelike as _};
use climalog_stats::{
    StatResult,
    descriptive::{self, DescriptiveStats},
};
use climalog_store::SampleSeries;

/// Minimum, maximum and mean of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Span {
    fn of(values: &[f64]) -> StatResult<Self> {
        let stats = DescriptiveStats::new(values);
        Ok(Self {
            min: stats.min?,
            max: stats.max?,
            mean: stats.mean?,
        })
    }
}

/// Averages of the samples taken within one clock hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyAverage {
    pub date: NaiveDate,
    /// Hour of day, `0..24`.
    pub hour: u32,
    pub count: usize,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
}

/// Overview of a generated night.
#[derive(Debug, Clone, PartialEq)]
pub struct NightSummary {
    pub count: usize,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
    pub temperature: Span,
    pub humidity: Span,
    /// One entry per clock hour, in series order.
    pub hourly: Vec<HourlyAverage>,
}

impl NightSummary {
    /// Summarizes `series`. Undefined for an empty series.
    pub fn new(series: &SampleSeries) -> StatResult<Self> {
        let temperature = Span::of(&series.temperatures())?;
        let humidity = Span::of(&series.humidities())?;
        let (first, last) = series
            .time_range()
            .ok_or(climalog_stats::Undefined::EmptyInput)?;
        Ok(Self {
            count: series.len(),
            first,
            last,
            temperature,
            humidity,
            hourly: hourly_averages(series)?,
        })
    }
}

/// Groups consecutive samples by clock hour and averages each group.
pub fn hourly_averages(series: &SampleSeries) -> StatResult<Vec<HourlyAverage>> {
    let mut groups: Vec<((NaiveDate, u32), Vec<f64>, Vec<f64>)> = vec![];
    for sample in series {
        let key = (sample.timestamp().date(), sample.timestamp().hour());
        match groups.last_mut() {
            Some((last_key, temperatures, humidities)) if *last_key == key => {
                temperatures.push(sample.temperature());
                humidities.push(sample.humidity());
            }
            _ => groups.push((key, vec![sample.temperature()], vec![sample.humidity()])),
        }
    }

    groups
        .into_iter()
        .map(|((date, hour), temperatures, humidities)| {
            Ok(HourlyAverage {
                date,
                hour,
                count: temperatures.len(),
                mean_temperature: descriptive::mean(&temperatures)?,
                mean_humidity: descriptive::mean(&humidities)?,
            })
        })
        .collect()
}
