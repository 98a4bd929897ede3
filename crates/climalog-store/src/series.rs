use chrono::NaiveDateTime;

use crate::sample::Sample;

/// Samples in chronological (insertion) order.
///
/// The series is append-only: samples can be pushed but never updated or removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample at the end of the series.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Timestamps of the first and last sample.
    #[must_use]
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.first()?.timestamp(), self.last()?.timestamp()))
    }

    /// All temperatures, in series order.
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::temperature).collect()
    }

    /// All humidities, in series order.
    #[must_use]
    pub fn humidities(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::humidity).collect()
    }

    /// All timestamps, in series order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.samples.iter().map(Sample::timestamp).collect()
    }
}

impl From<Vec<Sample>> for SampleSeries {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

impl FromIterator<Sample> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
