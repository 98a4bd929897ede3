//! Reading and writing the sample CSV file.
//!
//! The file starts with the header row `timestamp,temperature_c,humidity_pct`
//! and holds one sample per line:
//!
//! ```text
//! timestamp,temperature_c,humidity_pct
//! 2024-12-23T22:00:00,23.3,57.0
//! 2024-12-23T22:00:10,23.2,58.0
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::{sample::Sample, series::SampleSeries};

/// Column names of the sample file, in order.
pub const HEADER: [&str; 3] = ["timestamp", "temperature_c", "humidity_pct"];

/// Failure to read or write a sample file.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to open sample file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read sample file header: {source}")]
    Header { source: csv::Error },
    #[display("sample file is missing column `{column}`")]
    MissingColumn { column: &'static str },
    #[display("malformed sample at line {line}: {source}")]
    Malformed { line: u64, source: csv::Error },
    #[display("invalid sample at line {line}: {source}")]
    InvalidSample {
        line: u64,
        source: crate::sample::InvalidSample,
    },
    #[display("failed to write sample file {}: {source}", path.display())]
    Write { path: PathBuf, source: csv::Error },
}

/// Loads every sample of the file at `path`.
///
/// Loading is all-or-nothing: the first row that cannot be parsed or that
/// holds impossible values aborts the load.
pub fn load<P>(path: P) -> Result<SampleSeries, StoreError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| StoreError::Open {
        path: path.to_owned(),
        source,
    })?;
    let series = read_samples(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), samples = series.len(), "loaded sample file");
    Ok(series)
}

/// Parses samples from CSV text with a header row.
pub fn read_samples<R>(reader: R) -> Result<SampleSeries, StoreError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| StoreError::Header { source })?
        .clone();
    if let Some(column) = HEADER
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(StoreError::MissingColumn { column });
    }

    let mut series = SampleSeries::new();
    for record in reader.records() {
        let record = record.map_err(|source| StoreError::Malformed {
            line: source.position().map_or(0, csv::Position::line),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let sample: Sample = record
            .deserialize(Some(&headers))
            .map_err(|source| StoreError::Malformed { line, source })?;
        sample
            .validate()
            .map_err(|source| StoreError::InvalidSample { line, source })?;
        series.push(sample);
    }
    Ok(series)
}

/// Creates the file with only a header row if it does not exist yet.
///
/// Returns `true` if the file was created.
pub fn create_if_missing<P>(path: P) -> Result<bool, StoreError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    write_series(path, &SampleSeries::new())?;
    tracing::info!(path = %path.display(), "created sample file");
    Ok(true)
}

/// Appends one sample, writing the header first if the file is new or empty.
pub fn append<P>(path: P, sample: &Sample) -> Result<(), StoreError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_error = |source: csv::Error| StoreError::Write {
        path: path.to_owned(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StoreError::Open {
            path: path.to_owned(),
            source,
        })?;
    let is_empty = file
        .metadata()
        .map_err(|e| write_error(e.into()))?
        .len()
        == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_empty {
        writer.write_record(HEADER).map_err(write_error)?;
    }
    writer.serialize(sample).map_err(write_error)?;
    writer.flush().map_err(|e| write_error(e.into()))?;
    Ok(())
}

/// Writes `series` to `path`, replacing any existing file.
pub fn write_series<P>(path: P, series: &SampleSeries) -> Result<(), StoreError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_error = |source: csv::Error| StoreError::Write {
        path: path.to_owned(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;
    writer.write_record(HEADER).map_err(write_error)?;
    for sample in series {
        writer.serialize(sample).map_err(write_error)?;
    }
    writer.flush().map_err(|e| write_error(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: &str, temperature: f64, humidity: f64) -> Sample {
        Sample::new(ts.parse().unwrap(), temperature, humidity).unwrap()
    }

    #[test]
    fn test_read_samples() {
        let csv = "timestamp,temperature_c,humidity_pct\n\
                   2024-12-23T22:00:00,23.3,57\n\
                   2024-12-23T22:00:10.250000,23.2,58.0\n";
        let series = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(
            series.as_slice(),
            [
                sample("2024-12-23T22:00:00", 23.3, 57.0),
                sample("2024-12-23T22:00:10.25", 23.2, 58.0),
            ]
        );
    }

    #[test]
    fn test_read_samples_accepts_reordered_columns() {
        let csv = "humidity_pct,timestamp,temperature_c\n57,2024-12-23T22:00:00,23.3\n";
        let series = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(series.temperatures(), [23.3]);
    }

    #[test]
    fn test_header_only_is_empty_series() {
        let series = read_samples("timestamp,temperature_c,humidity_pct\n".as_bytes()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "timestamp,temperature_c\n2024-12-23T22:00:00,23.3\n";
        let err = read_samples(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingColumn {
                column: "humidity_pct"
            }
        ));
    }

    #[test]
    fn test_non_numeric_field_aborts_load() {
        let csv = "timestamp,temperature_c,humidity_pct\n\
                   2024-12-23T22:00:00,23.3,57\n\
                   2024-12-23T22:00:10,warm,58\n\
                   2024-12-23T22:00:20,23.1,58\n";
        let err = read_samples(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_bad_timestamp_aborts_load() {
        let csv = "timestamp,temperature_c,humidity_pct\nyesterday,23.3,57\n";
        let err = read_samples(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_short_row_aborts_load() {
        let csv = "timestamp,temperature_c,humidity_pct\n2024-12-23T22:00:00,23.3\n";
        assert!(read_samples(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_out_of_range_humidity_aborts_load() {
        let csv = "timestamp,temperature_c,humidity_pct\n2024-12-23T22:00:00,23.3,120\n";
        let err = read_samples(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidSample { line: 2, .. }),
            "{err}"
        );
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensor_data.csv");
        let series = SampleSeries::from(vec![
            sample("2024-12-23T22:00:00", 23.3, 57.0),
            sample("2024-12-23T22:00:10", 23.0, 58.0),
            sample("2024-12-23T22:00:20.123456", 19.5, 68.5),
            sample("2024-12-23T22:00:30", -2.1, 0.0),
        ]);

        write_series(&path, &series).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, series);

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("timestamp,temperature_c,humidity_pct"));
        assert_eq!(lines.next(), Some("2024-12-23T22:00:00,23.3,57.0"));
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        append(&path, &sample("2024-12-23T22:00:00", 23.3, 57.0)).unwrap();
        append(&path, &sample("2024-12-23T22:00:10", 23.2, 57.0)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("timestamp").count(), 1);
        assert_eq!(load(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_create_if_missing_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        assert!(create_if_missing(&path).unwrap());
        assert!(load(&path).unwrap().is_empty());

        append(&path, &sample("2024-12-23T22:00:00", 23.3, 57.0)).unwrap();
        assert!(!create_if_missing(&path).unwrap());
        assert_eq!(load(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }
}
