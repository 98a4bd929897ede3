use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use climalog_collector::CollectorConfig;

/// Where a JSON document goes: a file if a path was given, stdout otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn new(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn destination(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.destination()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to finish writing {}", self.destination()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Writes `value` as JSON to `path`, or to stdout if no path is given.
pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    Output::new(path)?.write_json(value)
}

/// Reads a JSON document; `file_kind` names the file in error messages.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read collector settings from a JSON file
///
/// Fields missing from the file keep their defaults.
pub fn read_collector_config<P>(path: P) -> anyhow::Result<CollectorConfig>
where
    P: AsRef<Path>,
{
    read_json_file("collector config", path)
}
