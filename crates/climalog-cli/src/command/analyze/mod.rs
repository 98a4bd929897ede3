//! Statistical report of a sample file.

mod render;

use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Args;
use climalog_analysis::{AnalysisOptions, analyze};

use crate::util;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Sample CSV file to analyze
    #[arg(default_value = "sensor_data.csv")]
    pub file: PathBuf,

    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Number of frequency distribution bins
    #[arg(long, default_value_t = AnalysisOptions::default().histogram_bins)]
    bins: usize,

    /// Temperature the mean is tested against, in °C
    #[arg(long, default_value_t = AnalysisOptions::default().reference_temperature)]
    reference: f64,

    /// Confidence level of the interval for the mean
    #[arg(long, default_value_t = AnalysisOptions::default().confidence)]
    confidence: f64,

    /// |z| above which a value is reported as an outlier
    #[arg(long, default_value_t = AnalysisOptions::default().z_threshold)]
    z_threshold: f64,

    /// Window length of the rolling statistics
    #[arg(long, default_value_t = AnalysisOptions::default().rolling_window)]
    window: usize,
}

impl AnalyzeArg {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            histogram_bins: self.bins,
            reference_temperature: self.reference,
            confidence: self.confidence,
            z_threshold: self.z_threshold,
            rolling_window: self.window,
            ..AnalysisOptions::default()
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let report = analyze(&arg.file, &arg.options())
        .with_context(|| format!("Failed to analyze {}", arg.file.display()))?;
    tracing::info!(samples = report.sample_count, file = %arg.file.display(), "loaded samples");

    if arg.format == ReportFormat::Text {
        render::write_report(&mut io::stdout().lock(), &arg.file, &report)
            .context("Failed to write report")?;
    }
    if arg.format == ReportFormat::Json || arg.output.is_some() {
        util::save_json(&report, arg.output.clone())?;
    }
    Ok(())
}
