//! Text rendering of an analysis report.

use std::{io, path::Path};

use climalog_analysis::{AnalysisReport, CorrelationSummary, RollingSummary};
use climalog_stats::{
    StatResult,
    comprehensive::ComprehensiveStats,
    descriptive::DescriptiveStats,
    distribution::{FrequencyBin, IqrOutliers},
};

/// Width of a histogram bar at relative frequency 1.0.
const HISTOGRAM_WIDTH: f64 = 40.0;
/// Number of IQR outliers listed by value.
const LISTED_OUTLIERS: usize = 5;

/// Formats a defined statistic with `f`, or names why it is undefined.
fn stat<T, F>(value: &StatResult<T>, f: F) -> String
where
    F: FnOnce(&T) -> String,
{
    match value {
        Ok(v) => f(v),
        Err(e) => format!("undefined ({e})"),
    }
}

fn print_section<W>(w: &mut W, title: &str) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w)?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "  {title}")?;
    writeln!(w, "{}", "=".repeat(60))
}

pub(super) fn write_report<W>(w: &mut W, file: &Path, report: &AnalysisReport) -> io::Result<()>
where
    W: io::Write,
{
    let Some(time_range) = report.time_range else {
        return writeln!(w, "No readings found in {}", file.display());
    };
    writeln!(
        w,
        "Loaded {} readings from {}",
        report.sample_count,
        file.display()
    )?;
    writeln!(w, "Time range: {} to {}", time_range.start, time_range.end)?;

    print_section(w, "TEMPERATURE ANALYSIS (°C)")?;
    write_variable(w, &report.temperature, "°C")?;
    write_reference_test(w, report)?;

    print_section(w, "HUMIDITY ANALYSIS (%)")?;
    write_variable(w, &report.humidity, "%")?;

    print_section(w, "PERIOD COMPARISON (Temperature, first vs second half)")?;
    write_period_comparison(w, report)?;

    print_section(w, "CORRELATION ANALYSIS")?;
    write_correlation(w, &report.correlation)?;

    print_section(w, "FREQUENCY DISTRIBUTION (Temperature)")?;
    match &report.temperature.distribution {
        Ok(bins) => write_histogram(w, bins)?,
        Err(e) => writeln!(w, "\nundefined ({e})")?,
    }

    print_section(w, "ROLLING STATISTICS (Temperature)")?;
    match &report.rolling {
        Ok(rolling) => write_rolling(w, rolling)?,
        Err(e) => writeln!(w, "\nSkipped: {e}")?,
    }
    Ok(())
}

fn write_variable<W>(w: &mut W, stats: &ComprehensiveStats, unit: &str) -> io::Result<()>
where
    W: io::Write,
{
    write_descriptive(w, &stats.descriptive, unit)?;

    writeln!(w, "\nQuartiles:")?;
    match &stats.quartiles {
        Ok(q) => {
            writeln!(w, "  Q1 (25%):   {:.2}{unit}", q.q1)?;
            writeln!(w, "  Q2 (50%):   {:.2}{unit}", q.q2)?;
            writeln!(w, "  Q3 (75%):   {:.2}{unit}", q.q3)?;
            writeln!(w, "  IQR:        {:.2}{unit}", q.iqr())?;
        }
        Err(e) => writeln!(w, "  undefined ({e})")?,
    }

    match &stats.confidence_interval {
        Ok(ci) => {
            writeln!(
                w,
                "\n{:.0}% Confidence Interval for Mean:",
                ci.confidence * 100.0
            )?;
            writeln!(w, "  [{:.2}{unit}, {:.2}{unit}]", ci.lower, ci.upper)?;
        }
        Err(e) => {
            writeln!(w, "\nConfidence Interval for Mean:")?;
            writeln!(w, "  undefined ({e})")?;
        }
    }

    writeln!(w, "\nOutlier Detection (IQR method):")?;
    match &stats.iqr_outliers {
        Ok(outliers) => write_iqr_outliers(w, outliers, unit)?,
        Err(e) => writeln!(w, "  undefined ({e})")?,
    }

    writeln!(w, "\nOutlier Detection (z-score method):")?;
    let z_outliers = stat(&stats.zscore_outliers, |outliers| {
        outliers.len().to_string()
    });
    writeln!(w, "  Outliers found: {z_outliers}")
}

fn write_descriptive<W>(w: &mut W, stats: &DescriptiveStats, unit: &str) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w, "\nDescriptive Statistics:")?;
    writeln!(w, "  Mean:       {}", stat(&stats.mean, |v| format!("{v:.2}{unit}")))?;
    writeln!(w, "  Median:     {}", stat(&stats.median, |v| format!("{v:.2}{unit}")))?;
    writeln!(w, "  Mode:       {}", stat(&stats.mode, |v| format!("{v}{unit}")))?;
    writeln!(w, "  Std Dev:    {}", stat(&stats.std_dev, |v| format!("{v:.3}{unit}")))?;
    writeln!(w, "  Variance:   {}", stat(&stats.variance, |v| format!("{v:.4}")))?;
    writeln!(w, "  Range:      {}", stat(&stats.range, |v| format!("{v:.1}{unit}")))?;
    writeln!(
        w,
        "  CV:         {}",
        stat(&stats.coefficient_of_variation, |v| format!("{v:.2}%"))
    )
}

fn write_iqr_outliers<W>(w: &mut W, outliers: &IqrOutliers, unit: &str) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(w, "  Lower bound: {:.2}{unit}", outliers.lower_bound)?;
    writeln!(w, "  Upper bound: {:.2}{unit}", outliers.upper_bound)?;
    writeln!(w, "  Outliers found: {}", outliers.outliers.len())?;
    if !outliers.outliers.is_empty() {
        let listed = outliers
            .outliers
            .iter()
            .take(LISTED_OUTLIERS)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let more = if outliers.outliers.len() > LISTED_OUTLIERS {
            "..."
        } else {
            ""
        };
        writeln!(w, "  Values: [{listed}]{more}")?;
    }
    Ok(())
}

fn write_reference_test<W>(w: &mut W, report: &AnalysisReport) -> io::Result<()>
where
    W: io::Write,
{
    match &report.reference_test {
        Ok(reference) => {
            writeln!(
                w,
                "\nHypothesis Test: Is mean temperature = {}°C?",
                reference.reference
            )?;
            writeln!(w, "  t-statistic: {:.3}", reference.test.t_statistic)?;
            writeln!(
                w,
                "  Degrees of freedom: {}",
                reference.test.degrees_of_freedom
            )?;
            writeln!(
                w,
                "  |t| > {} suggests rejecting H0 at α=0.05",
                reference.critical_value
            )?;
            if reference.rejected {
                writeln!(
                    w,
                    "  Result: Reject H0 - mean differs significantly from {}°C",
                    reference.reference
                )
            } else {
                writeln!(w, "  Result: Fail to reject H0 - insufficient evidence")
            }
        }
        Err(e) => {
            writeln!(w, "\nHypothesis Test:")?;
            writeln!(w, "  undefined ({e})")
        }
    }
}

fn write_period_comparison<W>(w: &mut W, report: &AnalysisReport) -> io::Result<()>
where
    W: io::Write,
{
    let comparison = match &report.period_comparison {
        Ok(comparison) => comparison,
        Err(e) => return writeln!(w, "\nundefined ({e})"),
    };
    writeln!(
        w,
        "\n  First half:  {:>5} readings, mean {:.2}°C",
        comparison.first_half_count, comparison.first_half_mean
    )?;
    writeln!(
        w,
        "  Second half: {:>5} readings, mean {:.2}°C",
        comparison.second_half_count, comparison.second_half_mean
    )?;
    writeln!(
        w,
        "  Welch t-statistic: {:.3} (df {:.1})",
        comparison.test.t_statistic, comparison.test.degrees_of_freedom
    )?;
    if comparison.significant {
        writeln!(w, "  Result: The halves differ significantly")
    } else {
        writeln!(w, "  Result: No significant difference")
    }
}

fn write_correlation<W>(w: &mut W, correlation: &CorrelationSummary) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        w,
        "\nPearson correlation (temp vs humidity): {}",
        stat(&correlation.coefficient, |r| format!("{r:.4}"))
    )?;
    if let Some(interpretation) = &correlation.interpretation {
        writeln!(w, "Interpretation: {interpretation}")?;
    }
    writeln!(
        w,
        "Covariance: {}",
        stat(&correlation.covariance, |c| format!("{c:.4}"))
    )
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn write_histogram<W>(w: &mut W, bins: &[FrequencyBin]) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        w,
        "\n{:>12} {:>8} {:>10} {:>20}",
        "Bin Center", "Count", "Rel Freq", "Histogram"
    )?;
    writeln!(w, "{}", "-".repeat(55))?;
    for bin in bins {
        let bar = "█".repeat((bin.relative_frequency * HISTOGRAM_WIDTH) as usize);
        writeln!(
            w,
            "{:>12.1} {:>8} {:>10.3} {bar}",
            bin.center, bin.count, bin.relative_frequency
        )?;
    }
    Ok(())
}

fn write_rolling<W>(w: &mut W, rolling: &RollingSummary) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        w,
        "\nWindow: {} readings ({} windows)",
        rolling.window,
        rolling.mean.len()
    )?;
    let extremes = |values: &[f64]| {
        values
            .iter()
            .copied()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
    };
    if let Some((lo, hi)) = extremes(&rolling.mean) {
        writeln!(w, "  Rolling mean:    {lo:.2}°C to {hi:.2}°C")?;
    }
    if let Some((lo, hi)) = extremes(&rolling.std_dev) {
        writeln!(w, "  Rolling std dev: {lo:.3}°C to {hi:.3}°C")?;
    }
    Ok(())
}
