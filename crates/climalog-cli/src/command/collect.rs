use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use climalog_collector::{
    Clock, CollectionSummary, CollectorConfig, DataCollector, ManualClock, SystemClock,
};
use climalog_synth::{OvernightModel, SimulatedSensor};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::util;

#[derive(Default, Debug, Clone, Args)]
pub(crate) struct CollectArg {
    /// Collector settings JSON file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sample CSV file to append to
    #[arg(long)]
    output: Option<PathBuf>,
    /// Seconds between readings
    #[arg(long)]
    interval: Option<u64>,
    /// Number of readings to collect
    #[arg(long)]
    target: Option<usize>,
    /// Read attempts per reading
    #[arg(long)]
    max_attempts: Option<u32>,
    /// Delay after a failed read attempt, in milliseconds
    #[arg(long)]
    backoff_ms: Option<u64>,
    /// Probability that a simulated sensor read fails
    #[arg(long, default_value_t = 0.05)]
    failure_rate: f64,
    /// Seed of the simulated sensor
    #[arg(long)]
    seed: Option<u64>,
    /// Advance a simulated clock instead of waiting between readings
    #[arg(long)]
    no_wait: bool,
}

impl CollectArg {
    fn collector_config(&self) -> anyhow::Result<CollectorConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_collector_config(path)?,
            None => CollectorConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output_file.clone_from(output);
        }
        if let Some(interval) = self.interval {
            config.sample_interval_secs = interval;
        }
        if let Some(target) = self.target {
            config.target_readings = target;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        if let Some(backoff_ms) = self.backoff_ms {
            config.retry.backoff_ms = backoff_ms;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &CollectArg) -> anyhow::Result<()> {
    let config = arg.collector_config()?;
    let rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let interval_secs = u32::try_from(config.sample_interval_secs).unwrap_or(u32::MAX);
    let sensor = SimulatedSensor::new(OvernightModel::default(), rng, interval_secs)
        .with_failure_probability(arg.failure_rate);

    let summary = if arg.no_wait {
        let clock = ManualClock::new(SystemClock.now());
        collect(sensor, clock, config)?
    } else {
        collect(sensor, SystemClock, config)?
    };

    println!("\nCollection complete!");
    println!("Total readings: {}", summary.readings);
    println!("Total errors: {}", summary.errors);
    println!("Error rate: {:.1}%", summary.error_rate() * 100.0);
    Ok(())
}

fn collect<S, C>(sensor: S, clock: C, config: CollectorConfig) -> anyhow::Result<CollectionSummary>
where
    S: climalog_collector::Sensor,
    C: Clock,
{
    let output = config.output_file.clone();
    let mut collector = DataCollector::new(sensor, clock, config)
        .with_context(|| format!("Failed to prepare {}", output.display()))?;
    collector
        .run()
        .with_context(|| format!("Collection into {} stopped", output.display()))
}
