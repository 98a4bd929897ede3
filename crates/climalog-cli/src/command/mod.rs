use clap::{Parser, Subcommand};
use tracing::Level;

use self::{analyze::AnalyzeArg, collect::CollectArg, generate::GenerateArg};

mod analyze;
mod collect;
mod generate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug messages
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print a statistical report of a sample file
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Poll a sensor and append readings to a sample file
    Collect(#[clap(flatten)] CollectArg),
    /// Write a synthetic overnight sample file
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Collect(arg) => collect::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

/// Sends log output to stderr so that stdout only carries reports.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
