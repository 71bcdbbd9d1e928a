//! Offline zero-phase filtering of text sample matrices, and filter-bank
//! generation, driven by a JSON configuration file.
use zerophase::config::Config;
use zerophase::datasource::{read_matrix, write_bank, write_matrix};
use zerophase::{filter_bank, filtfilt};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "ZEROPHASE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(name = env!("CARGO_BIN_NAME"))]
/// Zero-phase filter and filter-bank tool
///
/// JSON Configuration Syntax:
///
/// Config = {
///     ( "filter" : Filter )*,
///     ( "bank" : Bank )*
/// };
/// Filter = {
///     ( "b" : [ number+ ] )*,
///     ( "a" : [ number+ ] )*,
///     ( "order" : number )*,
///     ( "cutoff" : [ number+ ] )*,
///     ( "band" : "lowpass" | "highpass" | "bandpass" | "bandstop" )*,
///     ( "sample_rate" : number )*,
/// };
/// Bank = {
///     "freqs" : [ number+ ],
///     ( "cycles" : [ number ] | [ number, number ] )*,
///     ( "window" : "morlet" | "hanning" )*,
///     ( "sample_rate" : number )*,
///     ( "winsize" : number )*,
///     ( "time_support" : number )*,
/// };
///
/// Any scalar setting can be overridden from the environment, e.g.
/// ZEROPHASE__FILTER__ORDER=6.
pub struct Cli {
    /// Configuration file to use (JSON format)
    #[arg(short = 'c')]
    config_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter every column of a sample matrix forward and backward.
    ///
    /// The input holds one sample per line and one channel per
    /// whitespace-separated column. A single line is a row vector and is
    /// written back as a single line.
    Filter {
        /// Sample matrix to filter
        #[arg(short = 'i')]
        input: PathBuf,

        /// Where to write the result (default: stdout)
        #[arg(short = 'o')]
        output: Option<PathBuf>,
    },
    /// Generate the configured wavelet / short-time Fourier windows.
    Bank {
        /// Where to write the windows (default: stdout)
        #[arg(short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::new(&cli.config_path, ENV_PREFIX, ENV_SEPARATOR)
        .context("Failed to load configuration")?;

    match &cli.command {
        Command::Filter { input, output } => run_filter(&config, input, output.as_deref()),
        Command::Bank { output } => run_bank(&config, output.as_deref()),
    }
}

// Read a sample matrix, zero-phase filter it and write it out in the same
// orientation.
fn run_filter(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let filter = config
        .filter
        .as_ref()
        .context("Configuration has no \"filter\" section")?;
    let (b, a) = filter
        .coefficients()
        .context("Failed to build filter coefficients")?;
    let x = read_matrix(input)
        .with_context(|| format!("Failed to read samples from {}", input.display()))?;
    info!(
        "filtering {}x{} samples with {} numerator / {} denominator taps",
        x.nrows(),
        x.ncols(),
        b.len(),
        a.len()
    );

    let y = filtfilt(&b, &a, &x).context("Filtering failed")?;

    let mut out = open_output(output)?;
    write_matrix(&mut out, &y).context("Failed to write filtered samples")?;
    out.flush().context("Failed to write filtered samples")?;
    Ok(())
}

fn run_bank(config: &Config, output: Option<&Path>) -> Result<()> {
    let bank_config = config
        .bank
        .as_ref()
        .context("Configuration has no \"bank\" section")?;
    let options = bank_config
        .options()
        .context("Invalid filter bank settings")?;
    let bank = filter_bank(&bank_config.freqs, &options).context("Failed to build filter bank")?;
    info!("generated {} windows", bank.len());

    let mut out = open_output(output)?;
    write_bank(&mut out, &bank_config.freqs, &bank).context("Failed to write filter bank")?;
    out.flush().context("Failed to write filter bank")?;
    Ok(())
}

/// Open the requested output file, or stdout when none was given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
