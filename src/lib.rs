//! Who's-alive library crate
//!
//! This crate provides the core functionality for the `whos-alive` CLI: it can
//! synthesize a population file of birth/death years clipped to 1900..=2000,
//! and it can read such a file back and report the year(s) in which the most
//! people were alive. It is organized into small modules: `record` (the
//! `;`-delimited file format), `generate` (lifespan sampling), `occupancy`
//! (per-year counting and the peak tie set), `report` (text output), `config`
//! and `error`. The binary `src/main.rs` calls `whos_alive_lib::run()`.
//!
//! Public API
//!
//! - `run()`: CLI entrypoint used by the binary.
//! - `execute()`: run one configured operation and return the report text.
//!
//! See each module for detailed documentation on functions and behavior.

pub mod config;
pub mod error;
pub mod generate;
pub mod occupancy;
pub mod record;
pub mod report;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{CorruptionPolicy, Mode, PopulationConfig};
use crate::error::Result;
use crate::generate::generate_population;
use crate::occupancy::count_population_file;
use crate::report::{
    app_name_from_path, format_histogram, format_max_population, format_no_records,
    format_skipped, format_usage_and_error,
};

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to read from or write to
    population_file: PathBuf,

    /// Number of records to generate. Omit to analyze an existing file.
    population_size: Option<u64>,

    /// After generating, analyze the new file as well
    #[arg(long = "analyze", action = ArgAction::SetTrue, requires = "population_size")]
    analyze: bool,

    /// Print a per-year occupancy chart after the result
    #[arg(long = "histogram", action = ArgAction::SetTrue)]
    histogram: bool,

    /// Skip corrupt lines instead of stopping at the first one
    #[arg(long = "skip-corrupt", action = ArgAction::SetTrue)]
    skip_corrupt: bool,
}

impl From<Cli> for PopulationConfig {
    fn from(cli: Cli) -> Self {
        Self {
            population_file: cli.population_file,
            population_size: cli.population_size,
            analyze_after_generate: cli.analyze,
            histogram: cli.histogram,
            corruption_policy: if cli.skip_corrupt {
                CorruptionPolicy::Skip
            } else {
                CorruptionPolicy::Halt
            },
        }
    }
}

/// Run the who's-alive CLI.
///
/// Parses arguments with clap, runs the selected operation and prints its
/// report to stdout. Every failure is printed to stderr behind the usage
/// text: bad or extra arguments exit with code 2, anything after parsing with
/// code 1. `--help` and `--version` are left to clap.
///
/// Example:
///
/// ```no_run
/// whos_alive_lib::run(); // called from src/main.rs
/// ```
pub fn run() {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let args: Vec<String> = raw_args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let app_name = args
        .first()
        .map(|a| app_name_from_path(a))
        .unwrap_or(env!("CARGO_PKG_NAME"));

    let cli = match Cli::try_parse_from(&raw_args) {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", format_usage_and_error(app_name, &args, &clap_message(&e)));
            std::process::exit(2);
        }
    };

    let config = PopulationConfig::from(cli);
    match execute(&config) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprint!("{}", format_usage_and_error(app_name, &args, &e.to_string()));
            std::process::exit(1);
        }
    }
}

/// Clap's error text without its own usage block or `error:` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .take_while(|l| !l.starts_with("Usage:"))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.strip_prefix("error: ").unwrap_or(l))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the operation `config` selects and return the text to show the user.
///
/// Behavior summary:
/// - generation mode writes the file and returns an empty report, unless
///   `analyze_after_generate` is set;
/// - analysis mode returns the peak headline and years, or the
///   no-records line when no record was read, followed by the optional
///   histogram and the list of skipped lines. Records that all fall outside
///   the window report a peak of zero shared by every year.
pub fn execute(config: &PopulationConfig) -> Result<String> {
    config.validate()?;

    if let Mode::Generate(_) = config.mode() {
        generate_population(config)?;
        if !config.analyze_after_generate {
            return Ok(String::new());
        }
    }

    let path = config.population_file();
    let census = count_population_file(path, config.corruption_policy)?;
    let mut out = match census.max_population() {
        None => format_no_records(path),
        Some(max) => {
            let mut text = format!("\n{}\n", format_max_population(&max));
            if config.histogram {
                text.push_str(&format_histogram(&census.table));
            }
            text
        }
    };
    out.push_str(&format_skipped(&census.skipped));
    Ok(out)
}
