//! Error type shared by generation and analysis.
//!
//! Every variant is terminal for the mode that produced it. The binary prints
//! the message through `report::format_usage_and_error` and exits non-zero.

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the population operations.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    /// Bad command-line input, detected before any core operation runs.
    #[error("{0}")]
    Configuration(String),

    /// The population file could not be created for generation.
    #[error("Unable to open specified file, '{}', for write: {source}", .path.display())]
    SinkOpen { path: PathBuf, source: io::Error },

    /// The population file could not be opened for analysis.
    #[error("Unable to open specified file, '{}', for read: {source}", .path.display())]
    SourceOpen { path: PathBuf, source: io::Error },

    /// Writing records failed after the file was opened.
    #[error("Failed writing records to '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Reading a line failed after the file was opened.
    #[error("Failed reading records from '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// A line did not split into four fields or a year was not an integer.
    #[error("File corrupted at record {record}: {reason} (tokens: {})", quote_tokens(.tokens))]
    RecordParse {
        record: u64,
        tokens: Vec<String>,
        reason: String,
    },

    /// Birth year after death year.
    #[error("Record {record}: birth year {birth_year} is after death year {death_year}")]
    RecordConstruction {
        record: u64,
        birth_year: i32,
        death_year: i32,
    },
}

impl PopulationError {
    /// 1-based record number for per-line errors.
    pub fn record_number(&self) -> Option<u64> {
        match self {
            Self::RecordParse { record, .. } | Self::RecordConstruction { record, .. } => {
                Some(*record)
            }
            _ => None,
        }
    }
}

fn quote_tokens(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| format!("'{}'", t))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PopulationError>;
