//! Run configuration.
//!
//! Built once from the command line and handed to each operation by shared
//! reference. Nothing here is mutated after construction.

use std::path::{Path, PathBuf};

use crate::error::{PopulationError, Result};

/// What the analyzer does with a line it cannot turn into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Stop at the first bad line and report nothing else.
    #[default]
    Halt,
    /// Skip bad lines and list them after the result.
    Skip,
}

/// The single operation a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write this many records, then exit (or analyze, see `analyze_after_generate`).
    Generate(u64),
    /// Read an existing file and report the peak years.
    Analyze,
}

#[derive(Debug, Clone)]
pub struct PopulationConfig {
    pub population_file: PathBuf,
    pub population_size: Option<u64>,
    pub analyze_after_generate: bool,
    pub histogram: bool,
    pub corruption_policy: CorruptionPolicy,
}

impl PopulationConfig {
    /// Analysis-mode config for `path` with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            population_file: path.into(),
            population_size: None,
            analyze_after_generate: false,
            histogram: false,
            corruption_policy: CorruptionPolicy::default(),
        }
    }

    /// Switch to generation mode with `size` records.
    pub fn with_size(mut self, size: u64) -> Self {
        self.population_size = Some(size);
        self
    }

    pub fn with_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption_policy = policy;
        self
    }

    pub fn mode(&self) -> Mode {
        match self.population_size {
            Some(n) => Mode::Generate(n),
            None => Mode::Analyze,
        }
    }

    pub fn population_file(&self) -> &Path {
        &self.population_file
    }

    /// Check everything that must hold before the core runs.
    ///
    /// Analysis mode needs an existing file; generation mode creates or
    /// overwrites it.
    pub fn validate(&self) -> Result<()> {
        if self.population_file.as_os_str().is_empty() {
            return Err(PopulationError::Configuration(
                "This program requires at least 1 argument (name of population file)".into(),
            ));
        }
        if self.mode() == Mode::Analyze && !self.population_file.is_file() {
            return Err(PopulationError::Configuration(format!(
                "'{}' does not exist.",
                self.population_file.display()
            )));
        }
        Ok(())
    }
}
