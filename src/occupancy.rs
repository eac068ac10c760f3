//! Year-occupancy counting over a population file.
//!
//! Every record bumps one counter per year it was alive inside the window.
//! The running maximum and the years tied for it are updated right after each
//! bump, so the answer is ready as soon as the last record is folded in. No
//! counter ever decreases, which means the tie set collected this way is the
//! same set a final scan for `count == max` would find.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::config::CorruptionPolicy;
use crate::error::{PopulationError, Result};
use crate::record::{PersonRecord, WINDOW_YEARS, YEAR_BEGIN, YEAR_END};

/// Per-year alive counts for the window plus the running maximum.
#[derive(Debug, Clone)]
pub struct OccupancyTable {
    counts: [u64; WINDOW_YEARS],
    max_count: u64,
    // Indices in the order they reached `max_count`.
    max_indices: Vec<usize>,
}

impl Default for OccupancyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OccupancyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; WINDOW_YEARS],
            max_count: 0,
            max_indices: Vec::new(),
        }
    }

    /// Fold one person into the table.
    pub fn add(&mut self, person: &PersonRecord) {
        let Some((first, last)) = person.window_indices() else {
            return;
        };
        for ix in first..=last {
            self.counts[ix] += 1;
            let alive = self.counts[ix];
            if alive > self.max_count {
                self.max_count = alive;
                self.max_indices.clear();
                self.max_indices.push(ix);
            } else if alive == self.max_count {
                self.max_indices.push(ix);
            }
        }
    }

    /// Alive count for calendar `year`, or `None` outside the window.
    pub fn count_for_year(&self, year: i32) -> Option<u64> {
        let ix = usize::try_from(year.checked_sub(YEAR_BEGIN)?).ok()?;
        self.counts.get(ix).copied()
    }

    /// `(year, count)` for every year of the window, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(ix, &count)| (YEAR_BEGIN + ix as i32, count))
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Peak count and the tied years in ascending order.
    ///
    /// With nobody alive in any year, every year of the window ties at zero.
    pub fn max_population(&self) -> MaxPopulation {
        let mut years: Vec<i32> = if self.max_indices.is_empty() {
            (YEAR_BEGIN..=YEAR_END).collect()
        } else {
            self.max_indices
                .iter()
                .map(|&ix| YEAR_BEGIN + ix as i32)
                .collect()
        };
        years.sort_unstable();
        MaxPopulation {
            count: self.max_count,
            years,
        }
    }
}

/// The highest alive count and every year that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxPopulation {
    pub count: u64,
    pub years: Vec<i32>,
}

/// Everything an analysis run produced.
#[derive(Debug)]
pub struct Census {
    /// Lines successfully folded into the table.
    pub records: u64,
    pub table: OccupancyTable,
    /// Errors for lines dropped under `CorruptionPolicy::Skip`, in file order.
    pub skipped: Vec<PopulationError>,
}

impl Census {
    /// `None` only when no record was read; records that all fall outside
    /// the window still produce a (zero) peak.
    pub fn max_population(&self) -> Option<MaxPopulation> {
        if self.records == 0 {
            return None;
        }
        Some(self.table.max_population())
    }
}

/// Count occupancy for every line of `reader`.
///
/// `source` is only used to label read errors. Under `CorruptionPolicy::Halt`
/// the first bad line ends the run with its error and the partial table is
/// dropped.
pub fn count_population<R: BufRead>(
    reader: R,
    source: &Path,
    policy: CorruptionPolicy,
) -> Result<Census> {
    let mut table = OccupancyTable::new();
    let mut records = 0u64;
    let mut skipped = Vec::new();

    for (ix, line) in reader.split(b'\n').enumerate() {
        let record = ix as u64 + 1;
        let line = line.map_err(|source_err| PopulationError::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        match PersonRecord::parse_bytes(&line, record) {
            Ok(person) => {
                table.add(&person);
                records += 1;
            }
            Err(err) if policy == CorruptionPolicy::Skip => {
                warn!("skipping {}", err);
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    debug!(
        "folded {} records, skipped {}, peak {}",
        records,
        skipped.len(),
        table.max_count()
    );
    Ok(Census {
        records,
        table,
        skipped,
    })
}

/// Open `path` and run `count_population` over it.
pub fn count_population_file(path: &Path, policy: CorruptionPolicy) -> Result<Census> {
    info!("reading records from file '{}'", path.display());
    let file = File::open(path).map_err(|source| PopulationError::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    count_population(BufReader::new(file), path, policy)
}
