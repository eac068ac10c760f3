//! Synthetic population generation.
//!
//! Each person gets a birth year drawn from `[YEAR_BEGIN - MAX_AGE + 1, YEAR_END)`
//! and an age at death drawn from one of five overlapping bands, picked by a
//! percentile roll:
//!
//! | roll `p`        | age band    | meaning                 |
//! |-----------------|-------------|-------------------------|
//! | `p > 60`        | `[60, 90)`  | average lifespan        |
//! | `30 < p <= 60`  | `[40, 130)` | long-lived outliers     |
//! | `20 < p <= 30`  | `[0, 1)`    | infant mortality        |
//! | `10 < p <= 20`  | `[16, 30)`  | young-adult risk years  |
//! | `p <= 10`       | `[0, 130)`  | accidents, any age      |
//!
//! Starting births well before the window keeps the occupancy curve roughly
//! flat across 1900..=2000. People who die on or before 1900 are re-rolled.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::Range;

use log::{debug, info};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, thread_rng};

use crate::config::PopulationConfig;
use crate::error::{PopulationError, Result};
use crate::record::{MAX_AGE, PersonRecord, YEAR_BEGIN, YEAR_END};

/// Earliest raw birth year the sampler draws.
pub const BIRTH_YEAR_MIN: i32 = YEAR_BEGIN - MAX_AGE + 1;

const AGE_AVERAGE: Range<i32> = 60..90;
const AGE_OUTLIER: Range<i32> = 40..MAX_AGE;
const AGE_NEWBORN: Range<i32> = 0..1;
const AGE_RISKY: Range<i32> = 16..30;
const AGE_BAD_LUCK: Range<i32> = 0..MAX_AGE;

/// Draws clipped lifespans. Holds the distributions so they are built once
/// per run rather than once per person.
#[derive(Debug, Clone)]
pub struct LifespanSampler {
    birth: Uniform<i32>,
    percentile: Uniform<u32>,
    average: Uniform<i32>,
    outlier: Uniform<i32>,
    newborn: Uniform<i32>,
    risky: Uniform<i32>,
    bad_luck: Uniform<i32>,
}

impl Default for LifespanSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl LifespanSampler {
    pub fn new() -> Self {
        Self {
            birth: Uniform::from(BIRTH_YEAR_MIN..YEAR_END),
            percentile: Uniform::from(0..100),
            average: Uniform::from(AGE_AVERAGE),
            outlier: Uniform::from(AGE_OUTLIER),
            newborn: Uniform::from(AGE_NEWBORN),
            risky: Uniform::from(AGE_RISKY),
            bad_luck: Uniform::from(AGE_BAD_LUCK),
        }
    }

    /// Raw birth year, possibly before the window.
    pub fn sample_birth_year<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.birth.sample(rng)
    }

    /// Age at death from the five-band distribution.
    pub fn sample_age<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let p = self.percentile.sample(rng);
        self.age_for_percentile(p, rng)
    }

    fn age_for_percentile<R: Rng + ?Sized>(&self, p: u32, rng: &mut R) -> i32 {
        let band = if p > 60 {
            &self.average
        } else if p > 30 {
            &self.outlier
        } else if p > 20 {
            &self.newborn
        } else if p > 10 {
            &self.risky
        } else {
            &self.bad_luck
        };
        band.sample(rng)
    }

    /// One accepted, clipped record. Re-rolls until the person lives past
    /// `YEAR_BEGIN`.
    pub fn sample_record<R: Rng + ?Sized>(&self, rng: &mut R) -> PersonRecord {
        loop {
            let birth = self.sample_birth_year(rng);
            let death = birth + self.sample_age(rng);
            if let Some(person) = PersonRecord::clipped(birth, death) {
                return person;
            }
        }
    }
}

/// Write `count` sampled records to `out`, one per line.
///
/// Returns the number of records written.
pub fn generate_records<R, W>(count: u64, rng: &mut R, out: &mut W) -> io::Result<u64>
where
    R: Rng + ?Sized,
    W: Write,
{
    let sampler = LifespanSampler::new();
    for written in 0..count {
        let person = sampler.sample_record(rng);
        writeln!(out, "{}", person)?;
        if (written + 1) % 100_000 == 0 {
            debug!("generated {} of {} records", written + 1, count);
        }
    }
    out.flush()?;
    Ok(count)
}

/// Generate `config.population_size` records into `config.population_file`,
/// creating or truncating it.
///
/// The file is opened before any sampling so an unwritable path fails fast.
pub fn generate_population(config: &PopulationConfig) -> Result<u64> {
    let path = config.population_file();
    let count = config.population_size.unwrap_or(0);

    let file = File::create(path).map_err(|source| PopulationError::SinkOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    info!("generating {} records...", count);
    let written = generate_records(count, &mut thread_rng(), &mut out).map_err(|source| {
        PopulationError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("added {} records to file '{}'", written, path.display());
    Ok(written)
}
