//! Person records and the `;`-delimited population file format.
//!
//! One record per line, four fields, no header and no escaping:
//!
//! ```text
//! <Name Redacted>;<For Privacy>;1932;1987
//! ```
//!
//! The name fields are placeholders and carry no meaning; they are written for
//! format compatibility and ignored on read.

use std::fmt;

use crate::error::{PopulationError, Result};

/// First year of the reporting window.
pub const YEAR_BEGIN: i32 = 1900;
/// Last year of the reporting window (inclusive).
pub const YEAR_END: i32 = 2000;
/// Number of calendar years in the window.
pub const WINDOW_YEARS: usize = (YEAR_END - YEAR_BEGIN + 1) as usize;
/// Oldest age the sampler will produce (exclusive).
pub const MAX_AGE: i32 = 130;

/// Field separator of the population file.
pub const DELIMITER: char = ';';
/// Number of fields on every line.
pub const FIELD_COUNT: usize = 4;

pub const PLACEHOLDER_FIRST_NAME: &str = "<Name Redacted>";
pub const PLACEHOLDER_LAST_NAME: &str = "<For Privacy>";

const FIELD_BIRTH_YEAR: usize = 2;
const FIELD_DEATH_YEAR: usize = 3;

/// Birth and death year of one individual. `birth_year <= death_year` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonRecord {
    birth_year: i32,
    death_year: i32,
}

impl PersonRecord {
    /// Build a record, rejecting a birth after the death.
    ///
    /// `record` is the 1-based line number used in the error; generation code
    /// passes the running count.
    pub fn new(birth_year: i32, death_year: i32, record: u64) -> Result<Self> {
        if birth_year > death_year {
            return Err(PopulationError::RecordConstruction {
                record,
                birth_year,
                death_year,
            });
        }
        Ok(Self {
            birth_year,
            death_year,
        })
    }

    /// Clip a raw lifespan into the window.
    ///
    /// Returns `None` when the person died on or before `YEAR_BEGIN`, since
    /// nothing of that life is observable. `raw_birth` must be below
    /// `YEAR_END + 1` and `raw_death >= raw_birth`, which the sampler
    /// guarantees.
    pub fn clipped(raw_birth: i32, raw_death: i32) -> Option<Self> {
        if raw_death <= YEAR_BEGIN || raw_birth > YEAR_END || raw_birth > raw_death {
            return None;
        }
        Some(Self {
            birth_year: raw_birth.max(YEAR_BEGIN),
            death_year: raw_death.min(YEAR_END),
        })
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn death_year(&self) -> i32 {
        self.death_year
    }

    /// Life interval intersected with the window, as table indices.
    ///
    /// `None` when the person was never alive inside the window.
    pub fn window_indices(&self) -> Option<(usize, usize)> {
        let first = self.birth_year.max(YEAR_BEGIN);
        let last = self.death_year.min(YEAR_END);
        if first > last {
            return None;
        }
        Some(((first - YEAR_BEGIN) as usize, (last - YEAR_BEGIN) as usize))
    }

    /// Parse one line of a population file. `record` is 1-based.
    pub fn parse_line(line: &str, record: u64) -> Result<Self> {
        Self::parse_bytes(line.as_bytes(), record)
    }

    /// Parse one raw line. Name fields are never decoded, so any bytes are
    /// accepted there; only the two year fields must be UTF-8 integers.
    pub fn parse_bytes(line: &[u8], record: u64) -> Result<Self> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let tokens: Vec<&[u8]> = line.split(|&b| b == DELIMITER as u8).collect();
        if tokens.len() != FIELD_COUNT {
            return Err(PopulationError::RecordParse {
                record,
                tokens: tokens.iter().map(|t| lossy(t)).collect(),
                reason: format!("expected {} fields, found {}", FIELD_COUNT, tokens.len()),
            });
        }

        let birth_year = parse_year(&tokens, FIELD_BIRTH_YEAR, record)?;
        let death_year = parse_year(&tokens, FIELD_DEATH_YEAR, record)?;
        Self::new(birth_year, death_year, record)
    }
}

fn lossy(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}

fn parse_year(tokens: &[&[u8]], field: usize, record: u64) -> Result<i32> {
    let corrupt = |reason: String| PopulationError::RecordParse {
        record,
        tokens: vec![
            lossy(tokens[FIELD_BIRTH_YEAR]),
            lossy(tokens[FIELD_DEATH_YEAR]),
        ],
        reason,
    };
    let text = std::str::from_utf8(tokens[field])
        .map_err(|_| corrupt(format!("'{}' is not valid UTF-8", lossy(tokens[field]))))?;
    text.trim()
        .parse::<i32>()
        .map_err(|_| corrupt(format!("'{}' is not a valid integer", text)))
}

impl fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{first}{d}{last}{d}{birth}{d}{death}",
            first = PLACEHOLDER_FIRST_NAME,
            last = PLACEHOLDER_LAST_NAME,
            birth = self.birth_year,
            death = self.death_year,
            d = DELIMITER,
        )
    }
}
