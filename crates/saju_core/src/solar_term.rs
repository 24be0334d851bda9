//! Solar-term (절입 / 節入) transition table.
//!
//! Each record gives the local day, hour, and minute at which the jie term
//! governing a Gregorian month begins. A date before that instant still
//! belongs to the previous sexagenary month (and, for February, the previous
//! sexagenary year).
//!
//! Dataset format, one record per line:
//!
//! ```text
//! # comment
//! year,month,day,hour,minute
//! ```
//!
//! Blank lines and `#` comments are skipped. Any other malformed line aborts
//! the load.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SajuError};

/// Dataset shipped with the crate: 1900–2100, UTC+9.
pub const BUNDLED_SOLAR_TERMS: &str = include_str!("../data/solar_terms.txt");

/// Boundary used when a (year, month) has no record.
pub const DEFAULT_SOLAR_TERM: SolarTermEntry = SolarTermEntry {
    day: 4,
    hour: 12,
    minute: 0,
};

/// Start of the governing solar term within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarTermEntry {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl SolarTermEntry {
    /// Boundary instant as minutes after local midnight.
    pub const fn minute_of_day(self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// `(day, hour, minute)` tuple.
    pub const fn as_tuple(self) -> (u32, u32, u32) {
        (self.day, self.hour, self.minute)
    }
}

/// Immutable `(year, month) → SolarTermEntry` index.
#[derive(Debug, Clone, Default)]
pub struct SolarTermTable {
    entries: HashMap<i32, SolarTermEntry>,
}

const fn key(year: i32, month: u32) -> i32 {
    year * 100 + month as i32
}

impl SolarTermTable {
    /// Parse the table compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_SOLAR_TERMS)
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "loading solar-term dataset");
        let content = std::fs::read_to_string(path).map_err(|source| SajuError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse dataset text. Fails on the first structurally invalid line.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (year, month, entry) = parse_record(line, i + 1)?;
            entries.insert(key(year, month), entry);
        }
        tracing::debug!(records = entries.len(), "solar-term table loaded");
        Ok(Self { entries })
    }

    /// Solar-term boundary for `(year, month)`, or [`DEFAULT_SOLAR_TERM`]
    /// when the table has no record. Never fails.
    pub fn lookup(&self, year: i32, month: u32) -> SolarTermEntry {
        match self.entries.get(&key(year, month)) {
            Some(entry) => *entry,
            None => {
                tracing::trace!(year, month, "no solar-term record, using default");
                DEFAULT_SOLAR_TERM
            }
        }
    }

    /// Whether a record exists for `(year, month)`.
    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.entries.contains_key(&key(year, month))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_record(line: &str, line_no: usize) -> Result<(i32, u32, SolarTermEntry)> {
    let err = |reason: String| SajuError::SolarTermRecord {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(err(format!("expected 5 fields, found {}", fields.len())));
    }

    let year: i32 = fields[0]
        .parse()
        .map_err(|_| err(format!("bad year {:?}", fields[0])))?;
    let mut nums = [0u32; 4];
    for (slot, (name, text)) in nums
        .iter_mut()
        .zip(["month", "day", "hour", "minute"].iter().zip(&fields[1..]))
    {
        *slot = text
            .parse()
            .map_err(|_| err(format!("bad {name} {text:?}")))?;
    }
    let [month, day, hour, minute] = nums;

    if !(1..=12).contains(&month) {
        return Err(err(format!("month {month} out of range")));
    }
    if !(1..=31).contains(&day) {
        return Err(err(format!("day {day} out of range")));
    }
    if hour > 23 {
        return Err(err(format!("hour {hour} out of range")));
    }
    if minute > 59 {
        return Err(err(format!("minute {minute} out of range")));
    }

    Ok((year, month, SolarTermEntry { day, hour, minute }))
}
