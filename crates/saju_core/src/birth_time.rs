//! Two-hour birth-time ranges.
//!
//! Birth times are collected as one of twelve fixed ranges aligned with the
//! hour branches; the range start stands in for the exact time when the
//! chart is computed. `00:00` means "no time entered".

use std::fmt::{Display, Formatter};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SajuError};
use crate::ganzhi::{Branch, hour_branch_slot};

/// `(start, end)` labels, indexed by hour-branch slot.
const RANGE_LABELS: [(&str, &str); 12] = [
    ("23:00", "00:59"),
    ("01:00", "02:59"),
    ("03:00", "04:59"),
    ("05:00", "06:59"),
    ("07:00", "08:59"),
    ("09:00", "10:59"),
    ("11:00", "12:59"),
    ("13:00", "14:59"),
    ("15:00", "16:59"),
    ("17:00", "18:59"),
    ("19:00", "20:59"),
    ("21:00", "22:59"),
];

/// One of the twelve two-hour birth-time ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthTimeRange {
    slot: u8,
}

impl BirthTimeRange {
    /// All ranges, starting with the 23:00–00:59 range.
    pub fn all() -> impl Iterator<Item = BirthTimeRange> {
        (0..12).map(|slot| Self { slot })
    }

    /// Range containing `time`; `None` for exactly `00:00`.
    pub fn from_time(time: NaiveTime) -> Option<Self> {
        if time.hour() == 0 && time.minute() == 0 {
            return None;
        }
        Some(Self {
            slot: hour_branch_slot(time.hour()),
        })
    }

    /// Validate a `(start, end)` label pair against the fixed list.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        RANGE_LABELS
            .iter()
            .position(|&(s, e)| s == start.trim() && e == end.trim())
            .map(|slot| Self { slot: slot as u8 })
            .ok_or_else(|| SajuError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            })
    }

    /// Hour-branch slot (0 = 子 .. 11 = 亥).
    pub fn slot(self) -> u8 {
        self.slot
    }

    /// Hour branch covered by this range.
    pub fn branch(self) -> Branch {
        Branch::from_index(self.slot)
    }

    pub fn start_label(self) -> &'static str {
        RANGE_LABELS[self.slot as usize].0
    }

    pub fn end_label(self) -> &'static str {
        RANGE_LABELS[self.slot as usize].1
    }

    /// Representative time of the range (its start).
    pub fn start_time(self) -> NaiveTime {
        let hour = if self.slot == 0 { 23 } else { 2 * i64::from(self.slot) - 1 };
        NaiveTime::default() + Duration::hours(hour)
    }

    /// Whether `time` falls inside the range. The 23:00 range wraps past midnight.
    pub fn contains(self, time: NaiveTime) -> bool {
        hour_branch_slot(time.hour()) == self.slot
    }
}

impl Display for BirthTimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}~{}", self.start_label(), self.end_label())
    }
}

impl Serialize for BirthTimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.start_label(), self.end_label()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BirthTimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (start, end) = <(String, String)>::deserialize(deserializer)?;
        Self::parse(&start, &end).map_err(D::Error::custom)
    }
}

/// Combine a birth date with an optional range into the calculator input.
///
/// Without a range the result is midnight, which the calculator reads as
/// "time unknown".
pub fn birth_datetime(date: NaiveDate, range: Option<BirthTimeRange>) -> NaiveDateTime {
    let time = range.map_or_else(NaiveTime::default, BirthTimeRange::start_time);
    date.and_time(time)
}
