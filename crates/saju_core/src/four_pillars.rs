//! Four Pillars (사주 / 四柱) calculation.
//!
//! Maps a local birth date-time to year, month, day, and hour stem-branch
//! pillars, then derives the five-element balance and, in detailed mode,
//! the ten-god relation of every pillar to the day stem.
//!
//! Calibration constants:
//! - Year index 0 of the cycle (甲子) is 1864; the year rolls over at the
//!   February solar term.
//! - Month indices count from December 1863 and roll over at each month's
//!   solar term.
//! - Day indices count days after 1863-12-31 (1864-01-01 = 乙丑, index 1).
//! - The hour stem follows the day stem's five-group rule: the 子 hour stem
//!   is `(day_stem % 5) * 2`.
//!
//! A midnight input (`00:00`) is read as "time unknown": no hour pillar is
//! produced, and a solar-term day is treated as falling before the boundary.

use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::SajuConfig;
use crate::element::{ElementBalance, FiveElement};
use crate::error::Result;
use crate::ganzhi::{Pillar, SexagenaryCycle, Stem, hour_branch_slot};
use crate::solar_term::{SolarTermEntry, SolarTermTable};
use crate::ten_god::TenGod;

/// Cycle anchor year: `year - BASE_YEAR` is the year's cycle index.
pub const BASE_YEAR: i32 = 1864;

/// Month indices are `(year - MONTH_BASE_YEAR) * 12 + (month - 12)`.
pub const MONTH_BASE_YEAR: i32 = 1863;

/// Day indices are days elapsed since this date.
pub const DAY_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1863, 12, 31) {
    Some(date) => date,
    None => panic!("day epoch out of range"),
};

/// Element and ten-god breakdown of one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarDetail {
    /// Element of the stem.
    pub stem: FiveElement,
    /// Element of the branch.
    pub branch: FiveElement,
    /// Ten god of the stem relative to the day stem.
    pub stem_ten_god: TenGod,
    /// Ten god of the branch's primary hidden stem relative to the day stem.
    pub branch_ten_god: TenGod,
}

impl PillarDetail {
    fn new(day_master: Stem, pillar: Pillar) -> Self {
        Self {
            stem: pillar.stem().element(),
            branch: pillar.branch().element(),
            stem_ten_god: TenGod::between(day_master, pillar.stem()),
            branch_ten_god: TenGod::for_branch(day_master, pillar.branch()),
        }
    }
}

/// Output of a Four Pillars calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillarResult {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    /// Present only when the input carried a non-midnight time.
    pub time_pillar: Option<Pillar>,
    /// Elements tied at the highest count.
    pub strong_elements: Option<Vec<FiveElement>>,
    /// Elements tied at the lowest count.
    pub weak_elements: Option<Vec<FiveElement>>,
    pub year_detail: Option<PillarDetail>,
    pub month_detail: Option<PillarDetail>,
    pub day_detail: Option<PillarDetail>,
    pub time_detail: Option<PillarDetail>,
}

impl FourPillarResult {
    /// Available pillars in year, month, day, hour order.
    pub fn pillars(&self) -> impl Iterator<Item = &Pillar> {
        [&self.year_pillar, &self.month_pillar, &self.day_pillar]
            .into_iter()
            .chain(self.time_pillar.as_ref())
    }

    /// Day master: the stem of the day pillar.
    pub fn day_master(&self) -> Stem {
        self.day_pillar.stem()
    }

    /// Element counts over the available pillars.
    pub fn element_balance(&self) -> ElementBalance {
        ElementBalance::from_pillars(self.pillars())
    }
}

/// The four raw pillars before any analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
}

/// Stateless calculator over a shared, read-only solar-term table.
///
/// Cloning is cheap; clones share the table.
#[derive(Debug, Clone)]
pub struct FourPillarsCalculator {
    cycle: SexagenaryCycle,
    solar_terms: Arc<SolarTermTable>,
}

impl FourPillarsCalculator {
    pub fn new(solar_terms: SolarTermTable) -> Self {
        Self::with_shared_table(Arc::new(solar_terms))
    }

    pub fn with_shared_table(solar_terms: Arc<SolarTermTable>) -> Self {
        Self {
            cycle: SexagenaryCycle::new(),
            solar_terms,
        }
    }

    /// Calculator over the dataset compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(SolarTermTable::bundled()?))
    }

    /// Calculator over a dataset file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(SolarTermTable::load(path)?))
    }

    /// Build from configuration: an external dataset if configured,
    /// otherwise the bundled one.
    pub fn from_config(config: &SajuConfig) -> Result<Self> {
        match &config.solar_terms {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn cycle(&self) -> &SexagenaryCycle {
        &self.cycle
    }

    pub fn solar_terms(&self) -> &SolarTermTable {
        &self.solar_terms
    }

    /// Pillars plus five-element balance.
    pub fn calculate(&self, birth: NaiveDateTime) -> FourPillarResult {
        let pillars = self.pillars(birth);
        self.assemble(pillars, false)
    }

    /// Pillars, five-element balance, and per-pillar ten-god details.
    pub fn calculate_detailed(&self, birth: NaiveDateTime) -> FourPillarResult {
        let pillars = self.pillars(birth);
        self.assemble(pillars, true)
    }

    /// Year, month, day, and (if the time is known) hour pillars.
    pub fn pillars(&self, birth: NaiveDateTime) -> Pillars {
        let date = birth.date();
        let minute_of_day = known_minute_of_day(birth);
        let term = self.solar_terms.lookup(date.year(), date.month());

        let day = self.day_pillar(date);
        Pillars {
            year: self.year_pillar(date, minute_of_day, term),
            month: self.month_pillar(date, minute_of_day, term),
            day,
            hour: minute_of_day.map(|_| hour_pillar(day.stem(), birth.hour())),
        }
    }

    fn year_pillar(
        &self,
        date: NaiveDate,
        minute_of_day: Option<u32>,
        term: SolarTermEntry,
    ) -> Pillar {
        let mut offset = i64::from(date.year() - BASE_YEAR);
        let month = date.month();
        if month < 2 || (month == 2 && before_term(date.day(), minute_of_day, term)) {
            offset -= 1;
        }
        self.cycle.at(offset)
    }

    fn month_pillar(
        &self,
        date: NaiveDate,
        minute_of_day: Option<u32>,
        term: SolarTermEntry,
    ) -> Pillar {
        let mut index =
            i64::from(date.year() - MONTH_BASE_YEAR) * 12 + i64::from(date.month()) - 12;
        if before_term(date.day(), minute_of_day, term) {
            index -= 1;
        }
        self.cycle.at(index)
    }

    fn day_pillar(&self, date: NaiveDate) -> Pillar {
        self.cycle.at(days_since_epoch(date))
    }

    fn assemble(&self, p: Pillars, detailed: bool) -> FourPillarResult {
        let mut available = vec![p.year, p.month, p.day];
        available.extend(p.hour);
        let balance = ElementBalance::from_pillars(&available);

        let day_master = p.day.stem();
        let detail = |pillar: Pillar| detailed.then(|| PillarDetail::new(day_master, pillar));

        FourPillarResult {
            year_pillar: p.year,
            month_pillar: p.month,
            day_pillar: p.day,
            time_pillar: p.hour,
            strong_elements: Some(balance.strong()),
            weak_elements: Some(balance.weak()),
            year_detail: detail(p.year),
            month_detail: detail(p.month),
            day_detail: detail(p.day),
            time_detail: p.hour.and_then(detail),
        }
    }
}

/// Minutes after midnight, or `None` when the input is exactly midnight.
fn known_minute_of_day(birth: NaiveDateTime) -> Option<u32> {
    let (hour, minute) = (birth.hour(), birth.minute());
    (hour != 0 || minute != 0).then_some(hour * 60 + minute)
}

/// Whether `day` (at `minute_of_day`, if known) precedes the term boundary.
/// On the boundary day an unknown time counts as before it.
fn before_term(day: u32, minute_of_day: Option<u32>, term: SolarTermEntry) -> bool {
    day < term.day
        || (day == term.day && minute_of_day.is_none_or(|m| m < term.minute_of_day()))
}

/// Signed day count from the 1863-12-31 epoch.
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    (date - DAY_EPOCH).num_days()
}

/// Hour pillar for a day stem and clock hour.
pub fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let slot = hour_branch_slot(hour);
    let stem = ((day_stem.index() % 5) * 2 + slot) % 10;
    // Stem and slot share parity, so the pair sits at the cycle index
    // congruent to `stem` mod 10 and `slot` mod 12.
    let index = (6 * u16::from(stem) + 55 * u16::from(slot)) % 60;
    Pillar::from_cycle_index(index as u8)
}
