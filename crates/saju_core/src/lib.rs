//! Four Pillars (sexagenary calendar) calculator.
//!
//! This crate provides:
//! - The 10 stems, 12 branches, and 60-term sexagenary cycle
//! - A solar-term boundary table with a bundled 1900–2100 dataset
//! - Year/month/day/hour pillar calculation from a local birth date-time
//! - Five-element balance and ten-god analysis relative to the day stem
//! - Two-hour birth-time ranges used to collect birth times
//!
//! The calculator is pure and holds no mutable state; one instance can be
//! shared across threads.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use saju_core::FourPillarsCalculator;
//!
//! let calc = FourPillarsCalculator::bundled().expect("bundled table");
//! let birth = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let result = calc.calculate(birth);
//! assert_eq!(result.year_pillar.to_string(), "己巳");
//! assert!(result.time_pillar.is_none());
//! ```

pub mod birth_time;
pub mod config;
pub mod element;
pub mod error;
pub mod four_pillars;
pub mod ganzhi;
pub mod solar_term;
pub mod ten_god;

pub use birth_time::{BirthTimeRange, birth_datetime};
pub use config::SajuConfig;
pub use element::{ALL_ELEMENTS, ElementBalance, FiveElement};
pub use error::{Result, SajuError};
pub use four_pillars::{
    BASE_YEAR, FourPillarResult, FourPillarsCalculator, PillarDetail, Pillars, days_since_epoch,
    hour_pillar,
};
pub use ganzhi::{
    ALL_BRANCHES, ALL_STEMS, Branch, CYCLE_LEN, Pillar, SexagenaryCycle, Stem, hour_branch_slot,
};
pub use solar_term::{BUNDLED_SOLAR_TERMS, DEFAULT_SOLAR_TERM, SolarTermEntry, SolarTermTable};
pub use ten_god::{ALL_TEN_GODS, TenGod, ten_god_for_symbols};
