//! Ten gods (십신 / 十神): the relation of a stem to the day master.
//!
//! The relation depends on the elemental link between the two stems
//! (same, day generates, day controls, controls day, generates day) and on
//! whether their polarities match. The fixed 10×10 table below is indexed
//! `[day stem][other stem]`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SajuError;
use crate::ganzhi::{Branch, Stem};

/// The ten relational categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    /// 비견: same element, same polarity.
    #[serde(rename = "비견")]
    Comparison,
    /// 겁재: same element, opposite polarity.
    #[serde(rename = "겁재")]
    Competitor,
    /// 식신: generated by the day master, same polarity.
    #[serde(rename = "식신")]
    Eating,
    /// 상관: generated by the day master, opposite polarity.
    #[serde(rename = "상관")]
    Hurting,
    /// 편재: controlled by the day master, same polarity.
    #[serde(rename = "편재")]
    PartialWealth,
    /// 정재: controlled by the day master, opposite polarity.
    #[serde(rename = "정재")]
    DirectWealth,
    /// 편관: controls the day master, same polarity.
    #[serde(rename = "편관")]
    PartialOfficial,
    /// 정관: controls the day master, opposite polarity.
    #[serde(rename = "정관")]
    DirectOfficial,
    /// 편인: generates the day master, same polarity.
    #[serde(rename = "편인")]
    PartialPrint,
    /// 정인: generates the day master, opposite polarity.
    #[serde(rename = "정인")]
    DirectPrint,
}

pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Comparison,
    TenGod::Competitor,
    TenGod::Eating,
    TenGod::Hurting,
    TenGod::PartialWealth,
    TenGod::DirectWealth,
    TenGod::PartialOfficial,
    TenGod::DirectOfficial,
    TenGod::PartialPrint,
    TenGod::DirectPrint,
];

use TenGod as T;

/// `TEN_GOD_TABLE[day][other]`, both indexed 甲=0 .. 癸=9.
#[rustfmt::skip]
const TEN_GOD_TABLE: [[TenGod; 10]; 10] = [
    // 甲
    [T::Comparison, T::Competitor, T::Eating, T::Hurting, T::PartialWealth, T::DirectWealth, T::PartialOfficial, T::DirectOfficial, T::PartialPrint, T::DirectPrint],
    // 乙
    [T::Competitor, T::Comparison, T::Hurting, T::Eating, T::DirectWealth, T::PartialWealth, T::DirectOfficial, T::PartialOfficial, T::DirectPrint, T::PartialPrint],
    // 丙
    [T::PartialPrint, T::DirectPrint, T::Comparison, T::Competitor, T::Eating, T::Hurting, T::PartialWealth, T::DirectWealth, T::PartialOfficial, T::DirectOfficial],
    // 丁
    [T::DirectPrint, T::PartialPrint, T::Competitor, T::Comparison, T::Hurting, T::Eating, T::DirectWealth, T::PartialWealth, T::DirectOfficial, T::PartialOfficial],
    // 戊
    [T::PartialOfficial, T::DirectOfficial, T::PartialPrint, T::DirectPrint, T::Comparison, T::Competitor, T::Eating, T::Hurting, T::PartialWealth, T::DirectWealth],
    // 己
    [T::DirectOfficial, T::PartialOfficial, T::DirectPrint, T::PartialPrint, T::Competitor, T::Comparison, T::Hurting, T::Eating, T::DirectWealth, T::PartialWealth],
    // 庚
    [T::PartialWealth, T::DirectWealth, T::PartialOfficial, T::DirectOfficial, T::PartialPrint, T::DirectPrint, T::Comparison, T::Competitor, T::Eating, T::Hurting],
    // 辛
    [T::DirectWealth, T::PartialWealth, T::DirectOfficial, T::PartialOfficial, T::DirectPrint, T::PartialPrint, T::Competitor, T::Comparison, T::Hurting, T::Eating],
    // 壬
    [T::Eating, T::Hurting, T::PartialWealth, T::DirectWealth, T::PartialOfficial, T::DirectOfficial, T::PartialPrint, T::DirectPrint, T::Comparison, T::Competitor],
    // 癸
    [T::Hurting, T::Eating, T::DirectWealth, T::PartialWealth, T::DirectOfficial, T::PartialOfficial, T::DirectPrint, T::PartialPrint, T::Competitor, T::Comparison],
];

impl TenGod {
    /// Relation of `other` to the day master `day`.
    pub const fn between(day: Stem, other: Stem) -> Self {
        TEN_GOD_TABLE[day.index() as usize][other.index() as usize]
    }

    /// Relation of a branch to the day master, via the branch's primary
    /// hidden stem.
    pub const fn for_branch(day: Stem, branch: Branch) -> Self {
        Self::between(day, branch.hidden_stem())
    }

    /// Korean label (비견, 겁재, ...).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comparison => "비견",
            Self::Competitor => "겁재",
            Self::Eating => "식신",
            Self::Hurting => "상관",
            Self::PartialWealth => "편재",
            Self::DirectWealth => "정재",
            Self::PartialOfficial => "편관",
            Self::DirectOfficial => "정관",
            Self::PartialPrint => "편인",
            Self::DirectPrint => "정인",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Comparison => "Comparison",
            Self::Competitor => "Competitor",
            Self::Eating => "Eating",
            Self::Hurting => "Hurting",
            Self::PartialWealth => "PartialWealth",
            Self::DirectWealth => "DirectWealth",
            Self::PartialOfficial => "PartialOfficial",
            Self::DirectOfficial => "DirectOfficial",
            Self::PartialPrint => "PartialPrint",
            Self::DirectPrint => "DirectPrint",
        }
    }
}

impl Display for TenGod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TenGod {
    type Err = SajuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_TEN_GODS
            .iter()
            .copied()
            .find(|g| s == g.label() || s.eq_ignore_ascii_case(g.name()))
            .ok_or_else(|| SajuError::InvalidTenGod(s.to_string()))
    }
}

/// Ten-god lookup on raw Hanja symbols, as stored in persisted pillar codes.
///
/// `target` may be a stem or a branch; a branch resolves through its primary
/// hidden stem. Any symbol that is neither falls back to
/// [`TenGod::Comparison`].
pub fn ten_god_for_symbols(day: char, target: char) -> TenGod {
    let day_stem = Stem::from_symbol(day);
    let target_stem =
        Stem::from_symbol(target).or_else(|| Branch::from_symbol(target).map(Branch::hidden_stem));
    match (day_stem, target_stem) {
        (Some(d), Some(t)) => TenGod::between(d, t),
        _ => {
            tracing::debug!(%day, %target, "unknown ten-god symbols, using comparison");
            TenGod::Comparison
        }
    }
}
