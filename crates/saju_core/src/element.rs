//! Five-element (오행 / 五行) categories and the elemental balance of a chart.
//!
//! Every stem and branch maps to exactly one element (see
//! [`Stem::element`](crate::ganzhi::Stem::element) and
//! [`Branch::element`](crate::ganzhi::Branch::element)). The balance counts
//! each stem and branch symbol across the available pillars, up to eight
//! symbols for a chart with a known hour.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SajuError;
use crate::ganzhi::Pillar;

/// The five elements, in generating-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiveElement {
    #[serde(rename = "목(木)")]
    Wood,
    #[serde(rename = "화(火)")]
    Fire,
    #[serde(rename = "토(土)")]
    Earth,
    #[serde(rename = "금(金)")]
    Metal,
    #[serde(rename = "수(水)")]
    Water,
}

/// All five elements in generating order (Wood → Fire → Earth → Metal → Water).
pub const ALL_ELEMENTS: [FiveElement; 5] = [
    FiveElement::Wood,
    FiveElement::Fire,
    FiveElement::Earth,
    FiveElement::Metal,
    FiveElement::Water,
];

impl FiveElement {
    /// 0-based index in generating order.
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Display label, Hangul with Hanja in parentheses.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wood => "목(木)",
            Self::Fire => "화(火)",
            Self::Earth => "토(土)",
            Self::Metal => "금(金)",
            Self::Water => "수(水)",
        }
    }

    pub const fn hanja(self) -> char {
        match self {
            Self::Wood => '木',
            Self::Fire => '火',
            Self::Earth => '土',
            Self::Metal => '金',
            Self::Water => '水',
        }
    }

    pub const fn korean(self) -> &'static str {
        match self {
            Self::Wood => "목",
            Self::Fire => "화",
            Self::Earth => "토",
            Self::Metal => "금",
            Self::Water => "수",
        }
    }

    pub const fn english(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// The element this one generates (Wood feeds Fire, ...).
    pub const fn generates(self) -> Self {
        ALL_ELEMENTS[((self.index() + 1) % 5) as usize]
    }

    /// The element this one controls (Wood controls Earth, ...).
    pub const fn controls(self) -> Self {
        ALL_ELEMENTS[((self.index() + 2) % 5) as usize]
    }
}

impl Display for FiveElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FiveElement {
    type Err = SajuError;

    /// Accepts the label (`화(火)`), the Hanja (`火`), the Hangul (`화`),
    /// or the English name in any case (`fire`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_ELEMENTS
            .iter()
            .copied()
            .find(|e| {
                s == e.label()
                    || s == e.korean()
                    || s.chars().eq(std::iter::once(e.hanja()))
                    || s.eq_ignore_ascii_case(e.english())
            })
            .ok_or_else(|| SajuError::InvalidElement(s.to_string()))
    }
}

/// Occurrence counts of each element over a set of pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementBalance {
    counts: [u8; 5],
}

impl ElementBalance {
    /// Count the stem and branch element of every pillar.
    pub fn from_pillars<'a, I>(pillars: I) -> Self
    where
        I: IntoIterator<Item = &'a Pillar>,
    {
        let mut balance = Self::default();
        for p in pillars {
            balance.add(p.stem().element());
            balance.add(p.branch().element());
        }
        balance
    }

    fn add(&mut self, element: FiveElement) {
        self.counts[element.index() as usize] += 1;
    }

    /// Occurrences of `element`.
    pub fn count(&self, element: FiveElement) -> u8 {
        self.counts[element.index() as usize]
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Every element tied at the maximum count, in generating order.
    pub fn strong(&self) -> Vec<FiveElement> {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        self.with_count(max)
    }

    /// Every element tied at the minimum count (zero included), in generating order.
    pub fn weak(&self) -> Vec<FiveElement> {
        let min = self.counts.iter().copied().min().unwrap_or(0);
        self.with_count(min)
    }

    fn with_count(&self, n: u8) -> Vec<FiveElement> {
        ALL_ELEMENTS
            .iter()
            .copied()
            .filter(|e| self.count(*e) == n)
            .collect()
    }
}
