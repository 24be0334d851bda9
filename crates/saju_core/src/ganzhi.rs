//! Heavenly stems, earthly branches, and the 60-term sexagenary cycle.
//!
//! Ten stems and twelve branches advance together; index `i` of the cycle
//! pairs `stem[i % 10]` with `branch[i % 12]`, so only the 60 pairs whose
//! stem and branch share parity are valid pillars.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::element::FiveElement;
use crate::error::SajuError;

/// Number of terms in the sexagenary cycle.
pub const CYCLE_LEN: usize = 60;

/// The 10 heavenly stems (천간 / 天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in cycle order (0 = 甲, 9 = 癸).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Stem at a 0-based index, wrapping modulo 10.
    pub const fn from_index(index: u8) -> Self {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Hanja symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Gap => '甲',
            Self::Eul => '乙',
            Self::Byeong => '丙',
            Self::Jeong => '丁',
            Self::Mu => '戊',
            Self::Gi => '己',
            Self::Gyeong => '庚',
            Self::Sin => '辛',
            Self::Im => '壬',
            Self::Gye => '癸',
        }
    }

    /// Hangul reading.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Gap => "갑",
            Self::Eul => "을",
            Self::Byeong => "병",
            Self::Jeong => "정",
            Self::Mu => "무",
            Self::Gi => "기",
            Self::Gyeong => "경",
            Self::Sin => "신",
            Self::Im => "임",
            Self::Gye => "계",
        }
    }

    /// Parse a Hanja symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        ALL_STEMS.iter().copied().find(|s| s.symbol() == c)
    }

    /// Yang stems sit at even indices.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Five-element category of the stem.
    pub const fn element(self) -> FiveElement {
        match self {
            Self::Gap | Self::Eul => FiveElement::Wood,
            Self::Byeong | Self::Jeong => FiveElement::Fire,
            Self::Mu | Self::Gi => FiveElement::Earth,
            Self::Gyeong | Self::Sin => FiveElement::Metal,
            Self::Im | Self::Gye => FiveElement::Water,
        }
    }
}

/// The 12 earthly branches (지지 / 地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in cycle order (0 = 子, 11 = 亥).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Branch at a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_BRANCHES[(index % 12) as usize]
    }

    /// Hanja symbol.
    pub const fn symbol(self) -> char {
        match self {
            Self::Ja => '子',
            Self::Chuk => '丑',
            Self::In => '寅',
            Self::Myo => '卯',
            Self::Jin => '辰',
            Self::Sa => '巳',
            Self::O => '午',
            Self::Mi => '未',
            Self::Sin => '申',
            Self::Yu => '酉',
            Self::Sul => '戌',
            Self::Hae => '亥',
        }
    }

    /// Hangul reading.
    pub const fn korean(self) -> &'static str {
        match self {
            Self::Ja => "자",
            Self::Chuk => "축",
            Self::In => "인",
            Self::Myo => "묘",
            Self::Jin => "진",
            Self::Sa => "사",
            Self::O => "오",
            Self::Mi => "미",
            Self::Sin => "신",
            Self::Yu => "유",
            Self::Sul => "술",
            Self::Hae => "해",
        }
    }

    /// Parse a Hanja symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        ALL_BRANCHES.iter().copied().find(|b| b.symbol() == c)
    }

    /// Five-element category of the branch.
    pub const fn element(self) -> FiveElement {
        match self {
            Self::In | Self::Myo => FiveElement::Wood,
            Self::Sa | Self::O => FiveElement::Fire,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => FiveElement::Earth,
            Self::Sin | Self::Yu => FiveElement::Metal,
            Self::Hae | Self::Ja => FiveElement::Water,
        }
    }

    /// Primary (dominant) hidden stem of the branch.
    ///
    /// Only the principal qi is modelled; the secondary and residual hidden
    /// stems are ignored.
    pub const fn hidden_stem(self) -> Stem {
        match self {
            Self::Ja => Stem::Gye,
            Self::Chuk => Stem::Gi,
            Self::In => Stem::Gap,
            Self::Myo => Stem::Eul,
            Self::Jin => Stem::Mu,
            Self::Sa => Stem::Byeong,
            Self::O => Stem::Jeong,
            Self::Mi => Stem::Gi,
            Self::Sin => Stem::Gyeong,
            Self::Yu => Stem::Sin,
            Self::Sul => Stem::Mu,
            Self::Hae => Stem::Im,
        }
    }
}

/// Branch slot (0..12) of the two-hour period containing `hour`.
///
/// Hour 23 belongs to slot 0 (子) together with hours 0 and 1; every other
/// hour maps to `(hour + 1) / 2`.
pub const fn hour_branch_slot(hour: u32) -> u8 {
    if hour == 23 { 0 } else { ((hour + 1) / 2) as u8 }
}

/// A stem-branch pair (one of the four pillars).
///
/// Only the 60 combinations reachable from a single cycle index can be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// Pair a stem with a branch. Returns `None` for mixed-parity pairs,
    /// which never occur in the cycle.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Pillar at cycle position `index` (0-based, wrapping modulo 60).
    pub const fn from_cycle_index(index: u8) -> Self {
        let i = index % CYCLE_LEN as u8;
        Self {
            stem: Stem::from_index(i % 10),
            branch: Branch::from_index(i % 12),
        }
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// 0-based position within the sexagenary cycle.
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index();
        let b = self.branch.index();
        let mut k = 0;
        while k < 6 {
            let i = s + 10 * k;
            if i % 12 == b {
                return i;
            }
            k += 1;
        }
        // Unreachable: `new` rejects mixed parity.
        0
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

impl FromStr for Pillar {
    type Err = SajuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SajuError::InvalidPillar(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(sc), Some(bc), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let stem = Stem::from_symbol(sc).ok_or_else(invalid)?;
        let branch = Branch::from_symbol(bc).ok_or_else(invalid)?;
        Self::new(stem, branch).ok_or_else(invalid)
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pillar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(D::Error::custom)
    }
}

/// The 60-term stem-branch cycle, precomputed once.
#[derive(Debug, Clone)]
pub struct SexagenaryCycle {
    pillars: [Pillar; CYCLE_LEN],
}

impl SexagenaryCycle {
    /// Build the cycle: entry `i` is `stem[i % 10]` + `branch[i % 12]`.
    pub fn new() -> Self {
        let mut pillars = [Pillar::from_cycle_index(0); CYCLE_LEN];
        for (i, slot) in pillars.iter_mut().enumerate() {
            *slot = Pillar::from_cycle_index(i as u8);
        }
        Self { pillars }
    }

    /// Pillar at an arbitrary (possibly negative) offset, reduced modulo 60.
    pub fn at(&self, index: i64) -> Pillar {
        self.pillars[index.rem_euclid(CYCLE_LEN as i64) as usize]
    }

    /// 1-based position of `pillar` in the cycle (1..=60).
    pub fn index_of(&self, pillar: Pillar) -> usize {
        pillar.cycle_index() as usize + 1
    }

    /// 1-based position of a pillar code, or `None` if it is not in the cycle.
    pub fn index_of_code(&self, code: &str) -> Option<usize> {
        self.pillars
            .iter()
            .position(|p| p.to_string() == code)
            .map(|i| i + 1)
    }

    /// All 60 pillars in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = Pillar> + '_ {
        self.pillars.iter().copied()
    }
}

impl Default for SexagenaryCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cycle_has_60_distinct_codes() {
        let cycle = SexagenaryCycle::new();
        let codes: HashSet<String> = (0..60).map(|i| cycle.at(i).to_string()).collect();
        assert_eq!(codes.len(), 60);
        for code in &codes {
            assert_eq!(code.chars().count(), 2, "code {code}");
        }
    }

    #[test]
    fn cycle_wraps_modulo_60() {
        let cycle = SexagenaryCycle::new();
        assert_eq!(cycle.at(60), cycle.at(0));
        assert_eq!(cycle.at(-1), cycle.at(59));
        assert_eq!(cycle.at(125), cycle.at(5));
    }

    #[test]
    fn first_and_last_entries() {
        let cycle = SexagenaryCycle::new();
        assert_eq!(cycle.at(0).to_string(), "甲子");
        assert_eq!(cycle.at(1).to_string(), "乙丑");
        assert_eq!(cycle.at(10).to_string(), "甲戌");
        assert_eq!(cycle.at(59).to_string(), "癸亥");
    }

    #[test]
    fn index_of_is_one_based() {
        let cycle = SexagenaryCycle::new();
        for i in 0..60 {
            let p = cycle.at(i);
            assert_eq!(cycle.index_of(p), i as usize + 1);
            assert_eq!(cycle.index_of_code(&p.to_string()), Some(i as usize + 1));
        }
        assert_eq!(cycle.index_of_code("甲丑"), None);
    }

    #[test]
    fn mixed_parity_rejected() {
        assert!(Pillar::new(Stem::Gap, Branch::Chuk).is_none());
        assert!(Pillar::new(Stem::Gap, Branch::In).is_some());
        assert!("甲丑".parse::<Pillar>().is_err());
        assert!("甲".parse::<Pillar>().is_err());
        assert!("甲子丑".parse::<Pillar>().is_err());
        assert_eq!("庚辰".parse::<Pillar>().unwrap().cycle_index(), 16);
    }

    #[test]
    fn hour_slots() {
        assert_eq!(hour_branch_slot(23), 0);
        assert_eq!(hour_branch_slot(0), 0);
        assert_eq!(hour_branch_slot(1), 1);
        assert_eq!(hour_branch_slot(2), 1);
        assert_eq!(hour_branch_slot(11), 6);
        assert_eq!(hour_branch_slot(12), 6);
        assert_eq!(hour_branch_slot(22), 11);
    }

    #[test]
    fn hidden_stem_shares_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(b.hidden_stem().element(), b.element(), "{}", b.symbol());
        }
    }

    #[test]
    fn symbols_roundtrip() {
        for s in ALL_STEMS {
            assert_eq!(Stem::from_symbol(s.symbol()), Some(s));
        }
        for b in ALL_BRANCHES {
            assert_eq!(Branch::from_symbol(b.symbol()), Some(b));
        }
        assert_eq!(Stem::from_symbol('x'), None);
    }
}
