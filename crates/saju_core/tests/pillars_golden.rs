//! Golden and property tests for Four Pillars calculation.
//!
//! Pure computation over the bundled solar-term table (no external files).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use saju_core::{
    BirthTimeRange, FiveElement, FourPillarsCalculator, Pillar, SexagenaryCycle, TenGod,
    birth_datetime,
};

fn calc() -> FourPillarsCalculator {
    FourPillarsCalculator::bundled().expect("bundled table parses")
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn codes(p: &[Pillar]) -> Vec<String> {
    p.iter().map(Pillar::to_string).collect()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[test]
fn fixture_1990_01_15_no_time() {
    // Year: January → 1990-1864-1 = 125 ≡ 5 → 己巳
    // Month: (127*12 + 1-12) = 1513 ≡ 13, past the Jan 5 term → 丁丑
    // Day: 46,036 days after 1863-12-31 ≡ 16 → 庚辰
    let r = calc().calculate(dt(1990, 1, 15, 0, 0));
    assert_eq!(
        codes(&[r.year_pillar, r.month_pillar, r.day_pillar]),
        vec!["己巳", "丁丑", "庚辰"]
    );
    assert_eq!(r.time_pillar, None);
}

#[test]
fn fixture_1990_01_15_with_time() {
    // 08:30 → 辰 slot 4; 庚 day (6 % 5 = 1) → stem (2 + 4) % 10 = 庚
    let r = calc().calculate(dt(1990, 1, 15, 8, 30));
    assert_eq!(r.time_pillar.map(|p| p.to_string()).as_deref(), Some("庚辰"));
    assert_eq!(r.year_pillar.to_string(), "己巳");
}

#[test]
fn fixture_1990_detailed() {
    let r = calc().calculate_detailed(dt(1990, 1, 15, 0, 0));

    assert_eq!(r.strong_elements, Some(vec![FiveElement::Earth]));
    assert_eq!(
        r.weak_elements,
        Some(vec![FiveElement::Wood, FiveElement::Water])
    );

    let year = r.year_detail.unwrap();
    assert_eq!(year.stem, FiveElement::Earth);
    assert_eq!(year.branch, FiveElement::Fire);
    assert_eq!(year.stem_ten_god, TenGod::DirectPrint);
    assert_eq!(year.branch_ten_god, TenGod::PartialOfficial);

    let month = r.month_detail.unwrap();
    assert_eq!(month.stem_ten_god, TenGod::DirectOfficial);
    assert_eq!(month.branch_ten_god, TenGod::DirectPrint);

    let day = r.day_detail.unwrap();
    assert_eq!(day.stem, FiveElement::Metal);
    assert_eq!(day.stem_ten_god, TenGod::Comparison);
    assert_eq!(day.branch_ten_god, TenGod::PartialPrint);

    assert!(r.time_detail.is_none());
}

#[test]
fn fixture_1990_spring_boundary() {
    // Bundled table: 1990-02-04 11:14 (UTC+9)
    let c = calc();
    let before = c.calculate(dt(1990, 2, 4, 11, 13));
    let after = c.calculate(dt(1990, 2, 4, 11, 14));
    assert_eq!(codes(&[before.year_pillar, before.month_pillar]), vec!["己巳", "丁丑"]);
    assert_eq!(codes(&[after.year_pillar, after.month_pillar]), vec!["庚午", "戊寅"]);
    assert_eq!(before.day_pillar, after.day_pillar);
}

#[test]
fn fixture_2024_boundaries() {
    // Start of Spring 2024-02-04 17:27, Awakening of Insects 2024-03-05 11:23
    let c = calc();
    let spring_before = c.calculate(dt(2024, 2, 4, 17, 22));
    assert_eq!(
        codes(&[spring_before.year_pillar, spring_before.month_pillar]),
        vec!["癸卯", "乙丑"]
    );
    let spring_after = c.calculate(dt(2024, 2, 4, 17, 27));
    assert_eq!(
        codes(&[spring_after.year_pillar, spring_after.month_pillar]),
        vec!["甲辰", "丙寅"]
    );
    assert_eq!(c.calculate(dt(2024, 3, 5, 11, 18)).month_pillar.to_string(), "丙寅");
    assert_eq!(c.calculate(dt(2024, 3, 5, 11, 23)).month_pillar.to_string(), "丁卯");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn totality_1900_to_2100() {
    let c = calc();
    let cycle = SexagenaryCycle::new();
    let mut date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    let mut step = 0u32;
    while date <= end {
        let hour = step % 24;
        let birth = date.and_hms_opt(hour, (step * 7) % 60, 0).unwrap();
        let r = c.calculate(birth);
        assert!(cycle.index_of_code(&r.year_pillar.to_string()).is_some());
        assert!(cycle.index_of_code(&r.month_pillar.to_string()).is_some());
        assert!(cycle.index_of_code(&r.day_pillar.to_string()).is_some());
        let known = birth.time() != NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(r.time_pillar.is_some(), known, "{birth}");
        date += Duration::days(5);
        step += 1;
    }
}

#[test]
fn month_branch_tracks_gregorian_month_after_term() {
    // After the jie term, month m is always branch m % 12 (Jan = 丑, Feb = 寅).
    let c = calc();
    for year in [1901, 1950, 1999, 2000, 2024, 2099] {
        for month in 1..=12u32 {
            let r = c.calculate(dt(year, month, 20, 12, 0));
            assert_eq!(
                r.month_pillar.branch().index() as u32,
                month % 12,
                "{year}-{month}"
            );
        }
    }
}

#[test]
fn year_pillar_mid_year_follows_epoch() {
    let c = calc();
    let cycle = SexagenaryCycle::new();
    for year in 1900..=2100 {
        let r = c.calculate(dt(year, 7, 1, 0, 0));
        assert_eq!(r.year_pillar, cycle.at(i64::from(year - 1864)), "{year}");
    }
    assert_eq!(c.calculate(dt(1984, 7, 1, 0, 0)).year_pillar.to_string(), "甲子");
}

#[test]
fn consecutive_days_advance_cycle_by_one() {
    let c = calc();
    let mut prev = c.calculate(dt(1999, 12, 25, 0, 0)).day_pillar;
    let mut d = NaiveDate::from_ymd_opt(1999, 12, 26).unwrap();
    for _ in 0..130 {
        let cur = c.calculate(d.and_hms_opt(0, 0, 0).unwrap()).day_pillar;
        assert_eq!(cur.cycle_index(), (prev.cycle_index() + 1) % 60, "{d}");
        prev = cur;
        d = d.succ_opt().unwrap();
    }
}

#[test]
fn idempotent_output() {
    let c = calc();
    let birth = dt(1977, 11, 8, 14, 45);
    let a = serde_json::to_string(&c.calculate_detailed(birth)).unwrap();
    let b = serde_json::to_string(&c.calculate_detailed(birth)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn clones_share_table_and_agree_across_threads() {
    let c = calc();
    let birth = dt(2010, 6, 30, 21, 15);
    let expected = c.calculate_detailed(birth);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = c.clone();
            std::thread::spawn(move || c.calculate_detailed(birth))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

// ---------------------------------------------------------------------------
// Serialization contract
// ---------------------------------------------------------------------------

#[test]
fn basic_json_shape() {
    let r = calc().calculate(dt(1990, 1, 15, 0, 0));
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["year_pillar"], "己巳");
    assert_eq!(v["month_pillar"], "丁丑");
    assert_eq!(v["day_pillar"], "庚辰");
    assert!(v["time_pillar"].is_null());
    assert_eq!(v["strong_elements"], serde_json::json!(["토(土)"]));
    assert_eq!(v["weak_elements"], serde_json::json!(["목(木)", "수(水)"]));
    assert!(v["year_detail"].is_null());
}

#[test]
fn detailed_json_round_trips() {
    let r = calc().calculate_detailed(dt(1990, 1, 15, 8, 30));
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"stem_ten_god\":\"비견\""), "{json}");
    let back: saju_core::FourPillarResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

#[test]
fn birth_time_range_feeds_hour_pillar() {
    let c = calc();
    let date = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
    let range = BirthTimeRange::parse("07:00", "08:59").unwrap();
    let r = c.calculate(birth_datetime(date, Some(range)));
    assert_eq!(r.time_pillar.map(|p| p.branch()), Some(range.branch()));
    assert!(c.calculate(birth_datetime(date, None)).time_pillar.is_none());
}
