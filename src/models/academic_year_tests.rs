use chrono::NaiveDate;

use super::academic_year::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn march_resolves_to_previous_offset() {
    assert_eq!(academic_year_for(date(2025, 3, 31)), 2025 + 56);
}

#[test]
fn day_before_new_year_resolves_to_previous_offset() {
    assert_eq!(academic_year_for(date(2025, 4, 13)), 2025 + 56);
}

#[test]
fn new_year_day_resolves_to_next_offset() {
    assert_eq!(academic_year_for(date(2025, 4, 14)), 2025 + 57);
}

#[test]
fn late_year_resolves_to_next_offset() {
    assert_eq!(academic_year_for(date(2025, 12, 31)), 2025 + 57);
}

#[test]
fn january_resolves_to_previous_offset() {
    assert_eq!(academic_year_for(date(2026, 1, 1)), 2026 + 56);
}

#[test]
fn resolution_is_deterministic() {
    let d = date(2024, 7, 4);
    assert_eq!(academic_year_for(d), academic_year_for(d));
}

#[test]
fn leap_day_resolves() {
    assert_eq!(academic_year_for(date(2024, 2, 29)), 2024 + 56);
}
