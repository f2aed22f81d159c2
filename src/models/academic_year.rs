//! Academic year resolution.
//!
//! Schedules are partitioned by academic year, which follows the Bikram
//! Sambat calendar: the BS year runs ahead of the Gregorian year by 56 until
//! the BS new year (14 April), and by 57 from that day onward.

use chrono::{Datelike, NaiveDate, Utc};

/// Offset added to the Gregorian year before the BS new year.
pub const BS_OFFSET_BEFORE_NEW_YEAR: i32 = 56;
/// Offset added to the Gregorian year on and after the BS new year.
pub const BS_OFFSET_AFTER_NEW_YEAR: i32 = 57;
/// Gregorian month of the BS new year (April).
pub const BS_NEW_YEAR_MONTH: u32 = 4;
/// Gregorian day of month of the BS new year (14 April).
pub const BS_NEW_YEAR_DAY: u32 = 14;

/// Resolve the academic year for a calendar date.
///
/// Pure function of the date: the same input always yields the same year.
/// Callers handling one request must capture "today" once and resolve
/// against that single date rather than calling [`current_academic_year`]
/// repeatedly across a midnight boundary.
pub fn academic_year_for(date: NaiveDate) -> i32 {
    let before_new_year = date.month() < BS_NEW_YEAR_MONTH
        || (date.month() == BS_NEW_YEAR_MONTH && date.day() < BS_NEW_YEAR_DAY);

    if before_new_year {
        date.year() + BS_OFFSET_BEFORE_NEW_YEAR
    } else {
        date.year() + BS_OFFSET_AFTER_NEW_YEAR
    }
}

/// Resolve the academic year for today (UTC).
pub fn current_academic_year() -> i32 {
    academic_year_for(Utc::now().date_naive())
}
