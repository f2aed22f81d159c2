//! Domain model types for the scheduling engine.

pub mod academic_year;
pub mod schedule;

#[cfg(test)]
#[path = "academic_year_tests.rs"]
mod academic_year_tests;

pub use academic_year::{academic_year_for, current_academic_year};
pub use schedule::{
    ConflictDimension, NewScheduleEntry, ScheduleEntry, ScheduleFilter, SchedulePatch,
    ScheduleRecord, SlotClaim, SlotKey,
};
