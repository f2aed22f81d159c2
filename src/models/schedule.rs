//! Schedule entry domain types.
//!
//! A schedule entry allocates one recurring time slot to a
//! (room, teacher, student group) triple within an academic year. Time slots
//! are opaque labels (e.g. `"Sun-10-11"`) compared only for equality; the
//! engine never reasons about interval overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A committed schedule entry. The id is assigned by the repository on
/// insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub academic_year: i32,
    pub time_slot: String,
    pub room_id: i64,
    pub teacher_email: String,
    pub group_id: i64,
    /// Informational only; not a conflict dimension.
    pub subject_id: i64,
}

impl ScheduleEntry {
    /// The unsaved view of this entry (everything except the id).
    pub fn record(&self) -> ScheduleRecord {
        ScheduleRecord {
            academic_year: self.academic_year,
            time_slot: self.time_slot.clone(),
            room_id: self.room_id,
            teacher_email: self.teacher_email.clone(),
            group_id: self.group_id,
            subject_id: self.subject_id,
        }
    }
}

/// An unsaved schedule record: the payload for inserts and full-record
/// updates. The repository assigns or keeps the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub academic_year: i32,
    pub time_slot: String,
    pub room_id: i64,
    pub teacher_email: String,
    pub group_id: i64,
    pub subject_id: i64,
}

impl ScheduleRecord {
    pub fn into_entry(self, id: i64) -> ScheduleEntry {
        ScheduleEntry {
            id,
            academic_year: self.academic_year,
            time_slot: self.time_slot,
            room_id: self.room_id,
            teacher_email: self.teacher_email,
            group_id: self.group_id,
            subject_id: self.subject_id,
        }
    }

    /// The three slot claims this record makes: one per conflict dimension,
    /// each scoped to the record's year and time slot.
    pub fn slot_claims(&self) -> Vec<SlotClaim> {
        ConflictDimension::ALL
            .iter()
            .map(|dim| SlotClaim {
                academic_year: self.academic_year,
                time_slot: self.time_slot.clone(),
                key: dim.key_of(self),
            })
            .collect()
    }

    /// True when the two records occupy the same slot partition with the
    /// same values on every conflict dimension.
    pub fn same_slot_assignment(&self, other: &ScheduleRecord) -> bool {
        self.academic_year == other.academic_year
            && self.time_slot == other.time_slot
            && self.room_id == other.room_id
            && self.teacher_email == other.teacher_email
            && self.group_id == other.group_id
    }
}

/// Partial update for a schedule entry. `None` always means "retain the
/// current value"; it is never a wildcard and never matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePatch {
    pub academic_year: Option<i32>,
    pub time_slot: Option<String>,
    pub room_id: Option<i64>,
    pub teacher_email: Option<String>,
    pub group_id: Option<i64>,
    pub subject_id: Option<i64>,
}

impl SchedulePatch {
    /// Merge this patch onto an existing entry, retaining every field the
    /// patch leaves unset.
    pub fn apply_to(&self, current: &ScheduleEntry) -> ScheduleRecord {
        ScheduleRecord {
            academic_year: self.academic_year.unwrap_or(current.academic_year),
            time_slot: self
                .time_slot
                .clone()
                .unwrap_or_else(|| current.time_slot.clone()),
            room_id: self.room_id.unwrap_or(current.room_id),
            teacher_email: self
                .teacher_email
                .clone()
                .unwrap_or_else(|| current.teacher_email.clone()),
            group_id: self.group_id.unwrap_or(current.group_id),
            subject_id: self.subject_id.unwrap_or(current.subject_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SchedulePatch::default()
    }
}

/// Input for creating a schedule entry. The academic year may be omitted,
/// in which case the service resolves it from the current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleEntry {
    pub academic_year: Option<i32>,
    pub time_slot: String,
    pub room_id: i64,
    pub teacher_email: String,
    pub group_id: i64,
    pub subject_id: i64,
}

/// Conjunctive filter for repository reads. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub academic_year: Option<i32>,
    pub time_slot: Option<String>,
    pub room_id: Option<i64>,
    pub teacher_email: Option<String>,
    pub group_id: Option<i64>,
}

impl ScheduleFilter {
    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        self.academic_year.map_or(true, |y| entry.academic_year == y)
            && self
                .time_slot
                .as_deref()
                .map_or(true, |s| entry.time_slot == s)
            && self.room_id.map_or(true, |r| entry.room_id == r)
            && self
                .teacher_email
                .as_deref()
                .map_or(true, |t| entry.teacher_email == t)
            && self.group_id.map_or(true, |g| entry.group_id == g)
    }
}

/// The three dimensions on which two entries in the same (year, slot)
/// partition may collide. Any single collision violates the booking
/// invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictDimension {
    Room,
    Teacher,
    Group,
}

impl ConflictDimension {
    pub const ALL: [ConflictDimension; 3] = [
        ConflictDimension::Room,
        ConflictDimension::Teacher,
        ConflictDimension::Group,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictDimension::Room => "room",
            ConflictDimension::Teacher => "teacher",
            ConflictDimension::Group => "group",
        }
    }

    /// Extract this dimension's key from a record.
    pub fn key_of(&self, record: &ScheduleRecord) -> SlotKey {
        match self {
            ConflictDimension::Room => SlotKey::Room(record.room_id),
            ConflictDimension::Teacher => SlotKey::Teacher(record.teacher_email.clone()),
            ConflictDimension::Group => SlotKey::Group(record.group_id),
        }
    }

    /// True when the candidate and the committed entry collide on this
    /// dimension. Year and slot equality are the caller's precondition.
    pub fn collides(&self, candidate: &ScheduleRecord, entry: &ScheduleEntry) -> bool {
        match self {
            ConflictDimension::Room => candidate.room_id == entry.room_id,
            ConflictDimension::Teacher => candidate.teacher_email == entry.teacher_email,
            ConflictDimension::Group => candidate.group_id == entry.group_id,
        }
    }
}

impl fmt::Display for ConflictDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity a record holds on one conflict dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotKey {
    Room(i64),
    Teacher(String),
    Group(i64),
}

impl SlotKey {
    pub fn dimension(&self) -> ConflictDimension {
        match self {
            SlotKey::Room(_) => ConflictDimension::Room,
            SlotKey::Teacher(_) => ConflictDimension::Teacher,
            SlotKey::Group(_) => ConflictDimension::Group,
        }
    }
}

/// One uniqueness claim: within an academic year, a time slot may carry each
/// slot key at most once. The storage layer indexes committed entries by
/// these claims and rejects duplicates atomically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotClaim {
    pub academic_year: i32,
    pub time_slot: String,
    pub key: SlotKey,
}

impl SlotClaim {
    pub fn dimension(&self) -> ConflictDimension {
        self.key.dimension()
    }
}
