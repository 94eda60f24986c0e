/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Conflict records produced by placement and validation.
//!
//! Conflicts are data returned to the caller, not errors: an unplaceable
//! course or a double-booked instructor never aborts a run.
//!
//! | Kind | Trigger |
//! |---|---|
//! | `unplaced_course` | no valid day/slot/room for a course during placement |
//! | `instructor_overlap` | same instructor at an identical day/time |
//! | `capacity_violation` | lab session in a room above the lab capacity limit |
//! | `elective_overlap` | year-3/year-4 or CENG/SENG sessions sharing a slot |

use std::fmt;

use crate::model::{InstructorId, TimeSlot, Weekday};

/// Conflict taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    UnplacedCourse,
    InstructorOverlap,
    CapacityViolation,
    ElectiveOverlap,
}

impl ConflictKind {
    /// Snake-case tag, e.g. `"unplaced_course"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::UnplacedCourse => "unplaced_course",
            ConflictKind::InstructorOverlap => "instructor_overlap",
            ConflictKind::CapacityViolation => "capacity_violation",
            ConflictKind::ElectiveOverlap => "elective_overlap",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected or residual constraint violation.
///
/// Only `kind` and `message` are always present; the optional fields carry
/// whatever context the triggering check had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
    pub course: Option<String>,
    pub day: Option<Weekday>,
    pub time: Option<TimeSlot>,
    pub room: Option<String>,
    pub instructor: Option<InstructorId>,
    pub capacity: Option<u32>,
}

impl Conflict {
    fn new(kind: ConflictKind, message: String) -> Self {
        Self {
            kind,
            message,
            course: None,
            day: None,
            time: None,
            room: None,
            instructor: None,
            capacity: None,
        }
    }

    /// No day/slot/room combination satisfied every rule for `course`.
    pub fn unplaced_course(course: &str) -> Self {
        Self {
            course: Some(course.to_string()),
            ..Self::new(
                ConflictKind::UnplacedCourse,
                format!("Could not place {}", course),
            )
        }
    }

    /// `instructor` already teaches another session at `day`/`time`.
    pub fn instructor_overlap(
        course: &str,
        instructor: InstructorId,
        day: Weekday,
        time: TimeSlot,
    ) -> Self {
        Self {
            course: Some(course.to_string()),
            instructor: Some(instructor),
            day: Some(day),
            time: Some(time),
            ..Self::new(
                ConflictKind::InstructorOverlap,
                format!("Instructor {} double-booked at {} {}", instructor, day, time),
            )
        }
    }

    /// Lab session `course` sits in `room`, whose `capacity` is above `limit`.
    pub fn capacity_violation(
        course: &str,
        room: &str,
        capacity: u32,
        limit: u32,
        day: Weekday,
        time: TimeSlot,
    ) -> Self {
        Self {
            course: Some(course.to_string()),
            room: Some(room.to_string()),
            capacity: Some(capacity),
            day: Some(day),
            time: Some(time),
            ..Self::new(
                ConflictKind::CapacityViolation,
                format!("Lab room {} exceeds {} student capacity", room, limit),
            )
        }
    }

    /// `course` and `other` share `day`/`time` but may not overlap.
    pub fn elective_overlap(
        course: &str,
        other: &str,
        reason: impl fmt::Display,
        day: Weekday,
        time: TimeSlot,
    ) -> Self {
        Self {
            course: Some(course.to_string()),
            day: Some(day),
            time: Some(time),
            ..Self::new(
                ConflictKind::ElectiveOverlap,
                format!(
                    "{} and {} overlap at {} {} ({})",
                    course, other, day, time, reason
                ),
            )
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unplaced_course_carries_code() {
        let c = Conflict::unplaced_course("CS101");
        assert_eq!(c.kind, ConflictKind::UnplacedCourse);
        assert_eq!(c.course.as_deref(), Some("CS101"));
        assert_eq!(c.message, "Could not place CS101");
        assert!(c.day.is_none());
    }

    #[test]
    fn instructor_overlap_message_names_slot() {
        let slot = TimeSlot::new(0).unwrap();
        let c = Conflict::instructor_overlap("CS201", 2, Weekday::Monday, slot);
        assert_eq!(c.message, "Instructor 2 double-booked at Monday 08:30 - 09:20");
        assert_eq!(c.instructor, Some(2));
        assert_eq!(c.to_string(), format!("[instructor_overlap] {}", c.message));
    }

    #[test]
    fn capacity_violation_records_room_and_capacity() {
        let slot = TimeSlot::new(2).unwrap();
        let c = Conflict::capacity_violation("CS101L", "BIGLAB", 60, 40, Weekday::Tuesday, slot);
        assert_eq!(c.room.as_deref(), Some("BIGLAB"));
        assert_eq!(c.capacity, Some(60));
        assert_eq!(c.message, "Lab room BIGLAB exceeds 40 student capacity");
    }
}
