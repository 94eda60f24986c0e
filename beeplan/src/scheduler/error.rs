/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for engine construction.
//!
//! [`CatalogError`] is returned from
//! [`Scheduler::new()`](super::Scheduler::new) when the entity collections are
//! malformed.  Construction fails loudly instead of degrading; the only
//! tolerated gap is an instructor with no listed availability, which surfaces
//! later as `unplaced_course` conflicts.
//!
//! Placement outcomes are never errors: see [`Conflict`](crate::conflict::Conflict).

use thiserror::Error;

use crate::model::InstructorId;

/// Why a course/room/instructor catalog was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two instructors share an `id`.
    #[error("duplicate instructor id {id}")]
    DuplicateInstructor { id: InstructorId },

    /// A room has an empty `id`.
    #[error("room with empty id")]
    EmptyRoomId,

    /// Two rooms share an `id`.
    #[error("duplicate room id '{id}'")]
    DuplicateRoom { id: String },

    /// Room capacity must be at least one seat.
    #[error("room '{room}' has invalid capacity {capacity} — must be positive")]
    InvalidCapacity { room: String, capacity: u32 },

    /// A course has an empty `code`.
    #[error("course with empty code")]
    EmptyCode,

    /// Two courses share a `code`.
    #[error("duplicate course code '{code}'")]
    DuplicateCourse { code: String },

    /// A course references an instructor that is not in the catalog.
    #[error("course '{course}' references unknown instructor {instructor_id}")]
    UnknownInstructor {
        course: String,
        instructor_id: InstructorId,
    },

    /// Curriculum year outside 1–4.
    #[error("course '{course}' has invalid year {year} (valid: 1-4)")]
    InvalidYear { course: String, year: u8 },
}
