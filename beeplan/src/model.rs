/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Entity model for the timetable engine.
//!
//! ```text
//! catalog file ──(serde)──►  Instructor / Room / Course  ──(Scheduler)──►  ScheduleGrid
//!                             ↑ read-only during a run                     ↑ the only mutable state
//! ```
//!
//! `Instructor`, `Room` and `Course` are plain value records.  They are
//! supplied once when a [`Scheduler`](crate::scheduler::Scheduler) is built and
//! never mutated by the engine afterwards.  Days and time slots are typed
//! ([`Weekday`], [`TimeSlot`]) so a misspelled day name is rejected when the
//! catalog is parsed instead of silently never matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Instructor identity as it appears in the catalog (`instructor_id`).
pub type InstructorId = u32;

// ── Weekday ───────────────────────────────────────────────────────────────────

/// A teaching day of the weekly grid.
///
/// Variant order is the canonical scan order (Monday first); `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days in canonical order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Number of teaching days (grid columns).
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based column index (`Monday` = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Exact (case-sensitive) lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// Canonical slot labels, in grid row order.
pub const TIME_SLOT_LABELS: [&str; 8] = [
    "08:30 - 09:20",
    "09:30 - 10:20",
    "10:30 - 11:20",
    "11:30 - 12:20",
    "13:20 - 14:10",
    "14:20 - 15:10",
    "15:20 - 16:10",
    "16:20 - 17:10",
];

/// One of the eight daily teaching periods, identified by its row index.
///
/// Only indices `0..TimeSlot::COUNT` can be constructed, so every `TimeSlot`
/// has a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(usize);

impl TimeSlot {
    /// Number of periods per day (grid rows).
    pub const COUNT: usize = TIME_SLOT_LABELS.len();

    /// All periods in canonical order.
    pub const ALL: [TimeSlot; Self::COUNT] = [
        TimeSlot(0),
        TimeSlot(1),
        TimeSlot(2),
        TimeSlot(3),
        TimeSlot(4),
        TimeSlot(5),
        TimeSlot(6),
        TimeSlot(7),
    ];

    /// Returns the slot at `index`, or `None` past the last period.
    pub fn new(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(TimeSlot(index))
    }

    /// Lookup by the exact label used in exported schedules.
    pub fn from_label(label: &str) -> Option<Self> {
        TIME_SLOT_LABELS
            .iter()
            .position(|l| *l == label)
            .map(TimeSlot)
    }

    pub fn all() -> impl Iterator<Item = TimeSlot> {
        Self::ALL.into_iter()
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn label(self) -> &'static str {
        TIME_SLOT_LABELS[self.0]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Instructor ────────────────────────────────────────────────────────────────

/// A teaching staff member and the days they can teach.
///
/// An empty `availability` is accepted: every course taught by this
/// instructor will simply fail placement with an `unplaced_course` conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
    #[serde(default)]
    pub availability: Vec<Weekday>,
}

impl Instructor {
    pub fn new(id: InstructorId, name: impl Into<String>, availability: Vec<Weekday>) -> Self {
        Self {
            id,
            name: name.into(),
            availability,
        }
    }

    /// Returns `true` if the instructor may teach on `day`.
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }
}

// ── Room ──────────────────────────────────────────────────────────────────────

/// A classroom or laboratory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    /// Seat count; must be positive.
    pub capacity: u32,
    #[serde(default)]
    pub is_lab: bool,
}

impl Room {
    /// A lecture room.
    pub fn classroom(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            is_lab: false,
        }
    }

    /// A laboratory room.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            is_lab: true,
        }
    }

    /// Human-readable room kind used in exports.
    pub fn kind_label(&self) -> &'static str {
        if self.is_lab {
            "Lab"
        } else {
            "Classroom"
        }
    }
}

// ── Course ────────────────────────────────────────────────────────────────────

fn default_duration_hours() -> u32 {
    1
}

fn default_year() -> u8 {
    1
}

/// One weekly course session to be placed on the grid.
///
/// `duration_hours` and `requires_projector` are carried through import and
/// export but are not consulted by any placement rule; every session occupies
/// exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub instructor_id: InstructorId,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
    #[serde(default)]
    pub is_lab: bool,
    #[serde(default)]
    pub requires_projector: bool,
    /// Curriculum year, 1–4.
    #[serde(default = "default_year")]
    pub year: u8,
}

impl Course {
    /// A one-hour theory (lecture) session.
    pub fn theory(
        code: impl Into<String>,
        name: impl Into<String>,
        instructor_id: InstructorId,
        year: u8,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            instructor_id,
            duration_hours: default_duration_hours(),
            is_lab: false,
            requires_projector: false,
            year,
        }
    }

    /// A laboratory session.
    pub fn lab(
        code: impl Into<String>,
        name: impl Into<String>,
        instructor_id: InstructorId,
        year: u8,
    ) -> Self {
        Self {
            is_lab: true,
            ..Self::theory(code, name, instructor_id, year)
        }
    }

    pub fn with_duration_hours(mut self, hours: u32) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn with_projector(mut self, required: bool) -> Self {
        self.requires_projector = required;
        self
    }

    /// `"Lab"` or `"Theory"`.
    pub fn kind_label(&self) -> &'static str {
        if self.is_lab {
            "Lab"
        } else {
            "Theory"
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
