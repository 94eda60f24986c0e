/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The weekly schedule grid.
//!
//! A fixed 5-day × 8-slot table of [`ScheduleSlot`]s and the only place where
//! "a course occupies a time" is recorded.  Each slot holds **at most one**
//! session: the timetable models a single shared resource, so two sessions
//! at the same day/time are never both stored in the grid.
//!
//! # Import collisions
//! A schedule import bypasses placement and may name the same day/time twice.
//! The first session wins the slot; every later one is kept as a
//! [`Collision`] beside the grid so the validator can still report it.
//! Placement never produces collisions.

use tracing::warn;

use crate::model::{Course, Room, TimeSlot, Weekday};

// ── Exam block ────────────────────────────────────────────────────────────────

/// Slot indices reserved for exams on Friday ("13:20 - 14:10", "14:20 - 15:10").
pub const EXAM_BLOCK_SLOTS: [usize; 2] = [4, 5];

/// Returns `true` for the two Friday afternoon slots that never receive a
/// course during placement.
pub fn is_exam_block(day: Weekday, time: TimeSlot) -> bool {
    day == Weekday::Friday && EXAM_BLOCK_SLOTS.contains(&time.index())
}

// ── ScheduleSlot ──────────────────────────────────────────────────────────────

/// One `(day, time)` cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub time: TimeSlot,
    pub course: Option<Course>,
    pub room: Option<Room>,
    pub has_conflict: bool,
}

impl ScheduleSlot {
    fn empty(day: Weekday, time: TimeSlot) -> Self {
        Self {
            day,
            time,
            course: None,
            room: None,
            has_conflict: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.course.is_some()
    }

    fn clear(&mut self) {
        self.course = None;
        self.room = None;
        self.has_conflict = false;
    }
}

/// A session an import tried to put into an already-occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub day: Weekday,
    pub time: TimeSlot,
    pub course: Course,
    pub room: Option<Room>,
}

/// Where an imported session ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The slot was free and now holds the session.
    Placed,
    /// The slot was taken; the session was recorded as a [`Collision`].
    Collided,
}

// ── ScheduleGrid ──────────────────────────────────────────────────────────────

/// Day-major table of slots: `slots[day.index()][time.index()]`.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    slots: [[ScheduleSlot; TimeSlot::COUNT]; Weekday::COUNT],
    collisions: Vec<Collision>,
}

impl ScheduleGrid {
    /// Builds an empty grid with every weekday and every canonical slot.
    pub fn new() -> Self {
        let slots =
            Weekday::ALL.map(|day| TimeSlot::ALL.map(|time| ScheduleSlot::empty(day, time)));
        Self {
            slots,
            collisions: Vec::new(),
        }
    }

    pub fn slot(&self, day: Weekday, time: TimeSlot) -> &ScheduleSlot {
        &self.slots[day.index()][time.index()]
    }

    pub(crate) fn slot_mut(&mut self, day: Weekday, time: TimeSlot) -> &mut ScheduleSlot {
        &mut self.slots[day.index()][time.index()]
    }

    pub fn is_occupied(&self, day: Weekday, time: TimeSlot) -> bool {
        self.slot(day, time).is_occupied()
    }

    /// All slots, Monday first, each day in canonical slot order.
    pub fn slots(&self) -> impl Iterator<Item = &ScheduleSlot> {
        self.slots.iter().flat_map(|day| day.iter())
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = &mut ScheduleSlot> {
        self.slots.iter_mut().flat_map(|day| day.iter_mut())
    }

    /// Occupied slots in canonical order.
    pub fn occupied(&self) -> impl Iterator<Item = &ScheduleSlot> {
        self.slots().filter(|s| s.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Every session at `day`/`time`: the slot occupant first, then any import
    /// collisions in the order they were recorded.
    pub fn sessions_at(
        &self,
        day: Weekday,
        time: TimeSlot,
    ) -> impl Iterator<Item = (&Course, Option<&Room>)> {
        let slot = self.slot(day, time);
        let occupant = slot.course.as_ref().map(|c| (c, slot.room.as_ref()));
        let collided = self
            .collisions
            .iter()
            .filter(move |c| c.day == day && c.time == time)
            .map(|c| (&c.course, c.room.as_ref()));
        occupant.into_iter().chain(collided)
    }

    /// Slot at which `course_code` occupies `day`, if any.
    pub fn position_of(&self, day: Weekday, course_code: &str) -> Option<TimeSlot> {
        self.slots[day.index()]
            .iter()
            .find(|s| s.course.as_ref().is_some_and(|c| c.code == course_code))
            .map(|s| s.time)
    }

    /// Commits a placement.  The caller has already checked the slot is free.
    pub(crate) fn place(&mut self, day: Weekday, time: TimeSlot, course: Course, room: Room) {
        let slot = self.slot_mut(day, time);
        debug_assert!(!slot.is_occupied(), "placement into an occupied slot");
        slot.course = Some(course);
        slot.room = Some(room);
    }

    /// Writes an imported session directly into the grid, bypassing every
    /// placement rule.
    pub(crate) fn import(
        &mut self,
        day: Weekday,
        time: TimeSlot,
        course: Course,
        room: Option<Room>,
        has_conflict: bool,
    ) -> ImportOutcome {
        if is_exam_block(day, time) {
            warn!(course = %course.code, day = %day, time = %time, "imported session lands in the exam block");
        }

        let slot = self.slot_mut(day, time);
        if slot.is_occupied() {
            warn!(
                course   = %course.code,
                occupant = %slot.course.as_ref().map(|c| c.code.as_str()).unwrap_or_default(),
                day      = %day,
                time     = %time,
                "slot already occupied — recording import collision"
            );
            self.collisions.push(Collision {
                day,
                time,
                course,
                room,
            });
            return ImportOutcome::Collided;
        }

        slot.course = Some(course);
        slot.room = room;
        slot.has_conflict = has_conflict;
        ImportOutcome::Placed
    }

    /// Empties every slot and drops all import collisions.
    pub fn clear(&mut self) {
        for slot in self.slots_mut() {
            slot.clear();
        }
        self.collisions.clear();
    }
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
