/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Conflict validation over a filled grid.
//!
//! Validation is a pure function of the grid contents plus the `unplaced`
//! records from the last placement run.  It never moves a session; it only
//! reports and refreshes the `has_conflict` flags, so running it twice in a
//! row yields the same list.
//!
//! # Checks
//! Slots are walked Monday→Friday, each day in canonical slot order.  At each
//! slot every session (occupant, then import collisions) is inspected:
//!
//! | Check | Emits |
//! |---|---|
//! | instructor seen twice at the same day/time | `instructor_overlap` (per extra session) |
//! | lab session in a room above the lab limit | `capacity_violation` |
//! | two sessions in one slot that may not share it | `elective_overlap` (per pair) |
//!
//! # Flags
//! All flags are reset first.  If the final list is non-empty, **every**
//! occupied slot is flagged: the flag marks "this schedule has conflicts",
//! not "this slot is at fault".

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::catalog::SchedulingPolicy;
use crate::conflict::Conflict;
use crate::grid::ScheduleGrid;
use crate::model::{Course, InstructorId, Room, TimeSlot, Weekday};

use super::rules;

// ── Public API ────────────────────────────────────────────────────────────────

/// Validates `grid` and returns the full conflict list.
///
/// `retained` (the unplaced-course records) come first, in placement order,
/// followed by the conflicts found on the grid in canonical slot order.
pub fn validate(
    grid: &mut ScheduleGrid,
    retained: &[Conflict],
    policy: &SchedulingPolicy,
) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = retained.to_vec();
    let mut seen: BTreeMap<InstructorId, BTreeSet<(Weekday, TimeSlot)>> = BTreeMap::new();

    for day in Weekday::ALL {
        for time in TimeSlot::all() {
            let sessions: Vec<(&Course, Option<&Room>)> = grid.sessions_at(day, time).collect();

            for &(course, room) in &sessions {
                if !seen
                    .entry(course.instructor_id)
                    .or_default()
                    .insert((day, time))
                {
                    debug!(course = %course.code, instructor = course.instructor_id, %day, %time, "instructor overlap");
                    conflicts.push(Conflict::instructor_overlap(
                        &course.code,
                        course.instructor_id,
                        day,
                        time,
                    ));
                }

                if let Some(room) = room {
                    if course.is_lab && room.capacity > policy.max_lab_room_capacity {
                        debug!(course = %course.code, room = %room.id, capacity = room.capacity, "lab room over capacity");
                        conflicts.push(Conflict::capacity_violation(
                            &course.code,
                            &room.id,
                            room.capacity,
                            policy.max_lab_room_capacity,
                            day,
                            time,
                        ));
                    }
                }
            }

            for (i, &(a, _)) in sessions.iter().enumerate() {
                for &(b, _) in &sessions[i + 1..] {
                    if let Some(reason) = rules::elective_clash(a, b) {
                        debug!(a = %a.code, b = %b.code, %day, %time, "elective overlap");
                        conflicts.push(Conflict::elective_overlap(&a.code, &b.code, reason, day, time));
                    }
                }
            }
        }
    }

    let flagged = !conflicts.is_empty();
    for slot in grid.slots_mut() {
        slot.has_conflict = flagged && slot.is_occupied();
    }

    info!(
        conflicts = conflicts.len(),
        unplaced = retained.len(),
        sessions = grid.occupied_count() + grid.collisions().len(),
        "validation complete"
    );

    conflicts
}

// ── Tests ─────────────────────────────────────────────────────────────────────
