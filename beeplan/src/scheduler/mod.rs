//! Timetable placement engine.
//!
//! [`Scheduler`] owns the read-only entity collections, the [`ScheduleGrid`]
//! and the current conflict list.  One call to
//! [`generate_schedule()`](Scheduler::generate_schedule) performs a single
//! deterministic greedy pass: no backtracking and no optimality guarantee.
//!
//! # Placement order
//! Courses are stably sorted by `(is_lab, year)`: theory before lab, then
//! lower years first.  Ties keep input order.
//!
//! # Slot scan
//! For each course, days Monday→Friday, then slots in canonical order.  The
//! first `(day, slot, room)` that passes every check wins:
//!
//! | # | Check | Rejects when |
//! |---|---|---|
//! | 1 | availability | instructor does not teach that day (whole day skipped) |
//! | 2 | exam block | Friday slot 4 or 5 |
//! | 3 | occupancy | slot already holds a course |
//! | 4 | lab after theory | paired theory not earlier on the same day |
//! | 5 | room | no room of matching type (labs: capacity ≤ limit) free at that time |
//! | 6 | daily cap | instructor already has the maximum theory sessions that day |
//! | 7 | elective | clash with the slot's current occupant |
//!
//! A course that passes nowhere becomes an `unplaced_course` conflict; the run
//! always continues.
//!
//! # Example
//! ```rust
//! use beeplan::catalog::Catalog;
//! use beeplan::scheduler::Scheduler;
//!
//! let mut scheduler = Scheduler::from_catalog(Catalog::sample()).unwrap();
//! let ok = scheduler.generate_schedule();
//! assert!(ok);
//! assert!(scheduler.conflicts().is_empty());
//! ```

pub mod error;
pub mod rules;
pub mod validator;

pub use error::CatalogError;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, SchedulingPolicy};
use crate::conflict::Conflict;
use crate::grid::{is_exam_block, ImportOutcome, ScheduleGrid};
use crate::model::{Course, Instructor, InstructorId, Room, TimeSlot, Weekday};

// ── Internal state types ──────────────────────────────────────────────────────

/// Per-call theory-session counter: instructor → (day → sessions placed).
///
/// Lives only for the duration of one `generate_schedule()` call.
type DailyLoad = BTreeMap<InstructorId, BTreeMap<Weekday, u32>>;

// ── Query surface types ───────────────────────────────────────────────────────

/// One occupied cell of [`Scheduler::schedule_grid()`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    pub course: &'a Course,
    pub room: Option<&'a Room>,
    /// Resolved instructor display name.
    pub instructor: Cow<'a, str>,
    pub has_conflict: bool,
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The timetable engine.
///
/// Each instance exclusively owns its grid and conflict list; independent
/// instances share no mutable state.
#[derive(Debug, Clone)]
pub struct Scheduler {
    courses: Vec<Course>,
    rooms: Vec<Room>,
    instructors: BTreeMap<InstructorId, Instructor>,
    policy: SchedulingPolicy,
    grid: ScheduleGrid,
    /// `unplaced_course` records from the last placement run.  The validator
    /// cannot rediscover these from the grid, so they are kept here and
    /// prepended to every validation result.
    unplaced: Vec<Conflict>,
    conflicts: Vec<Conflict>,
}

impl Scheduler {
    /// Builds an engine with the default [`SchedulingPolicy`].
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] found, checking instructors, then
    /// rooms, then courses, each in input order.
    pub fn new(
        courses: Vec<Course>,
        rooms: Vec<Room>,
        instructors: Vec<Instructor>,
    ) -> Result<Self, CatalogError> {
        Self::with_policy(courses, rooms, instructors, SchedulingPolicy::default())
    }

    /// Builds an engine with an explicit policy.
    pub fn with_policy(
        courses: Vec<Course>,
        rooms: Vec<Room>,
        instructors: Vec<Instructor>,
        policy: SchedulingPolicy,
    ) -> Result<Self, CatalogError> {
        let instructors = Self::index_instructors(instructors)?;
        Self::check_rooms(&rooms)?;
        Self::check_courses(&courses, &instructors)?;

        info!(
            courses = courses.len(),
            rooms = rooms.len(),
            instructors = instructors.len(),
            "Scheduler initialised"
        );

        Ok(Self {
            courses,
            rooms,
            instructors,
            policy,
            grid: ScheduleGrid::new(),
            unplaced: Vec::new(),
            conflicts: Vec::new(),
        })
    }

    /// Builds an engine from a loaded [`Catalog`], honouring its policy block.
    pub fn from_catalog(catalog: Catalog) -> Result<Self, CatalogError> {
        Self::with_policy(
            catalog.courses,
            catalog.rooms,
            catalog.instructors,
            catalog.policy,
        )
    }

    // ── Construction checks ───────────────────────────────────────────────────

    fn index_instructors(
        instructors: Vec<Instructor>,
    ) -> Result<BTreeMap<InstructorId, Instructor>, CatalogError> {
        let mut by_id = BTreeMap::new();
        for inst in instructors {
            let id = inst.id;
            if by_id.insert(id, inst).is_some() {
                return Err(CatalogError::DuplicateInstructor { id });
            }
        }
        Ok(by_id)
    }

    fn check_rooms(rooms: &[Room]) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for room in rooms {
            if room.id.trim().is_empty() {
                return Err(CatalogError::EmptyRoomId);
            }
            if !seen.insert(room.id.as_str()) {
                return Err(CatalogError::DuplicateRoom {
                    id: room.id.clone(),
                });
            }
            if room.capacity == 0 {
                return Err(CatalogError::InvalidCapacity {
                    room: room.id.clone(),
                    capacity: room.capacity,
                });
            }
        }
        Ok(())
    }

    fn check_courses(
        courses: &[Course],
        instructors: &BTreeMap<InstructorId, Instructor>,
    ) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for course in courses {
            if course.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode);
            }
            if !seen.insert(course.code.as_str()) {
                return Err(CatalogError::DuplicateCourse {
                    code: course.code.clone(),
                });
            }
            if !(1..=4).contains(&course.year) {
                return Err(CatalogError::InvalidYear {
                    course: course.code.clone(),
                    year: course.year,
                });
            }
            if !instructors.contains_key(&course.instructor_id) {
                return Err(CatalogError::UnknownInstructor {
                    course: course.code.clone(),
                    instructor_id: course.instructor_id,
                });
            }
        }
        Ok(())
    }

    // ── Placement ─────────────────────────────────────────────────────────────

    /// Places every course it can and validates the result.
    ///
    /// The grid is cleared first, so repeated calls start from the same empty
    /// state.  Returns `true` when the final conflict list is empty.
    pub fn generate_schedule(&mut self) -> bool {
        self.clear_schedule();

        let order = self.placement_order();
        let mut load = DailyLoad::new();

        info!(
            courses = order.len(),
            max_daily_theory = self.policy.max_daily_theory_sessions,
            max_lab_capacity = self.policy.max_lab_room_capacity,
            "=== Scheduler::generate_schedule() ==="
        );

        for idx in order {
            let course = &self.courses[idx];

            let found = self
                .find_placement(course, &load)
                .map(|(day, time, room)| (day, time, room.clone()));

            match found {
                Some((day, time, room)) => {
                    if !course.is_lab {
                        *load
                            .entry(course.instructor_id)
                            .or_default()
                            .entry(day)
                            .or_insert(0) += 1;
                    }
                    debug!(
                        course = %course.code,
                        day    = %day,
                        slot   = time.index(),
                        room   = %room.id,
                        "✓ placed"
                    );
                    self.grid.place(day, time, course.clone(), room);
                }
                None => {
                    warn!(course = %course.code, "✗ no valid day/slot/room — course unplaced");
                    self.unplaced.push(Conflict::unplaced_course(&course.code));
                }
            }
        }

        info!(
            placed = self.grid.occupied_count(),
            unplaced = self.unplaced.len(),
            "placement pass done"
        );

        self.validate()
    }

    /// Course indices in placement order: theory before lab, then ascending
    /// year.  `sort_by_key` is stable, so ties keep input order.
    fn placement_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.courses.len()).collect();
        order.sort_by_key(|&i| (self.courses[i].is_lab, self.courses[i].year));
        order
    }

    /// Scans the grid for the first slot and room that accept `course`.
    fn find_placement(
        &self,
        course: &Course,
        load: &DailyLoad,
    ) -> Option<(Weekday, TimeSlot, &Room)> {
        let instructor = self.instructors.get(&course.instructor_id)?;

        let theory = rules::find_theory_course(course, &self.courses);
        if course.is_lab {
            match theory {
                Some(t) => debug!(lab = %course.code, theory = %t.code, "lab paired with theory"),
                None => debug!(lab = %course.code, "no theory pairing — lab placed freely"),
            }
        }

        for day in Weekday::ALL {
            if !instructor.is_available_on(day) {
                continue;
            }

            for time in TimeSlot::all() {
                if is_exam_block(day, time) {
                    continue;
                }
                if self.grid.is_occupied(day, time) {
                    continue;
                }
                if let Some(theory) = theory {
                    if !self.lab_follows_theory(day, time, theory) {
                        continue;
                    }
                }
                let Some(room) = self.find_suitable_room(course, day, time) else {
                    continue;
                };
                if !course.is_lab && !self.within_daily_limit(course.instructor_id, day, load) {
                    continue;
                }
                if !self.elective_constraints_hold(course, day, time) {
                    continue;
                }
                return Some((day, time, room));
            }
        }

        None
    }

    /// `true` if `theory` is already on `day` at a slot strictly before `time`.
    fn lab_follows_theory(&self, day: Weekday, time: TimeSlot, theory: &Course) -> bool {
        self.grid
            .position_of(day, &theory.code)
            .is_some_and(|theory_time| time > theory_time)
    }

    /// First room, in catalog order, whose type matches the course, that
    /// respects the lab capacity limit and that is free at `day`/`time`.
    fn find_suitable_room(&self, course: &Course, day: Weekday, time: TimeSlot) -> Option<&Room> {
        self.rooms.iter().find(|room| {
            room.is_lab == course.is_lab
                && !(course.is_lab && room.capacity > self.policy.max_lab_room_capacity)
                && self.is_room_available(room, day, time)
        })
    }

    /// Occupancy is global, so a room is free exactly when the slot is empty.
    fn is_room_available(&self, _room: &Room, day: Weekday, time: TimeSlot) -> bool {
        !self.grid.is_occupied(day, time)
    }

    fn within_daily_limit(&self, instructor: InstructorId, day: Weekday, load: &DailyLoad) -> bool {
        let placed = load
            .get(&instructor)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(0);
        placed < self.policy.max_daily_theory_sessions
    }

    /// Elective rule against whatever already occupies the slot.  Under
    /// single occupancy the slot is always empty here.
    fn elective_constraints_hold(&self, course: &Course, day: Weekday, time: TimeSlot) -> bool {
        match &self.grid.slot(day, time).course {
            None => true,
            Some(other) => rules::elective_clash(course, other).is_none(),
        }
    }

    // ── Validation / mutation ─────────────────────────────────────────────────

    /// Recomputes the conflict list from the current grid and refreshes every
    /// slot's `has_conflict` flag.  Returns `true` when no conflicts remain.
    pub fn validate(&mut self) -> bool {
        self.conflicts = validator::validate(&mut self.grid, &self.unplaced, &self.policy);
        self.conflicts.is_empty()
    }

    /// Empties the grid and forgets unplaced courses and conflicts.
    pub fn clear_schedule(&mut self) {
        self.grid.clear();
        self.unplaced.clear();
        self.conflicts.clear();
    }

    /// Writes a session straight into the grid, bypassing placement.
    ///
    /// The course is resolved by code and the room by id; an unknown room id
    /// leaves the session without a room.  Returns `None` when the course is
    /// not in the catalog.  Call [`validate()`](Self::validate) afterwards.
    pub fn import_session(
        &mut self,
        day: Weekday,
        time: TimeSlot,
        course_code: &str,
        room_id: Option<&str>,
        has_conflict: bool,
    ) -> Option<ImportOutcome> {
        let course = self.course(course_code)?.clone();
        let room = room_id.and_then(|id| {
            let room = self.room(id).cloned();
            if room.is_none() {
                warn!(course = %course_code, room = %id, "unknown room id — session imported without room");
            }
            room
        });
        Some(self.grid.import(day, time, course, room, has_conflict))
    }

    // ── Query surface ─────────────────────────────────────────────────────────

    /// The grid as rows of time slots × columns of days, both in canonical
    /// order.  Empty cells are `None`.
    pub fn schedule_grid(&self) -> Vec<Vec<Option<GridCell<'_>>>> {
        TimeSlot::all()
            .map(|time| {
                Weekday::ALL
                    .iter()
                    .map(|&day| {
                        let slot = self.grid.slot(day, time);
                        slot.course.as_ref().map(|course| GridCell {
                            course,
                            room: slot.room.as_ref(),
                            instructor: self.instructor_name(course.instructor_id),
                            has_conflict: slot.has_conflict,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Conflicts from the last validation pass.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&Instructor> {
        self.instructors.get(&id)
    }

    /// Display name for `id`, or `"Instructor <id>"` if it is not known.
    pub fn instructor_name(&self, id: InstructorId) -> Cow<'_, str> {
        match self.instructors.get(&id) {
            Some(inst) => Cow::Borrowed(inst.name.as_str()),
            None => Cow::Owned(format!("Instructor {}", id)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
