//! End-to-end placement and validation through the public API.

use std::collections::BTreeMap;

use beeplan::catalog::Catalog;
use beeplan::conflict::ConflictKind;
use beeplan::exchange;
use beeplan::grid::is_exam_block;
use beeplan::model::{Course, Instructor, Room, TimeSlot, Weekday};
use beeplan::scheduler::{CatalogError, Scheduler};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// A department-sized catalog: uneven availability, two theory/lab pairs,
/// electives from every year and both CENG and SENG codes.
fn department() -> Catalog {
    use Weekday::*;

    let instructors = vec![
        Instructor::new(1, "Dr. Smith", vec![Monday, Tuesday, Wednesday, Thursday, Friday]),
        Instructor::new(2, "Dr. Jones", vec![Monday, Wednesday, Friday]),
        Instructor::new(3, "Dr. Brown", vec![Tuesday, Thursday]),
        Instructor::new(4, "Dr. Green", vec![Friday]),
        Instructor::new(5, "Dr. White", vec![]),
    ];
    let rooms = vec![
        Room::classroom("A101", 50),
        Room::classroom("A102", 60),
        Room::lab("BIGLAB", 80),
        Room::lab("LAB1", 30),
    ];
    let mut courses = vec![
        Course::theory("CS101", "Introduction to Computer Science", 1, 1),
        Course::lab("CS101L", "CS101 Lab", 1, 1).with_duration_hours(2),
        Course::theory("CS102", "Programming", 2, 1),
        Course::lab("CS102L", "Programming Lab", 2, 1),
        Course::theory("CS201", "Data Structures", 2, 2),
        Course::theory("CS202", "Discrete Math", 3, 2),
        Course::theory("CS301", "Algorithms", 3, 3),
        Course::theory("CS302", "Databases", 1, 3),
        Course::theory("CENG401", "Embedded Systems", 1, 4),
        Course::theory("SENG402", "Software Architecture", 2, 4),
        Course::theory("CS403", "Compilers", 4, 4),
        Course::theory("PHIL100", "Ethics", 5, 1),
    ];
    courses.extend((1..=6).map(|i| Course::theory(format!("MATH{i}"), format!("Math {i}"), 4, 1)));

    Catalog {
        instructors,
        rooms,
        courses,
        ..Catalog::default()
    }
}

fn generated(catalog: Catalog) -> Scheduler {
    let mut s = Scheduler::from_catalog(catalog).unwrap();
    s.generate_schedule();
    s
}

fn position(s: &Scheduler, code: &str) -> Option<(Weekday, TimeSlot)> {
    s.grid()
        .occupied()
        .find(|slot| slot.course.as_ref().is_some_and(|c| c.code == code))
        .map(|slot| (slot.day, slot.time))
}

fn count(s: &Scheduler, kind: ConflictKind) -> usize {
    s.conflicts().iter().filter(|c| c.kind == kind).count()
}

fn slot(i: usize) -> TimeSlot {
    TimeSlot::new(i).unwrap()
}

// ── Properties over a generated schedule ──────────────────────────────────────

#[test]
fn every_placed_course_appears_once() {
    let s = generated(department());
    let mut seen = BTreeMap::new();
    for slot in s.grid().occupied() {
        let code = slot.course.as_ref().unwrap().code.clone();
        *seen.entry(code).or_insert(0) += 1;
    }
    assert!(seen.values().all(|&n| n == 1), "{seen:?}");
    assert!(s.grid().collisions().is_empty(), "placement never collides");
}

#[test]
fn exam_block_stays_empty() {
    let s = generated(department());
    for slot in s.grid().occupied() {
        assert!(!is_exam_block(slot.day, slot.time), "{:?}", slot);
    }
}

#[test]
fn availability_is_respected() {
    let s = generated(department());
    for slot in s.grid().occupied() {
        let course = slot.course.as_ref().unwrap();
        let instructor = s.instructor(course.instructor_id).unwrap();
        assert!(instructor.is_available_on(slot.day), "{} on {}", course.code, slot.day);
    }
}

#[test]
fn paired_labs_follow_their_theory() {
    let s = generated(department());
    for (theory, lab) in [("CS101", "CS101L"), ("CS102", "CS102L")] {
        let (t_day, t_slot) = position(&s, theory).unwrap();
        let (l_day, l_slot) = position(&s, lab).unwrap();
        assert_eq!(t_day, l_day, "{lab} on its theory's day");
        assert!(l_slot > t_slot, "{lab} after {theory}");
    }
}

#[test]
fn labs_never_use_oversized_rooms() {
    let s = generated(department());
    for slot in s.grid().occupied() {
        let course = slot.course.as_ref().unwrap();
        let room = slot.room.as_ref().unwrap();
        assert_eq!(room.is_lab, course.is_lab);
        if course.is_lab {
            assert!(room.capacity <= s.policy().max_lab_room_capacity);
        }
    }
}

#[test]
fn no_instructor_exceeds_daily_theory_cap() {
    let s = generated(department());
    let mut load: BTreeMap<(u32, Weekday), u32> = BTreeMap::new();
    for slot in s.grid().occupied() {
        let course = slot.course.as_ref().unwrap();
        if !course.is_lab {
            *load.entry((course.instructor_id, slot.day)).or_insert(0) += 1;
        }
    }
    assert!(load.values().all(|&n| n <= 4), "{load:?}");

    // Dr. Green only teaches Fridays: six slots outside the exam block, cap four.
    assert_eq!(load.get(&(4, Weekday::Friday)), Some(&4));
}

#[test]
fn only_unplaceable_courses_are_reported() {
    let s = generated(department());

    let mut unplaced: Vec<&str> = s
        .conflicts()
        .iter()
        .filter(|c| c.kind == ConflictKind::UnplacedCourse)
        .filter_map(|c| c.course.as_deref())
        .collect();
    unplaced.sort();

    // PHIL100: instructor without availability.  Dr. Green has seven Friday
    // theory courses and only four fit under the cap.
    assert_eq!(unplaced, vec!["CS403", "MATH5", "MATH6", "PHIL100"]);
    assert_eq!(s.conflicts().len(), unplaced.len(), "grid itself is clean");
    assert!(s.grid().occupied().all(|slot| slot.has_conflict));
}

#[test]
fn validation_is_idempotent() {
    let mut s = generated(department());
    let first = s.conflicts().to_vec();
    s.validate();
    let second = s.conflicts().to_vec();
    s.validate();
    assert_eq!(first, second);
    assert_eq!(second, s.conflicts());
}

#[test]
fn generation_is_deterministic_across_engines() {
    let a = generated(department());
    let b = generated(department());
    let a_slots: Vec<_> = a.grid().occupied().cloned().collect();
    let b_slots: Vec<_> = b.grid().occupied().cloned().collect();
    assert_eq!(a_slots, b_slots);
    assert_eq!(a.conflicts(), b.conflicts());
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn daily_cap_boundary_is_four_not_five() {
    let instructors = vec![Instructor::new(1, "Dr. Solo", vec![Weekday::Monday])];
    let rooms = vec![Room::classroom("A101", 50)];

    let four: Vec<Course> = (1..=4)
        .map(|i| Course::theory(format!("T{i}"), "Theory", 1, 1))
        .collect();
    let mut s = Scheduler::new(four.clone(), rooms.clone(), instructors.clone()).unwrap();
    assert!(s.generate_schedule(), "four sessions fit under the cap");

    let mut five = four;
    five.push(Course::theory("T5", "Theory", 1, 1));
    let mut s = Scheduler::new(five, rooms, instructors).unwrap();
    assert!(!s.generate_schedule());
    assert_eq!(count(&s, ConflictKind::UnplacedCourse), 1);
    assert_eq!(s.conflicts()[0].course.as_deref(), Some("T5"));
}

#[test]
fn cs101_lab_lands_after_cs101() {
    let instructors = vec![Instructor::new(1, "Dr. Smith", Weekday::ALL.to_vec())];
    let rooms = vec![Room::classroom("A101", 50), Room::lab("LAB1", 30)];
    let courses = vec![
        Course::lab("CS101L", "CS101 Lab", 1, 1),
        Course::theory("CS101", "Intro", 1, 1),
    ];
    let mut s = Scheduler::new(courses, rooms, instructors).unwrap();
    assert!(s.generate_schedule());

    let (t_day, t_slot) = position(&s, "CS101").unwrap();
    let (l_day, l_slot) = position(&s, "CS101L").unwrap();
    assert_eq!(t_day, l_day);
    assert!(l_slot.index() > t_slot.index());
}

#[test]
fn duplicate_slot_import_surfaces_one_instructor_overlap() {
    let json = r#"{
  "days": ["Monday"],
  "schedule": {
    "Monday": {
      "08:30 - 09:20": {"course_code": "CS201", "room_id": "A101", "has_conflict": false},
      "08:30 - 09:20": {"course_code": "CS102", "room_id": "A102", "has_conflict": false}
    }
  }
}"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dup.json");
    std::fs::write(&path, json).unwrap();

    let mut s = Scheduler::from_catalog(department()).unwrap();
    let summary = s.import_schedule(&path).unwrap();

    assert_eq!(summary.collisions, 1);
    assert_eq!(s.grid().occupied_count(), 1, "single occupancy survives import");
    assert_eq!(s.conflicts().len(), 1);
    assert_eq!(count(&s, ConflictKind::InstructorOverlap), 1);
}

#[test]
fn imported_elective_clashes_are_reported() {
    let mut s = Scheduler::from_catalog(department()).unwrap();
    s.import_session(Weekday::Tuesday, slot(0), "CS301", None, false);
    s.import_session(Weekday::Tuesday, slot(0), "CS403", None, false);
    s.import_session(Weekday::Wednesday, slot(2), "CENG401", None, false);
    s.import_session(Weekday::Wednesday, slot(2), "SENG402", None, false);

    assert!(!s.validate());
    // CENG401/SENG402 are both year 4, so only the code rule fires there.
    assert_eq!(count(&s, ConflictKind::ElectiveOverlap), 2);
    assert_eq!(count(&s, ConflictKind::InstructorOverlap), 0);
}

#[test]
fn imported_lab_in_big_room_is_a_capacity_violation() {
    let mut s = Scheduler::from_catalog(department()).unwrap();
    s.import_session(Weekday::Thursday, slot(6), "CS102L", Some("BIGLAB"), false);

    assert!(!s.validate());
    assert_eq!(count(&s, ConflictKind::CapacityViolation), 1);
    assert_eq!(s.conflicts()[0].capacity, Some(80));
}

#[test]
fn export_import_round_trip_restores_grid_and_clears_unplaced() {
    let original = generated(department());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    exchange::export_json(&original, &path).unwrap();

    let mut restored = Scheduler::from_catalog(department()).unwrap();
    restored.import_schedule(&path).unwrap();

    let before: Vec<_> = original.grid().occupied().map(|s| (s.day, s.time)).collect();
    let after: Vec<_> = restored.grid().occupied().map(|s| (s.day, s.time)).collect();
    assert_eq!(before, after);
    // Unplaced courses are not part of an exported grid.
    assert!(restored.conflicts().is_empty());
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn unknown_instructor_fails_construction() {
    let mut catalog = department();
    catalog.courses.push(Course::theory("GHOST1", "Ghost", 99, 1));
    let err = Scheduler::from_catalog(catalog).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UnknownInstructor { instructor_id: 99, .. }
    ));
}

#[test]
fn catalog_file_drives_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    department().save_to_file(&path).unwrap();

    let loaded = Catalog::load_from_file(&path).unwrap();
    let from_file = generated(loaded);
    let in_memory = generated(department());
    assert_eq!(from_file.conflicts(), in_memory.conflicts());
}
