//! Plain-text validation report and conflict summary.

use crate::conflict::{Conflict, ConflictKind};
use crate::model::{TimeSlot, Weekday};
use crate::scheduler::Scheduler;

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 40;

const NO_CONFLICTS: &str = "✓ No conflicts detected. Schedule is valid!";

/// Renders reports from a scheduler's current grid and conflict list.
pub struct ReportGenerator<'a> {
    scheduler: &'a Scheduler,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(scheduler: &'a Scheduler) -> Self {
        Self { scheduler }
    }

    /// Full report: totals, conflicts grouped by kind, then the per-day
    /// schedule.
    pub fn generate_report(&self) -> String {
        let conflicts = self.scheduler.conflicts();
        let grid = self.scheduler.grid();
        let mut lines: Vec<String> = Vec::new();

        lines.extend(banner("SCHEDULE VALIDATION REPORT"));
        lines.push(String::new());
        lines.push(format!("Total Courses Scheduled: {}", grid.occupied_count()));
        lines.push(format!("Total Conflicts Detected: {}", conflicts.len()));
        lines.push(String::new());

        if conflicts.is_empty() {
            lines.push(NO_CONFLICTS.to_string());
            lines.push(String::new());
        } else {
            lines.push("⚠ CONFLICTS DETECTED:".to_string());
            lines.push("-".repeat(RULE_WIDE));
            for (kind, group) in group_by_kind(conflicts) {
                lines.push(format!("\n{} ({}):", heading(kind), group.len()));
                for conflict in group {
                    lines.push(format!("  • {}", conflict.message));
                    if let Some(course) = &conflict.course {
                        lines.push(format!("    Course: {}", course));
                    }
                    if let (Some(day), Some(time)) = (conflict.day, conflict.time) {
                        lines.push(format!("    Time: {} {}", day, time));
                    }
                }
            }
        }

        lines.push(String::new());
        lines.extend(banner("SCHEDULE DETAILS"));
        lines.push(String::new());

        for day in Weekday::ALL {
            lines.push(format!("\n{}:", day));
            lines.push("-".repeat(RULE_NARROW));
            for time in TimeSlot::all() {
                let slot = grid.slot(day, time);
                let Some(course) = &slot.course else {
                    continue;
                };
                let room = slot.room.as_ref().map_or("N/A", |r| r.id.as_str());
                let marker = if slot.has_conflict { " ⚠ CONFLICT" } else { "" };
                lines.push(format!(
                    "  {}: {} - {} (Room: {}){}",
                    time, course.code, course.name, room, marker
                ));
            }
        }

        lines.join("\n")
    }

    /// One line for a clean schedule, otherwise the count and a tally per
    /// kind in first-seen order.
    pub fn conflict_summary(&self) -> String {
        let conflicts = self.scheduler.conflicts();
        if conflicts.is_empty() {
            return NO_CONFLICTS.to_string();
        }

        let tallies: String = group_by_kind(conflicts)
            .into_iter()
            .map(|(kind, group)| format!("• {}: {}\n", title(kind), group.len()))
            .collect();
        format!("⚠ {} conflict(s) detected:\n\n{}", conflicts.len(), tallies)
    }
}

fn banner(title: &str) -> [String; 3] {
    let rule = "=".repeat(RULE_WIDE);
    [rule.clone(), title.to_string(), rule]
}

/// Conflicts grouped by kind, groups ordered by first appearance.
fn group_by_kind(conflicts: &[Conflict]) -> Vec<(ConflictKind, Vec<&Conflict>)> {
    let mut groups: Vec<(ConflictKind, Vec<&Conflict>)> = Vec::new();
    for conflict in conflicts {
        match groups.iter_mut().find(|(kind, _)| *kind == conflict.kind) {
            Some((_, group)) => group.push(conflict),
            None => groups.push((conflict.kind, vec![conflict])),
        }
    }
    groups
}

/// `instructor_overlap` → `INSTRUCTOR OVERLAP`
fn heading(kind: ConflictKind) -> String {
    kind.as_str().replace('_', " ").to_uppercase()
}

/// `instructor_overlap` → `Instructor Overlap`
fn title(kind: ConflictKind) -> String {
    kind.as_str()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{Course, Instructor, Room};

    fn slot(i: usize) -> TimeSlot {
        TimeSlot::new(i).unwrap()
    }

    #[test]
    fn clean_schedule_report() {
        let mut s = Scheduler::from_catalog(Catalog::sample()).unwrap();
        s.generate_schedule();
        let report = ReportGenerator::new(&s).generate_report();

        assert!(report.starts_with(&"=".repeat(60)));
        assert!(report.contains("Total Courses Scheduled: 5"));
        assert!(report.contains("Total Conflicts Detected: 0"));
        assert!(report.contains(NO_CONFLICTS));
        assert!(report.contains("\nMonday:\n"));
        assert!(report.contains("  08:30 - 09:20: CS101 - Introduction to Computer Science (Room: A101)"));
        assert!(!report.contains("⚠"));
    }

    #[test]
    fn conflicts_grouped_by_kind_in_first_seen_order() {
        let instructors = vec![
            Instructor::new(1, "Dr. A", Weekday::ALL.to_vec()),
            Instructor::new(2, "Dr. B", vec![]),
        ];
        let rooms = vec![Room::classroom("A101", 50), Room::lab("BIG", 80)];
        let courses = vec![
            Course::theory("CS101", "Intro", 1, 1),
            Course::theory("CS102", "Intro II", 2, 1),
            Course::lab("PHYS1L", "Physics lab", 1, 1),
        ];
        let mut s = Scheduler::new(courses, rooms, instructors).unwrap();
        s.generate_schedule();
        s.validate();
        let report = ReportGenerator::new(&s).generate_report();

        // CS102 unplaced (no availability), PHYS1L unplaced (room too big).
        assert!(report.contains("Total Conflicts Detected: 2"));
        assert!(report.contains("\nUNPLACED COURSE (2):\n  • Could not place CS102\n    Course: CS102"));
        assert!(report.contains("(Room: A101) ⚠ CONFLICT"));

        let summary = ReportGenerator::new(&s).conflict_summary();
        assert_eq!(summary, "⚠ 2 conflict(s) detected:\n\n• Unplaced Course: 2\n");
    }

    #[test]
    fn report_lists_time_for_located_conflicts() {
        let mut s = Scheduler::from_catalog(Catalog::sample()).unwrap();
        s.import_session(Weekday::Monday, slot(0), "CS101", None, false);
        s.import_session(Weekday::Monday, slot(0), "CENG401", None, false);
        s.validate();

        let report = ReportGenerator::new(&s).generate_report();
        assert!(report.contains("INSTRUCTOR OVERLAP (1):"));
        assert!(report.contains("    Time: Monday 08:30 - 09:20"));
        assert!(report.contains("(Room: N/A) ⚠ CONFLICT"));
    }

    #[test]
    fn report_lines_follow_fixed_layout() {
        let mut s = Scheduler::from_catalog(Catalog::sample()).unwrap();
        s.generate_schedule();
        let report = ReportGenerator::new(&s).generate_report();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[1], "SCHEDULE VALIDATION REPORT");
        let details = lines.iter().position(|l| *l == "SCHEDULE DETAILS").unwrap();
        assert_eq!(lines[details - 1], "=".repeat(60));
        assert_eq!(lines[details + 1], "=".repeat(60));

        let monday = lines.iter().position(|l| *l == "Monday:").unwrap();
        assert_eq!(lines[monday + 1], "-".repeat(40));
        assert_eq!(
            lines[monday + 2],
            "  08:30 - 09:20: CS101 - Introduction to Computer Science (Room: A101)"
        );

        // Nothing lands on Friday in the sample, so its divider closes the report.
        assert_eq!(lines.last().copied(), Some("-".repeat(40).as_str()));
        assert!(!report.ends_with('\n'));
    }

    #[test]
    fn summary_for_clean_schedule() {
        let s = Scheduler::from_catalog(Catalog::sample()).unwrap();
        assert_eq!(ReportGenerator::new(&s).conflict_summary(), NO_CONFLICTS);
    }

    #[test]
    fn kind_titles() {
        assert_eq!(title(ConflictKind::CapacityViolation), "Capacity Violation");
        assert_eq!(heading(ConflictKind::ElectiveOverlap), "ELECTIVE OVERLAP");
    }
}
