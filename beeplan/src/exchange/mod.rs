//! Schedule exchange: JSON/CSV export and JSON import.
//!
//! # JSON layout
//! ```json
//! {
//!   "days": ["Monday", ...],
//!   "time_slots": ["08:30 - 09:20", ...],
//!   "schedule": {
//!     "Monday": {
//!       "08:30 - 09:20": {
//!         "course_code": "CS101", "course_name": "...",
//!         "instructor_id": 1, "instructor_name": "Dr. Smith",
//!         "room_id": "A101", "room_capacity": 50,
//!         "is_lab": false, "year": 1, "has_conflict": false
//!       },
//!       "09:30 - 10:20": null
//!     }
//!   }
//! }
//! ```
//! Days and slots are written in canonical order.
//!
//! # Import
//! Import reads the same layout.  Only `course_code`, `room_id` and
//! `has_conflict` are used; everything else is re-derived from the catalog.
//! Entries are processed in file order and **duplicate day/time keys are
//! kept**: a second session for the same slot becomes an import collision so
//! the validator can report it.  Unknown days, slot labels and course codes,
//! and sessions without a `course_code`, are skipped with a warning.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::grid::ImportOutcome;
use crate::model::{TimeSlot, Weekday, TIME_SLOT_LABELS};
use crate::scheduler::Scheduler;

// ── Errors / results ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The document has no top-level `schedule` object.
    #[error("schedule file has no top-level \"schedule\" object")]
    MissingSchedule,
}

/// What a schedule import did with each non-null session entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Sessions written into a free slot.
    pub imported: usize,
    /// Sessions recorded beside an already-occupied slot.
    pub collisions: usize,
    /// Entries with an unknown day, slot label or course code, or no code.
    pub skipped: usize,
}

// ── JSON export ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ExportDocument<'a> {
    days: [&'static str; Weekday::COUNT],
    time_slots: [&'static str; TimeSlot::COUNT],
    schedule: ScheduleView<'a>,
}

#[derive(Serialize)]
struct ExportSession<'a> {
    course_code: &'a str,
    course_name: &'a str,
    instructor_id: u32,
    instructor_name: Cow<'a, str>,
    room_id: Option<&'a str>,
    room_capacity: Option<u32>,
    is_lab: bool,
    year: u8,
    has_conflict: bool,
}

/// `day → DayView`, serialized in weekday order.
struct ScheduleView<'a>(&'a Scheduler);

/// `slot label → session | null`, serialized in slot order.
struct DayView<'a> {
    scheduler: &'a Scheduler,
    day: Weekday,
}

impl Serialize for ScheduleView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Weekday::COUNT))?;
        for day in Weekday::ALL {
            map.serialize_entry(
                day.as_str(),
                &DayView {
                    scheduler: self.0,
                    day,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for DayView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TimeSlot::COUNT))?;
        for time in TimeSlot::all() {
            map.serialize_entry(time.label(), &export_session(self.scheduler, self.day, time))?;
        }
        map.end()
    }
}

fn export_session(scheduler: &Scheduler, day: Weekday, time: TimeSlot) -> Option<ExportSession<'_>> {
    let slot = scheduler.grid().slot(day, time);
    let course = slot.course.as_ref()?;
    Some(ExportSession {
        course_code: &course.code,
        course_name: &course.name,
        instructor_id: course.instructor_id,
        instructor_name: scheduler.instructor_name(course.instructor_id),
        room_id: slot.room.as_ref().map(|r| r.id.as_str()),
        room_capacity: slot.room.as_ref().map(|r| r.capacity),
        is_lab: course.is_lab,
        year: course.year,
        has_conflict: slot.has_conflict,
    })
}

/// Pretty-printed JSON document for the current grid.
pub fn to_json_string(scheduler: &Scheduler) -> Result<String> {
    let doc = ExportDocument {
        days: Weekday::ALL.map(Weekday::as_str),
        time_slots: TIME_SLOT_LABELS,
        schedule: ScheduleView(scheduler),
    };
    serde_json::to_string_pretty(&doc).context("failed to serialize schedule")
}

pub fn export_json(scheduler: &Scheduler, path: &Path) -> Result<()> {
    let content = to_json_string(scheduler)?;
    std::fs::write(path, content)
        .with_context(|| format!("Cannot write schedule file: {}", path.display()))?;
    info!(
        path = %path.display(),
        sessions = scheduler.grid().occupied_count(),
        "schedule exported (JSON)"
    );
    Ok(())
}

// ── CSV export ────────────────────────────────────────────────────────────────

pub const CSV_HEADER: [&str; 10] = [
    "Day",
    "Time",
    "Course Code",
    "Course Name",
    "Instructor",
    "Room",
    "Room Type",
    "Year",
    "Type",
    "Conflict",
];

/// Writes one CSV row per occupied slot, in canonical order.
pub fn write_csv<W: io::Write>(scheduler: &Scheduler, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;

    for slot in scheduler.grid().occupied() {
        let Some(course) = slot.course.as_ref() else {
            continue;
        };
        let year = course.year.to_string();
        out.write_record([
            slot.day.as_str(),
            slot.time.label(),
            course.code.as_str(),
            course.name.as_str(),
            &*scheduler.instructor_name(course.instructor_id),
            slot.room.as_ref().map_or("N/A", |r| r.id.as_str()),
            slot.room.as_ref().map_or("N/A", |r| r.kind_label()),
            year.as_str(),
            course.kind_label(),
            if slot.has_conflict { "Yes" } else { "No" },
        ])?;
    }

    out.flush()?;
    Ok(())
}

pub fn export_csv(scheduler: &Scheduler, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create CSV file: {}", path.display()))?;
    write_csv(scheduler, file)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = scheduler.grid().occupied_count(),
        "schedule exported (CSV)"
    );
    Ok(())
}

// ── JSON import ───────────────────────────────────────────────────────────────

/// A JSON object read as an ordered list of entries, duplicates included.
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    schedule: Option<OrderedEntries<OrderedEntries<Option<ImportSession>>>>,
}

#[derive(Deserialize)]
struct ImportSession {
    #[serde(default)]
    course_code: Option<String>,
    #[serde(default)]
    room_id: Option<String>,
    #[serde(default)]
    has_conflict: bool,
}

/// Replaces the grid with the sessions in `content`.
///
/// The grid is cleared first.  Validation is **not** run; call
/// [`Scheduler::validate()`] (or use [`Scheduler::import_schedule()`]).
///
/// # Errors
/// Malformed JSON, or [`ExchangeError::MissingSchedule`].
pub fn import_json_str(scheduler: &mut Scheduler, content: &str) -> Result<ImportSummary> {
    let doc: ImportDocument = serde_json::from_str(content).context("invalid schedule JSON")?;
    let schedule = doc.schedule.ok_or(ExchangeError::MissingSchedule)?;

    scheduler.clear_schedule();
    let mut summary = ImportSummary::default();

    for (day_name, times) in schedule.0 {
        let Some(day) = Weekday::from_name(&day_name) else {
            let dropped = times.0.iter().filter(|(_, s)| s.is_some()).count();
            warn!(day = %day_name, sessions = dropped, "unknown day — entries skipped");
            summary.skipped += dropped;
            continue;
        };

        for (label, session) in times.0 {
            let Some(session) = session else {
                continue;
            };
            let Some(time) = TimeSlot::from_label(&label) else {
                warn!(%day, time = %label, "unknown time slot — entry skipped");
                summary.skipped += 1;
                continue;
            };
            let Some(code) = session.course_code.as_deref() else {
                warn!(%day, %time, "session without course_code — entry skipped");
                summary.skipped += 1;
                continue;
            };

            match scheduler.import_session(
                day,
                time,
                code,
                session.room_id.as_deref(),
                session.has_conflict,
            ) {
                Some(ImportOutcome::Placed) => summary.imported += 1,
                Some(ImportOutcome::Collided) => summary.collisions += 1,
                None => {
                    warn!(%day, %time, course = %code, "unknown course code — entry skipped");
                    summary.skipped += 1;
                }
            }
        }
    }

    info!(
        imported = summary.imported,
        collisions = summary.collisions,
        skipped = summary.skipped,
        "schedule imported"
    );
    Ok(summary)
}

/// Reads `path` and imports it with [`import_json_str`].
pub fn import_json(scheduler: &mut Scheduler, path: &Path) -> Result<ImportSummary> {
    info!("Importing schedule from: {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open schedule file: {}", path.display()))?;
    import_json_str(scheduler, &content)
        .with_context(|| format!("Failed to import schedule file: {}", path.display()))
}

impl Scheduler {
    /// Imports an exported schedule file and re-validates the grid.
    pub fn import_schedule(&mut self, path: &Path) -> Result<ImportSummary> {
        let summary = import_json(self, path)?;
        self.validate();
        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
