//! Catalog loading: the courses, rooms and instructors fed to the engine.
//!
//! Both JSON and YAML are accepted; the format is picked from the file
//! extension (`.yaml` / `.yml` → YAML, anything else → JSON).
//!
//! The expected structure is:
//! ```yaml
//! instructors:
//!   - id: 1
//!     name: "Dr. Smith"
//!     availability: ["Monday", "Tuesday"]
//! rooms:
//!   - id: "LAB1"
//!     capacity: 30
//!     is_lab: true
//! courses:
//!   - code: "CS101"
//!     name: "Introduction to Computer Science"
//!     instructor_id: 1
//!     year: 1
//! policy:                           # optional
//!   max_daily_theory_sessions: 4
//!   max_lab_room_capacity: 40
//! ```
//!
//! Missing top-level sections are treated as empty lists.  Optional per-entry
//! fields fall back to the defaults documented on the model types.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{Course, Instructor, Room, Weekday};

// ── Policy ────────────────────────────────────────────────────────────────────

/// Tunable limits applied by placement and validation.
///
/// The defaults are the institutional rules: at most four theory sessions per
/// instructor per day, and labs only in rooms of 40 seats or fewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Theory sessions one instructor may teach on a single day.
    pub max_daily_theory_sessions: u32,
    /// Largest room a lab session may be placed in.
    pub max_lab_room_capacity: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            max_daily_theory_sessions: 4,
            max_lab_room_capacity: 40,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// On-disk file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// `.yaml` / `.yml` → YAML; everything else → JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                CatalogFormat::Yaml
            }
            _ => CatalogFormat::Json,
        }
    }
}

/// Parsed input collections, ready to hand to
/// [`Scheduler::from_catalog`](crate::scheduler::Scheduler::from_catalog).
///
/// No cross-reference checks happen here; those belong to engine
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub policy: SchedulingPolicy,
}

impl Catalog {
    /// Reads and parses `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is structurally invalid,
    /// lacks a required field (course `code`/`name`/`instructor_id`, room
    /// `id`/`capacity`, instructor `id`/`name`) or names an unknown weekday.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open catalog file: {}", path.display()))?;

        let catalog = match CatalogFormat::from_path(path) {
            CatalogFormat::Json => Self::from_json_str(&content),
            CatalogFormat::Yaml => Self::from_yaml_str(&content),
        }
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        catalog.log_summary();
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid JSON catalog")
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("invalid YAML catalog")
    }

    /// Writes the catalog to `path` in the format implied by its extension.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = match CatalogFormat::from_path(path) {
            CatalogFormat::Json => serde_json::to_string_pretty(self)?,
            CatalogFormat::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, content)
            .with_context(|| format!("Cannot write catalog file: {}", path.display()))?;
        info!("Catalog written to: {}", path.display());
        Ok(())
    }

    fn log_summary(&self) {
        info!(
            instructors = self.instructors.len(),
            rooms = self.rooms.len(),
            courses = self.courses.len(),
            max_daily_theory = self.policy.max_daily_theory_sessions,
            max_lab_capacity = self.policy.max_lab_room_capacity,
            "Catalog loaded"
        );
        for inst in &self.instructors {
            if inst.availability.is_empty() {
                warn!(
                    instructor = inst.id,
                    name = %inst.name,
                    "instructor has no availability — their courses cannot be placed"
                );
            }
            debug!("  Instructor: {} | {} | {:?}", inst.id, inst.name, inst.availability);
        }
        for room in &self.rooms {
            debug!("  Room: {} | capacity {} | {}", room.id, room.capacity, room.kind_label());
        }
    }

    /// Built-in demonstration catalog: three instructors, four rooms and five
    /// courses including one theory/lab pair and a CENG elective.
    pub fn sample() -> Self {
        use Weekday::*;

        Self {
            instructors: vec![
                Instructor::new(1, "Dr. Smith", vec![Monday, Tuesday, Wednesday, Thursday, Friday]),
                Instructor::new(2, "Dr. Jones", vec![Monday, Wednesday, Friday]),
                Instructor::new(3, "Dr. Brown", vec![Tuesday, Thursday]),
            ],
            rooms: vec![
                Room::classroom("A101", 50),
                Room::classroom("A102", 60),
                Room::lab("LAB1", 30),
                Room::lab("LAB2", 35),
            ],
            courses: vec![
                Course::theory("CS101", "Introduction to Computer Science", 1, 1),
                Course::lab("CS101L", "CS101 Lab", 1, 1).with_duration_hours(2),
                Course::theory("CS201", "Data Structures", 2, 2),
                Course::theory("CS301", "Algorithms", 3, 3),
                Course::theory("CENG401", "Computer Engineering Elective", 1, 4),
            ],
            policy: SchedulingPolicy::default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
