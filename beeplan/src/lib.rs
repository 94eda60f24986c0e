/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! BeePlan – weekly course timetable engine
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── model/          – weekdays, time slots, instructors, rooms, courses
//! ├── grid/           – 5 × 8 schedule grid, exam block, import collisions
//! ├── conflict/       – conflict kinds and records
//! ├── scheduler/      – greedy placement, validation, query surface
//! ├── catalog/        – JSON/YAML input catalog + policy block
//! ├── exchange/       – schedule export (JSON, CSV) and import (JSON)
//! └── report/         – text validation report / conflict summary
//! ```

pub mod catalog;
pub mod conflict;
pub mod exchange;
pub mod grid;
pub mod model;
pub mod report;
pub mod scheduler;
