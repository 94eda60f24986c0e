/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Academic-policy predicates shared by placement and validation.
//!
//! These are fixed business rules over the `code` and `year` fields.  Codes
//! are matched as plain strings; no department-code schema is inferred.
//!
//! # Theory/lab pairing
//! A lab is paired with the lecture it follows by stripping trailing `L`
//! characters from the lab code and looking for a theory course taught by the
//! same instructor whose code equals the remainder (`CS101L` → `CS101`).  If
//! no exact match exists, the first theory course whose code *starts with*
//! the remainder is used.
//!
//! # Elective segregation
//! | Pair | Rule |
//! |---|---|
//! | year 3 ↔ year 4 | may not share a slot |
//! | `CENG` ↔ `SENG` (case-insensitive substring) | may not share a slot |

use std::fmt;

use crate::model::Course;

// ── Theory/lab pairing ────────────────────────────────────────────────────────

/// Lab code with every trailing `'L'` removed (`"CS101L"` → `"CS101"`).
pub fn lab_base_code(code: &str) -> &str {
    code.trim_end_matches('L')
}

/// Finds the theory course `lab` must follow, if any.
///
/// Returns `None` for a non-lab course, for a lab whose code is nothing but
/// `L`s, and when no theory course by the same instructor matches.  In that
/// case the lab-after-theory rule is waived.
pub fn find_theory_course<'a>(lab: &Course, courses: &'a [Course]) -> Option<&'a Course> {
    if !lab.is_lab {
        return None;
    }
    let base = lab_base_code(&lab.code);
    if base.is_empty() {
        return None;
    }

    let same_instructor = |c: &&Course| !c.is_lab && c.instructor_id == lab.instructor_id;

    courses
        .iter()
        .filter(same_instructor)
        .find(|c| c.code == base)
        .or_else(|| {
            courses
                .iter()
                .filter(same_instructor)
                .find(|c| c.code.starts_with(base))
        })
}

// ── Elective segregation ──────────────────────────────────────────────────────

/// Why two sessions may not share a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectiveClash {
    /// A third-year course against a fourth-year elective.
    YearThreeAndFour,
    /// A CENG course against a SENG course.
    CengAndSeng,
}

impl fmt::Display for ElectiveClash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectiveClash::YearThreeAndFour => f.write_str("3rd-year course overlaps 4th-year elective"),
            ElectiveClash::CengAndSeng => f.write_str("CENG and SENG electives overlap"),
        }
    }
}

pub fn is_ceng(code: &str) -> bool {
    code.to_ascii_uppercase().contains("CENG")
}

pub fn is_seng(code: &str) -> bool {
    code.to_ascii_uppercase().contains("SENG")
}

/// Checks whether `course` and `other` may share a slot.
///
/// The year rule is evaluated first; only one reason is reported per pair.
pub fn elective_clash(course: &Course, other: &Course) -> Option<ElectiveClash> {
    if matches!((course.year, other.year), (3, 4) | (4, 3)) {
        return Some(ElectiveClash::YearThreeAndFour);
    }

    let (a_ceng, a_seng) = (is_ceng(&course.code), is_seng(&course.code));
    let (b_ceng, b_seng) = (is_ceng(&other.code), is_seng(&other.code));
    if (a_ceng && b_seng) || (a_seng && b_ceng) {
        return Some(ElectiveClash::CengAndSeng);
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
