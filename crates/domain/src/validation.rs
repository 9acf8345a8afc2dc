// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure validation rules for periods and semesters.
//!
//! Two periods conflict when their time intervals overlap or when they
//! are exactly adjacent (share a boundary instant). Adjacency is treated
//! as a conflict so that back-to-back periods must be modelled as one.

use crate::error::DomainError;
use crate::types::Period;
use time::Date;

/// Returns whether two periods' time intervals overlap.
#[must_use]
pub fn periods_overlap(a: &Period, b: &Period) -> bool {
    a.start_time < b.end_time && a.end_time > b.start_time
}

/// Returns whether two periods share a boundary instant.
#[must_use]
pub fn periods_are_adjacent(a: &Period, b: &Period) -> bool {
    a.start_time == b.end_time || a.end_time == b.start_time
}

fn periods_conflict(a: &Period, b: &Period) -> bool {
    periods_overlap(a, b) || periods_are_adjacent(a, b)
}

/// Validates that a period starts strictly before it ends.
///
/// # Errors
///
/// Returns `IncorrectTime` if `start_time >= end_time`.
pub fn validate_period_time(period: &Period) -> Result<(), DomainError> {
    if period.start_time >= period.end_time {
        return Err(DomainError::IncorrectTime(
            "Start time must be before end time".to_string(),
        ));
    }
    Ok(())
}

/// Validates a candidate period against every existing period.
///
/// An existing period with the same id as the candidate is skipped so
/// that updates do not conflict with the row being rewritten.
///
/// # Errors
///
/// Returns `PeriodConflict` if the candidate overlaps or is adjacent to
/// any other existing period.
pub fn validate_period_uniqueness(
    existing: &[Period],
    candidate: &Period,
) -> Result<(), DomainError> {
    let conflicting = existing
        .iter()
        .filter(|p| p.id.is_none() || p.id != candidate.id)
        .any(|p| periods_conflict(p, candidate));

    if conflicting {
        return Err(DomainError::PeriodConflict(
            "Period conflicts with existing periods".to_string(),
        ));
    }
    Ok(())
}

/// Validates a batch of new periods against the existing set and
/// against each other.
///
/// # Errors
///
/// Returns `IncorrectTime` for any inverted period and `PeriodConflict`
/// for any overlap or adjacency, including conflicts internal to the
/// batch.
pub fn validate_period_batch(existing: &[Period], batch: &[Period]) -> Result<(), DomainError> {
    for (index, candidate) in batch.iter().enumerate() {
        validate_period_time(candidate)?;
        validate_period_uniqueness(existing, candidate)?;

        let internal = batch
            .iter()
            .enumerate()
            .filter(|(other_index, _)| *other_index != index)
            .any(|(_, other)| periods_conflict(candidate, other));

        if internal {
            return Err(DomainError::PeriodConflict(
                "Periods in batch conflict with each other".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates that a semester starts strictly before it ends.
///
/// # Errors
///
/// Returns `IncorrectTime` if `start_date >= end_date`.
pub fn validate_semester_dates(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::IncorrectTime(
            "Semester start date must be before end date".to_string(),
        ));
    }
    Ok(())
}
