// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Placement writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::Placement;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewScheduleRow;
use crate::diesel_schema::{lessons, schedules};
use crate::error::PersistenceError;

/// Inserts one placement and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    placement: &Placement,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(schedules::table)
        .values(NewScheduleRow::from_domain(placement))
        .execute(conn)?;
    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        "Placed lesson {} in room {} at ({}, period {}, {})",
        placement.lesson_id, placement.room_id, placement.day, placement.period_id, placement.parity
    );
    Ok(id)
}

/// Moves a placement to a different room.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_schedule_room(
    conn: &mut SqliteConnection,
    schedule_id: i64,
    room_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(schedules::table.find(schedule_id))
        .set(schedules::room_id.eq(room_id))
        .execute(conn)?)
}

/// Deletes one placement.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_schedule(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(schedules::table.find(schedule_id)).execute(conn)?)
}

/// Deletes placements by id.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_schedules_by_ids(
    conn: &mut SqliteConnection,
    schedule_ids: &[i64],
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(schedules::table.filter(schedules::id.eq_any(schedule_ids))).execute(conn)?)
}

/// Deletes all placements of the given lessons.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_schedules_for_lessons(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(schedules::table.filter(schedules::lesson_id.eq_any(lesson_ids)))
            .execute(conn)?,
    )
}

/// Deletes every placement of a semester.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_schedules_by_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<usize, PersistenceError> {
    let semester_lessons = lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .select(lessons::id);
    let deleted: usize =
        diesel::delete(schedules::table.filter(schedules::lesson_id.eq_any(semester_lessons)))
            .execute(conn)?;
    debug!("Deleted {deleted} placements for semester {semester_id}");
    Ok(deleted)
}
