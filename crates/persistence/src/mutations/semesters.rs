// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Semester writes, including the current/default singleton flips.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::{Semester, day_of_week_to_str};
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{
    NewSemesterDayRow, NewSemesterGroupRow, NewSemesterPeriodRow, NewSemesterRow,
};
use crate::diesel_schema::{semester_days, semester_groups, semester_periods, semesters};
use crate::error::PersistenceError;

/// Inserts a semester row with its junction collections and returns the
/// new id.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_semester(
    conn: &mut SqliteConnection,
    semester: &Semester,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(semesters::table)
        .values(NewSemesterRow::from_domain(semester)?)
        .execute(conn)?;
    let semester_id: i64 = get_last_insert_rowid(conn)?;
    insert_collections(conn, semester_id, semester)?;
    debug!("Created semester {semester_id} ({})", semester.description);
    Ok(semester_id)
}

/// Rewrites the scalar columns of one semester row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_semester_row(
    conn: &mut SqliteConnection,
    semester_id: i64,
    semester: &Semester,
) -> Result<usize, PersistenceError> {
    let row: NewSemesterRow = NewSemesterRow::from_domain(semester)?;
    Ok(diesel::update(semesters::table.find(semester_id))
        .set((
            semesters::description.eq(row.description),
            semesters::year.eq(row.year),
            semesters::start_date.eq(row.start_date),
            semesters::end_date.eq(row.end_date),
            semesters::current_semester.eq(row.current_semester),
            semesters::default_semester.eq(row.default_semester),
            semesters::disabled.eq(row.disabled),
        ))
        .execute(conn)?)
}

fn insert_collections(
    conn: &mut SqliteConnection,
    semester_id: i64,
    semester: &Semester,
) -> Result<(), PersistenceError> {
    let day_rows: Vec<NewSemesterDayRow> = semester
        .days
        .iter()
        .map(|day| NewSemesterDayRow {
            semester_id,
            day_of_week: day_of_week_to_str(*day).to_string(),
        })
        .collect();
    diesel::insert_into(semester_days::table)
        .values(day_rows)
        .execute(conn)?;

    let period_rows: Vec<NewSemesterPeriodRow> = semester
        .period_ids
        .iter()
        .map(|period_id| NewSemesterPeriodRow {
            semester_id,
            period_id: *period_id,
        })
        .collect();
    diesel::insert_into(semester_periods::table)
        .values(period_rows)
        .execute(conn)?;

    let group_rows: Vec<NewSemesterGroupRow> = semester
        .group_ids
        .iter()
        .map(|group_id| NewSemesterGroupRow {
            semester_id,
            group_id: *group_id,
        })
        .collect();
    diesel::insert_into(semester_groups::table)
        .values(group_rows)
        .execute(conn)?;

    Ok(())
}

/// Replaces a semester's junction collections with the ones on the
/// given value.
///
/// # Errors
///
/// Returns an error if a delete or insert fails.
pub fn replace_collections(
    conn: &mut SqliteConnection,
    semester_id: i64,
    semester: &Semester,
) -> Result<(), PersistenceError> {
    delete_collections(conn, semester_id)?;
    insert_collections(conn, semester_id, semester)
}

fn delete_collections(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(semester_days::table.filter(semester_days::semester_id.eq(semester_id)))
        .execute(conn)?;
    diesel::delete(semester_periods::table.filter(semester_periods::semester_id.eq(semester_id)))
        .execute(conn)?;
    diesel::delete(semester_groups::table.filter(semester_groups::semester_id.eq(semester_id)))
        .execute(conn)?;
    Ok(())
}

/// Makes the given semester the single current one: clears the flag on
/// every row, then sets it on the target.
///
/// # Errors
///
/// Returns an error if an update fails.
pub fn set_current(conn: &mut SqliteConnection, semester_id: i64) -> Result<(), PersistenceError> {
    diesel::update(semesters::table)
        .set(semesters::current_semester.eq(0))
        .execute(conn)?;
    diesel::update(semesters::table.find(semester_id))
        .set(semesters::current_semester.eq(1))
        .execute(conn)?;
    debug!("Semester {semester_id} is now current");
    Ok(())
}

/// Makes the given semester the single default one.
///
/// # Errors
///
/// Returns an error if an update fails.
pub fn set_default(conn: &mut SqliteConnection, semester_id: i64) -> Result<(), PersistenceError> {
    diesel::update(semesters::table)
        .set(semesters::default_semester.eq(0))
        .execute(conn)?;
    diesel::update(semesters::table.find(semester_id))
        .set(semesters::default_semester.eq(1))
        .execute(conn)?;
    debug!("Semester {semester_id} is now the default");
    Ok(())
}

/// Deletes a semester row with its junction collections.
///
/// # Errors
///
/// Returns an error if a delete fails.
pub fn delete_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<usize, PersistenceError> {
    delete_collections(conn, semester_id)?;
    Ok(diesel::delete(semesters::table.find(semester_id)).execute(conn)?)
}
