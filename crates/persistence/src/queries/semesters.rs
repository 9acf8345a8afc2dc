// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Semester queries.
//!
//! A semester row carries its scalar attributes; the active days,
//! periods and enrolled groups live in junction tables and are folded
//! back into the domain type here.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Weekday;
use timetable_domain::{DomainError, Semester, day_of_week_from_str, day_order};

use crate::data_models::SemesterRow;
use crate::diesel_schema::{
    groups, lessons, periods, semester_days, semester_groups, semester_periods, semesters,
};
use crate::error::PersistenceError;

/// Loads the junction-table collections of one semester.
///
/// Days come back Monday-first, periods in start-time order and groups
/// in their managed sort order.
///
/// # Errors
///
/// Returns an error if a query fails or a stored day is invalid.
pub fn semester_collections(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<(Vec<Weekday>, Vec<i64>, Vec<i64>), PersistenceError> {
    let mut days: Vec<Weekday> = semester_days::table
        .filter(semester_days::semester_id.eq(semester_id))
        .select(semester_days::day_of_week)
        .load::<String>(conn)?
        .iter()
        .map(|value| day_of_week_from_str(value))
        .collect::<Result<Vec<Weekday>, DomainError>>()?;
    days.sort_by_key(|day| day_order(*day));

    let period_ids: Vec<i64> = semester_periods::table
        .inner_join(periods::table)
        .filter(semester_periods::semester_id.eq(semester_id))
        .order(periods::start_time.asc())
        .select(semester_periods::period_id)
        .load::<i64>(conn)?;

    let group_ids: Vec<i64> = semester_groups::table
        .inner_join(groups::table)
        .filter(semester_groups::semester_id.eq(semester_id))
        .order(groups::sort_order.asc())
        .select(semester_groups::group_id)
        .load::<i64>(conn)?;

    Ok((days, period_ids, group_ids))
}

fn row_into_semester(
    conn: &mut SqliteConnection,
    row: SemesterRow,
) -> Result<Semester, PersistenceError> {
    let (days, period_ids, group_ids) = semester_collections(conn, row.id)?;
    row.into_domain(days, period_ids, group_ids)
}

/// Fetches a semester by id, with its collections.
///
/// # Errors
///
/// Returns `NotFound` if no semester has the id.
pub fn semester_by_id(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Semester, PersistenceError> {
    let row: SemesterRow = semesters::table
        .find(semester_id)
        .first::<SemesterRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Semester",
            id: semester_id,
        }))?;
    row_into_semester(conn, row)
}

/// Lists all semesters, newest year first.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn all_semesters(conn: &mut SqliteConnection) -> Result<Vec<Semester>, PersistenceError> {
    let rows: Vec<SemesterRow> = semesters::table
        .order((semesters::year.desc(), semesters::start_date.desc()))
        .load::<SemesterRow>(conn)?;
    rows.into_iter()
        .map(|row| row_into_semester(conn, row))
        .collect()
}

/// Fetches the single semester flagged current.
///
/// # Errors
///
/// Returns `NoCurrentSemester` if no semester carries the flag.
pub fn current_semester(conn: &mut SqliteConnection) -> Result<Semester, PersistenceError> {
    let row: SemesterRow = semesters::table
        .filter(semesters::current_semester.eq(1))
        .first::<SemesterRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NoCurrentSemester))?;
    row_into_semester(conn, row)
}

/// Fetches the single semester flagged default.
///
/// # Errors
///
/// Returns `NoDefaultSemester` if no semester carries the flag.
pub fn default_semester(conn: &mut SqliteConnection) -> Result<Semester, PersistenceError> {
    let row: SemesterRow = semesters::table
        .filter(semesters::default_semester.eq(1))
        .first::<SemesterRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NoDefaultSemester))?;
    row_into_semester(conn, row)
}

/// Whether another semester already uses the (description, year) pair.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn description_exists(
    conn: &mut SqliteConnection,
    description: &str,
    year: i32,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = semesters::table
        .filter(semesters::description.eq(description))
        .filter(semesters::year.eq(year))
        .into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(semesters::id.ne(id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Whether any lesson references the semester.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn semester_is_referenced(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
