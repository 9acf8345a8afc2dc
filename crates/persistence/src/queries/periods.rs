// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::{DomainError, Period};

use crate::data_models::PeriodRow;
use crate::diesel_schema::{periods, semester_periods};
use crate::error::PersistenceError;

/// Fetches a period by id.
///
/// # Errors
///
/// Returns `NotFound` if no period has the id.
pub fn period_by_id(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<Period, PersistenceError> {
    periods::table
        .find(period_id)
        .first::<PeriodRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Period",
            id: period_id,
        }))?
        .into_domain()
}

/// Lists all periods in start-time order.
///
/// The `HH:MM:SS` text encoding sorts chronologically, so the database
/// ordering is already the display ordering.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_periods(conn: &mut SqliteConnection) -> Result<Vec<Period>, PersistenceError> {
    periods::table
        .order(periods::start_time.asc())
        .load::<PeriodRow>(conn)?
        .into_iter()
        .map(PeriodRow::into_domain)
        .collect()
}

/// Whether a period name is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn name_exists(
    conn: &mut SqliteConnection,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = periods::table.filter(periods::name.eq(name)).into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(periods::id.ne(id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Whether any semester has the period in its active set.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn period_in_any_semester(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = semester_periods::table
        .filter(semester_periods::period_id.eq(period_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
