// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::Period;

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewPeriodRow;
use crate::diesel_schema::periods;
use crate::error::PersistenceError;

/// Inserts one period and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_period(conn: &mut SqliteConnection, period: &Period) -> Result<i64, PersistenceError> {
    diesel::insert_into(periods::table)
        .values(NewPeriodRow::from_domain(period)?)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites one period row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_period_row(
    conn: &mut SqliteConnection,
    period_id: i64,
    period: &Period,
) -> Result<usize, PersistenceError> {
    let row: NewPeriodRow = NewPeriodRow::from_domain(period)?;
    Ok(diesel::update(periods::table.find(period_id))
        .set((
            periods::name.eq(row.name),
            periods::start_time.eq(row.start_time),
            periods::end_time.eq(row.end_time),
        ))
        .execute(conn)?)
}

/// Deletes one period.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_period(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(periods::table.find(period_id)).execute(conn)?)
}
