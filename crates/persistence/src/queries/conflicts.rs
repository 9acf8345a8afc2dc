// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot conflict counting.
//!
//! A conflict is any existing placement at the same (semester, day,
//! period) slot, for the same group or teacher, whose parity overlaps
//! the requested one. Placements whose room, semester, group, teacher or
//! subject is disabled are invisible to the detector: the whole chain
//! must be enabled for a row to count.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Weekday;
use timetable::ParityPredicate;
use timetable_domain::{WeekParity, day_of_week_to_str};

use crate::diesel_schema::{groups, lessons, rooms, schedules, semesters, subjects, teachers};
use crate::error::PersistenceError;

/// Count macro expansion keeps the two detectors symmetrical: the only
/// difference between them is which lesson column the scope filter hits.
macro_rules! conflict_count_fn {
    ($name:ident, $scope_column:ident) => {
        /// Counts enabled-chain placements occupying the slot for the
        /// scoped entity, under the given parity predicate.
        ///
        /// # Errors
        ///
        /// Returns an error if the query fails.
        pub fn $name(
            conn: &mut SqliteConnection,
            semester_id: i64,
            scope_id: i64,
            day: Weekday,
            period_id: i64,
            predicate: ParityPredicate,
        ) -> Result<i64, PersistenceError> {
            let day_str: &str = day_of_week_to_str(day);
            let base = schedules::table
                .inner_join(
                    lessons::table
                        .inner_join(groups::table)
                        .inner_join(teachers::table)
                        .inner_join(subjects::table)
                        .inner_join(semesters::table),
                )
                .inner_join(rooms::table)
                .filter(lessons::semester_id.eq(semester_id))
                .filter(lessons::$scope_column.eq(scope_id))
                .filter(schedules::day_of_week.eq(day_str))
                .filter(schedules::period_id.eq(period_id))
                .filter(groups::disabled.eq(0))
                .filter(teachers::disabled.eq(0))
                .filter(subjects::disabled.eq(0))
                .filter(semesters::disabled.eq(0))
                .filter(rooms::disabled.eq(0));

            let count: i64 = match predicate {
                ParityPredicate::AnyParity => base.count().get_result(conn)?,
                ParityPredicate::SameOrWeekly(parity) => base
                    .filter(
                        schedules::parity
                            .eq(parity.as_str())
                            .or(schedules::parity.eq(WeekParity::Weekly.as_str())),
                    )
                    .count()
                    .get_result(conn)?,
            };
            Ok(count)
        }
    };
}

conflict_count_fn!(group_conflict_count, group_id);
conflict_count_fn!(teacher_conflict_count, teacher_id);
