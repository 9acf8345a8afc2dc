// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rank maintenance for the order-managed tables (rooms and groups).
//!
//! The rank arithmetic itself lives in `timetable::ordering`; this
//! module executes the resulting [`ShiftPlan`] as a single ranged
//! `UPDATE` (`sort_order = sort_order + 1` where `lower <= sort_order <
//! upper`) followed by one targeted rank assignment.
//!
//! ## Per-Table Monomorphic Functions
//!
//! Diesel's table types are distinct at compile time, so the identical
//! rank plumbing for the two ordered tables cannot be written as one
//! generic function. The `ordered_table_fns!` macro generates a
//! monomorphic function set per table (`_rooms` and `_groups`
//! suffixes); it only duplicates function bodies and substitutes the
//! table path, with no logic of its own.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable::{ShiftPlan, insert_plan, move_plan};
use timetable_domain::DomainError;
use tracing::debug;

use crate::error::PersistenceError;

macro_rules! ordered_table_fns {
    ($table:ident, $entity:literal) => {
        pastey::paste! {
            use crate::diesel_schema::$table;

            /// The highest assigned rank, or 0 when no row is ranked.
            fn [<max_rank_ $table>](conn: &mut SqliteConnection) -> Result<i32, PersistenceError> {
                let max: Option<i32> = $table::table
                    .select(diesel::dsl::max($table::sort_order))
                    .first::<Option<i32>>(conn)?;
                Ok(max.unwrap_or(0))
            }

            /// The rank of one row. Outer `None` means the row does not
            /// exist, inner `None` that it exists but is unranked.
            fn [<rank_of_ $table>](
                conn: &mut SqliteConnection,
                row_id: i64,
            ) -> Result<Option<Option<i32>>, PersistenceError> {
                Ok($table::table
                    .find(row_id)
                    .select($table::sort_order)
                    .first::<Option<i32>>(conn)
                    .optional()?)
            }

            /// Executes the plan's ranged shift.
            fn [<shift_ranks_ $table>](
                conn: &mut SqliteConnection,
                plan: &ShiftPlan,
            ) -> Result<usize, PersistenceError> {
                Ok(diesel::update(
                    $table::table
                        .filter($table::sort_order.ge(plan.lower))
                        .filter($table::sort_order.lt(plan.upper)),
                )
                .set($table::sort_order.eq($table::sort_order + 1))
                .execute(conn)?)
            }

            fn [<assign_rank_ $table>](
                conn: &mut SqliteConnection,
                row_id: i64,
                rank: i32,
            ) -> Result<usize, PersistenceError> {
                Ok(diesel::update($table::table.find(row_id))
                    .set($table::sort_order.eq(rank))
                    .execute(conn)?)
            }

            /// Ranks a freshly inserted row at the end of the order.
            ///
            /// # Errors
            ///
            /// Returns an error if a query fails.
            pub fn [<append_ $table _rank>](
                conn: &mut SqliteConnection,
                row_id: i64,
            ) -> Result<i32, PersistenceError> {
                let rank: i32 = [<max_rank_ $table>](conn)? + 1;
                [<assign_rank_ $table>](conn, row_id, rank)?;
                Ok(rank)
            }

            /// Ranks a freshly inserted row directly after the anchor
            /// (`None` ranks it first), shifting every later row up.
            ///
            /// # Errors
            ///
            /// Returns `AnchorNotFound` if the anchor row does not
            /// exist.
            pub fn [<insert_ $table _after>](
                conn: &mut SqliteConnection,
                row_id: i64,
                after_id: Option<i64>,
            ) -> Result<i32, PersistenceError> {
                let anchor_rank: Option<i32> = match after_id {
                    Some(anchor_id) => [<rank_of_ $table>](conn, anchor_id)?.ok_or(
                        PersistenceError::Domain(DomainError::AnchorNotFound {
                            entity: $entity,
                            anchor_id,
                        }),
                    )?,
                    None => None,
                };
                let max_rank: i32 = [<max_rank_ $table>](conn)?;
                let plan: ShiftPlan = insert_plan(anchor_rank, max_rank);
                [<shift_ranks_ $table>](conn, &plan)?;
                [<assign_rank_ $table>](conn, row_id, plan.new_rank)?;
                debug!(
                    "Inserted {} {row_id} at rank {} (shift [{}, {}))",
                    $entity, plan.new_rank, plan.lower, plan.upper
                );
                Ok(plan.new_rank)
            }

            /// Moves an existing row directly after the anchor (`None`
            /// moves it first). Anchoring a row on itself is a no-op.
            ///
            /// # Errors
            ///
            /// Returns `AnchorNotFound` if the anchor row does not
            /// exist, or `NotFound` if the moved row does not exist.
            pub fn [<move_ $table _after>](
                conn: &mut SqliteConnection,
                row_id: i64,
                after_id: Option<i64>,
            ) -> Result<(), PersistenceError> {
                if after_id == Some(row_id) {
                    return Ok(());
                }
                let anchor_rank: Option<i32> = match after_id {
                    Some(anchor_id) => [<rank_of_ $table>](conn, anchor_id)?.ok_or(
                        PersistenceError::Domain(DomainError::AnchorNotFound {
                            entity: $entity,
                            anchor_id,
                        }),
                    )?,
                    None => None,
                };
                let old_rank: Option<i32> = [<rank_of_ $table>](conn, row_id)?.ok_or(
                    PersistenceError::Domain(DomainError::NotFound {
                        entity: $entity,
                        id: row_id,
                    }),
                )?;
                let max_rank: i32 = [<max_rank_ $table>](conn)?;
                let plan: ShiftPlan = move_plan(anchor_rank, old_rank, max_rank);
                [<shift_ranks_ $table>](conn, &plan)?;
                [<assign_rank_ $table>](conn, row_id, plan.new_rank)?;
                debug!(
                    "Moved {} {row_id} to rank {} (shift [{}, {}))",
                    $entity, plan.new_rank, plan.lower, plan.upper
                );
                Ok(())
            }
        }
    };
}

ordered_table_fns!(groups, "Group");
ordered_table_fns!(rooms, "Room");
