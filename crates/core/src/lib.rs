// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure engine logic for the Timetable System.
//!
//! Nothing in this crate touches the relational store. The persistence
//! adapter evaluates these functions first and then executes the plans
//! and predicates they produce, so every scheduling rule is unit-testable
//! without a database:
//!
//! - [`ordering`] — rank-shift planning for the ordered position manager
//! - [`conflict`] — week-parity → predicate derivation for the slot
//!   conflict detector
//! - [`placement`] — grouped-lesson expansion of a placement request
//! - [`view`] — folding flat placements into nested schedule views

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod conflict;
mod ordering;
mod placement;
mod view;

#[cfg(test)]
mod tests;

pub use conflict::{ParityPredicate, conflict_predicate};
pub use ordering::{ShiftPlan, insert_plan, move_plan};
pub use placement::expand_for_siblings;
pub use view::{
    DaySchedule, ParityCell, PeriodCells, PlacedLesson, ScheduleEntry, assemble_week, occurs_on,
    parity_for_date,
};
