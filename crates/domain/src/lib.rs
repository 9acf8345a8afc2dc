// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    Group, Lesson, LessonType, Period, Placement, Room, Semester, SiblingKey, Subject, Teacher,
    WeekParity, day_of_week_from_str, day_of_week_to_str, day_order,
};
pub use validation::{
    periods_are_adjacent, periods_overlap, validate_period_batch, validate_period_time,
    validate_period_uniqueness, validate_semester_dates,
};
