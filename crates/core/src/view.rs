// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule view assembler.
//!
//! Folds the flat placement set for one group (or teacher) into the
//! nested structure day → period → {EVEN, ODD}. Each cell resolves by
//! exact-parity match first, then WEEKLY, then empty, mirroring the
//! conflict detector's overlap semantics: a WEEKLY placement is visible
//! under both the EVEN and the ODD view of the same slot.

use timetable_domain::{LessonType, WeekParity, day_order};
use time::{Date, Weekday};

/// The lesson details rendered into one schedule cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLesson {
    pub schedule_id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub lesson_type: LessonType,
    pub teacher_surname: String,
    pub group_title: String,
    pub room_name: String,
    pub link_to_meeting: Option<String>,
}

/// One flat placement row as fetched from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub day: Weekday,
    pub period_id: i64,
    pub parity: WeekParity,
    pub lesson: PlacedLesson,
}

/// The even/odd resolution of one (day, period) slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParityCell {
    pub even: Option<PlacedLesson>,
    pub odd: Option<PlacedLesson>,
}

/// All cells of one day, in the caller-supplied period order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCells {
    pub period_id: i64,
    pub cell: ParityCell,
}

/// One day of the assembled week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: Weekday,
    pub periods: Vec<PeriodCells>,
}

/// Assembles the nested week view from flat placement rows.
///
/// `days` are the semester's active days (sorted here, Monday first)
/// and `period_ids` its active periods in display order. Every (day,
/// period) combination appears in the output even when empty, so the
/// rendered grid is rectangular.
#[must_use]
pub fn assemble_week(
    entries: &[ScheduleEntry],
    days: &[Weekday],
    period_ids: &[i64],
) -> Vec<DaySchedule> {
    let mut sorted_days: Vec<Weekday> = days.to_vec();
    sorted_days.sort_by_key(|day| day_order(*day));
    sorted_days.dedup();

    sorted_days
        .into_iter()
        .map(|day| DaySchedule {
            day,
            periods: period_ids
                .iter()
                .map(|period_id| PeriodCells {
                    period_id: *period_id,
                    cell: resolve_cell(entries, day, *period_id),
                })
                .collect(),
        })
        .collect()
}

/// The concrete week parity of a calendar date.
///
/// Even-numbered ISO weeks are EVEN, odd-numbered weeks are ODD. A
/// WEEKLY placement matches every date, so this only ever returns the
/// two concrete parities.
#[must_use]
pub fn parity_for_date(date: Date) -> WeekParity {
    if date.iso_week() % 2 == 0 {
        WeekParity::Even
    } else {
        WeekParity::Odd
    }
}

/// Returns whether a placement with `parity` occurs on `date`.
#[must_use]
pub fn occurs_on(parity: WeekParity, date: Date) -> bool {
    parity.overlaps(parity_for_date(date))
}

/// Resolves one (day, period) slot: exact parity first, WEEKLY second,
/// empty last.
fn resolve_cell(entries: &[ScheduleEntry], day: Weekday, period_id: i64) -> ParityCell {
    let at_slot = |parity: WeekParity| {
        entries
            .iter()
            .find(|entry| entry.day == day && entry.period_id == period_id && entry.parity == parity)
            .map(|entry| entry.lesson.clone())
    };

    let weekly = at_slot(WeekParity::Weekly);

    ParityCell {
        even: at_slot(WeekParity::Even).or_else(|| weekly.clone()),
        odd: at_slot(WeekParity::Odd).or(weekly),
    }
}
