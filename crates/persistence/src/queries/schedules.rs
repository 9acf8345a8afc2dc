// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Placement reads and the flat rows behind the assembled week views.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use time::Weekday;
use timetable::{ParityPredicate, PlacedLesson, ScheduleEntry};
use timetable_domain::{
    DomainError, LessonType, Placement, WeekParity, day_of_week_from_str, day_of_week_to_str,
    day_order,
};

use crate::data_models::ScheduleRow;
use crate::diesel_schema::{groups, lessons, periods, rooms, schedules, teachers};
use crate::error::PersistenceError;

/// One flat row of the week view select.
type EntryRow = (
    i64,
    i64,
    String,
    i64,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
);

fn map_entry(row: EntryRow) -> Result<ScheduleEntry, PersistenceError> {
    let (
        schedule_id,
        lesson_id,
        day_of_week,
        period_id,
        parity,
        title,
        lesson_type,
        link_to_meeting,
        teacher_surname,
        group_title,
        room_name,
    ) = row;
    Ok(ScheduleEntry {
        day: day_of_week_from_str(&day_of_week)?,
        period_id,
        parity: WeekParity::from_str(&parity)?,
        lesson: PlacedLesson {
            schedule_id,
            lesson_id,
            title,
            lesson_type: LessonType::from_str(&lesson_type)?,
            teacher_surname,
            group_title,
            room_name,
            link_to_meeting,
        },
    })
}

/// Fetches a placement by id.
///
/// # Errors
///
/// Returns `NotFound` if no placement has the id.
pub fn schedule_by_id(
    conn: &mut SqliteConnection,
    schedule_id: i64,
) -> Result<Placement, PersistenceError> {
    schedules::table
        .find(schedule_id)
        .first::<ScheduleRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Schedule",
            id: schedule_id,
        }))?
        .into_domain()
}

/// Loads the flat week-view rows for one group in a semester.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn entries_for_group(
    conn: &mut SqliteConnection,
    semester_id: i64,
    group_id: i64,
) -> Result<Vec<ScheduleEntry>, PersistenceError> {
    schedules::table
        .inner_join(
            lessons::table
                .inner_join(teachers::table)
                .inner_join(groups::table),
        )
        .inner_join(rooms::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::group_id.eq(group_id))
        .select((
            schedules::id,
            schedules::lesson_id,
            schedules::day_of_week,
            schedules::period_id,
            schedules::parity,
            lessons::title,
            lessons::lesson_type,
            lessons::link_to_meeting,
            teachers::surname,
            groups::title,
            rooms::name,
        ))
        .load::<EntryRow>(conn)?
        .into_iter()
        .map(map_entry)
        .collect()
}

/// Loads the flat week-view rows for one teacher in a semester.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn entries_for_teacher(
    conn: &mut SqliteConnection,
    semester_id: i64,
    teacher_id: i64,
) -> Result<Vec<ScheduleEntry>, PersistenceError> {
    schedules::table
        .inner_join(
            lessons::table
                .inner_join(teachers::table)
                .inner_join(groups::table),
        )
        .inner_join(rooms::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::teacher_id.eq(teacher_id))
        .select((
            schedules::id,
            schedules::lesson_id,
            schedules::day_of_week,
            schedules::period_id,
            schedules::parity,
            lessons::title,
            lessons::lesson_type,
            lessons::link_to_meeting,
            teachers::surname,
            groups::title,
            rooms::name,
        ))
        .load::<EntryRow>(conn)?
        .into_iter()
        .map(map_entry)
        .collect()
}

/// Loads the flat week-view rows for one room in a semester.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value is invalid.
pub fn entries_for_room(
    conn: &mut SqliteConnection,
    semester_id: i64,
    room_id: i64,
) -> Result<Vec<ScheduleEntry>, PersistenceError> {
    schedules::table
        .inner_join(
            lessons::table
                .inner_join(teachers::table)
                .inner_join(groups::table),
        )
        .inner_join(rooms::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(schedules::room_id.eq(room_id))
        .select((
            schedules::id,
            schedules::lesson_id,
            schedules::day_of_week,
            schedules::period_id,
            schedules::parity,
            lessons::title,
            lessons::lesson_type,
            lessons::link_to_meeting,
            teachers::surname,
            groups::title,
            rooms::name,
        ))
        .load::<EntryRow>(conn)?
        .into_iter()
        .map(map_entry)
        .collect()
}

/// Ids of the placements at one concrete slot for any of the given
/// lessons. Used to take a whole grouped sibling set out of a slot.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn schedule_ids_at_slot(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
    day: Weekday,
    period_id: i64,
    parity: WeekParity,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(schedules::table
        .filter(schedules::lesson_id.eq_any(lesson_ids))
        .filter(schedules::day_of_week.eq(day_of_week_to_str(day)))
        .filter(schedules::period_id.eq(period_id))
        .filter(schedules::parity.eq(parity.as_str()))
        .select(schedules::id)
        .load::<i64>(conn)?)
}

/// Whether any placement references the room.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn room_is_referenced(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = schedules::table
        .filter(schedules::room_id.eq(room_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Whether any placement references the period.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn period_is_referenced(
    conn: &mut SqliteConnection,
    period_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = schedules::table
        .filter(schedules::period_id.eq(period_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Whether any placement of a semester falls on the given day.
///
/// Guards shrinking the semester's day set.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn semester_day_is_referenced(
    conn: &mut SqliteConnection,
    semester_id: i64,
    day: Weekday,
) -> Result<bool, PersistenceError> {
    let count: i64 = schedules::table
        .inner_join(lessons::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(schedules::day_of_week.eq(day_of_week_to_str(day)))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Whether any placement of a semester uses the given period.
///
/// Guards shrinking the semester's period set.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn semester_period_is_referenced(
    conn: &mut SqliteConnection,
    semester_id: i64,
    period_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = schedules::table
        .inner_join(lessons::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(schedules::period_id.eq(period_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// The distinct days on which a group has placements, Monday first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored day is invalid.
pub fn days_with_classes_for_group(
    conn: &mut SqliteConnection,
    semester_id: i64,
    group_id: i64,
) -> Result<Vec<Weekday>, PersistenceError> {
    let raw: Vec<String> = schedules::table
        .inner_join(lessons::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::group_id.eq(group_id))
        .select(schedules::day_of_week)
        .load::<String>(conn)?;

    let mut days: Vec<Weekday> = raw
        .iter()
        .map(|day| day_of_week_from_str(day))
        .collect::<Result<Vec<Weekday>, DomainError>>()?;
    days.sort_by_key(|day| day_order(*day));
    days.dedup();
    Ok(days)
}

/// The distinct periods in which a group has placements on one day, in
/// start-time order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn period_ids_with_classes_for_group(
    conn: &mut SqliteConnection,
    semester_id: i64,
    group_id: i64,
    day: Weekday,
) -> Result<Vec<i64>, PersistenceError> {
    let mut ids: Vec<i64> = schedules::table
        .inner_join(lessons::table)
        .inner_join(periods::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::group_id.eq(group_id))
        .filter(schedules::day_of_week.eq(day_of_week_to_str(day)))
        .order(periods::start_time.asc())
        .select(schedules::period_id)
        .load::<i64>(conn)?;
    ids.dedup();
    Ok(ids)
}

/// Ids of rooms occupied at the slot under the parity predicate.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn occupied_room_ids_at_slot(
    conn: &mut SqliteConnection,
    semester_id: i64,
    day: Weekday,
    period_id: i64,
    predicate: ParityPredicate,
) -> Result<Vec<i64>, PersistenceError> {
    let base = schedules::table
        .inner_join(lessons::table)
        .filter(lessons::semester_id.eq(semester_id))
        .filter(schedules::day_of_week.eq(day_of_week_to_str(day)))
        .filter(schedules::period_id.eq(period_id))
        .select(schedules::room_id);

    let ids: Vec<i64> = match predicate {
        ParityPredicate::AnyParity => base.load::<i64>(conn)?,
        ParityPredicate::SameOrWeekly(parity) => base
            .filter(
                schedules::parity
                    .eq(parity.as_str())
                    .or(schedules::parity.eq(WeekParity::Weekly.as_str())),
            )
            .load::<i64>(conn)?,
    };
    Ok(ids)
}
