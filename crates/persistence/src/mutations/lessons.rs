// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson writes.
//!
//! Grouped edits rewrite the shared attribute columns of every lesson in
//! the target set with one bulk `UPDATE`; the per-group columns (group,
//! semester) are never touched by the rewrite.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::Lesson;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::NewLessonRow;
use crate::diesel_schema::lessons;
use crate::error::PersistenceError;

/// Inserts one lesson and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_lesson(conn: &mut SqliteConnection, lesson: &Lesson) -> Result<i64, PersistenceError> {
    diesel::insert_into(lessons::table)
        .values(NewLessonRow::from_domain(lesson))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites every column of one lesson row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_lesson_row(
    conn: &mut SqliteConnection,
    lesson_id: i64,
    lesson: &Lesson,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(lessons::table.find(lesson_id))
        .set((
            lessons::subject_id.eq(lesson.subject_id),
            lessons::teacher_id.eq(lesson.teacher_id),
            lessons::group_id.eq(lesson.group_id),
            lessons::semester_id.eq(lesson.semester_id),
            lessons::hours.eq(lesson.hours),
            lessons::lesson_type.eq(lesson.lesson_type.as_str()),
            lessons::title.eq(&lesson.title),
            lessons::link_to_meeting.eq(lesson.link_to_meeting.as_deref()),
            lessons::grouped.eq(i32::from(lesson.grouped)),
        ))
        .execute(conn)?)
}

/// Sets the grouped flag on one lesson.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_grouped(
    conn: &mut SqliteConnection,
    lesson_id: i64,
    grouped: bool,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(lessons::table.find(lesson_id))
        .set(lessons::grouped.eq(i32::from(grouped)))
        .execute(conn)?)
}

/// Rewrites the shared attributes of a grouped sibling set in one bulk
/// update, leaving each sibling's group untouched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn rewrite_shared_fields(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
    template: &Lesson,
) -> Result<usize, PersistenceError> {
    let rewritten: usize = diesel::update(lessons::table.filter(lessons::id.eq_any(lesson_ids)))
        .set((
            lessons::subject_id.eq(template.subject_id),
            lessons::teacher_id.eq(template.teacher_id),
            lessons::hours.eq(template.hours),
            lessons::lesson_type.eq(template.lesson_type.as_str()),
            lessons::title.eq(&template.title),
            lessons::link_to_meeting.eq(template.link_to_meeting.as_deref()),
        ))
        .execute(conn)?;
    debug!("Rewrote shared fields of {rewritten} grouped lessons");
    Ok(rewritten)
}

/// Sets the meeting link on the given lessons.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_link_to_meeting(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
    link: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(lessons::table.filter(lessons::id.eq_any(lesson_ids)))
        .set(lessons::link_to_meeting.eq(link))
        .execute(conn)?)
}

/// Deletes lessons by id.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_lessons_by_ids(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(lessons::table.filter(lessons::id.eq_any(lesson_ids))).execute(conn)?)
}

/// Deletes every lesson of a semester. Placements must be removed
/// first; the schedule rows reference the lessons.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_lessons_by_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(lessons::table.filter(lessons::semester_id.eq(semester_id)))
            .execute(conn)?;
    debug!("Deleted {deleted} lessons for semester {semester_id}");
    Ok(deleted)
}
