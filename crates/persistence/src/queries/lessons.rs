// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson queries, including grouped sibling-set resolution.
//!
//! Siblings of a grouped lesson are found purely by attribute match on
//! the six-column key (subject, hours, teacher, semester, type, title)
//! plus the `grouped` flag; there is no foreign key between siblings.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::{DomainError, Lesson, LessonType, SiblingKey};

use crate::data_models::LessonRow;
use crate::diesel_schema::lessons;
use crate::error::PersistenceError;

/// Fetches a lesson by id.
///
/// # Errors
///
/// Returns `NotFound` if no lesson has the id.
pub fn lesson_by_id(conn: &mut SqliteConnection, lesson_id: i64) -> Result<Lesson, PersistenceError> {
    lessons::table
        .find(lesson_id)
        .first::<LessonRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        }))?
        .into_domain()
}

/// Lists all lessons of a semester.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lessons_for_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Vec<Lesson>, PersistenceError> {
    lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .order(lessons::id.asc())
        .load::<LessonRow>(conn)?
        .into_iter()
        .map(LessonRow::into_domain)
        .collect()
}

/// Lists the lessons of one group in a semester.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lessons_for_group(
    conn: &mut SqliteConnection,
    semester_id: i64,
    group_id: i64,
) -> Result<Vec<Lesson>, PersistenceError> {
    lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::group_id.eq(group_id))
        .order(lessons::id.asc())
        .load::<LessonRow>(conn)?
        .into_iter()
        .map(LessonRow::into_domain)
        .collect()
}

/// Lists the lessons taught by one teacher in a semester.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lessons_for_teacher(
    conn: &mut SqliteConnection,
    semester_id: i64,
    teacher_id: i64,
) -> Result<Vec<Lesson>, PersistenceError> {
    lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::teacher_id.eq(teacher_id))
        .order(lessons::id.asc())
        .load::<LessonRow>(conn)?
        .into_iter()
        .map(LessonRow::into_domain)
        .collect()
}

/// Counts lessons duplicating the (subject, teacher, group, semester,
/// type) tuple of the given lesson, excluding the lesson itself when it
/// is already persisted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_duplicates(
    conn: &mut SqliteConnection,
    lesson: &Lesson,
) -> Result<i64, PersistenceError> {
    let mut query = lessons::table
        .filter(lessons::subject_id.eq(lesson.subject_id))
        .filter(lessons::teacher_id.eq(lesson.teacher_id))
        .filter(lessons::group_id.eq(lesson.group_id))
        .filter(lessons::semester_id.eq(lesson.semester_id))
        .filter(lessons::lesson_type.eq(lesson.lesson_type.as_str()))
        .into_boxed();

    if let Some(id) = lesson.id {
        query = query.filter(lessons::id.ne(id));
    }

    Ok(query.count().get_result(conn)?)
}

/// Resolves the sibling set of a grouped lesson by its attribute key.
///
/// The result includes the lesson the key was taken from, when that
/// lesson is itself flagged grouped.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn siblings_of(
    conn: &mut SqliteConnection,
    key: &SiblingKey,
) -> Result<Vec<Lesson>, PersistenceError> {
    lessons::table
        .filter(lessons::grouped.eq(1))
        .filter(lessons::subject_id.eq(key.subject_id))
        .filter(lessons::hours.eq(key.hours))
        .filter(lessons::teacher_id.eq(key.teacher_id))
        .filter(lessons::semester_id.eq(key.semester_id))
        .filter(lessons::lesson_type.eq(key.lesson_type.as_str()))
        .filter(lessons::title.eq(&key.title))
        .order(lessons::id.asc())
        .load::<LessonRow>(conn)?
        .into_iter()
        .map(LessonRow::into_domain)
        .collect()
}

/// Ids of the lessons a bulk meeting-link update targets: all lessons
/// of the semester, optionally narrowed by subject and lesson type.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn lesson_ids_for_link_scope(
    conn: &mut SqliteConnection,
    semester_id: i64,
    teacher_id: i64,
    subject_id: Option<i64>,
    lesson_type: Option<LessonType>,
) -> Result<Vec<i64>, PersistenceError> {
    let mut query = lessons::table
        .filter(lessons::semester_id.eq(semester_id))
        .filter(lessons::teacher_id.eq(teacher_id))
        .select(lessons::id)
        .into_boxed();
    if let Some(subject) = subject_id {
        query = query.filter(lessons::subject_id.eq(subject));
    }
    if let Some(kind) = lesson_type {
        query = query.filter(lessons::lesson_type.eq(kind.as_str()));
    }
    Ok(query.load::<i64>(conn)?)
}

/// Resolves grouped lessons by the wide (subject, teacher, semester)
/// scope.
///
/// Used when a grouped edit changes the teacher or the subject: the
/// narrow six-column key would no longer find the siblings that still
/// carry the old attribute values.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn grouped_by_wide_scope(
    conn: &mut SqliteConnection,
    subject_id: i64,
    teacher_id: i64,
    semester_id: i64,
) -> Result<Vec<Lesson>, PersistenceError> {
    lessons::table
        .filter(lessons::grouped.eq(1))
        .filter(lessons::subject_id.eq(subject_id))
        .filter(lessons::teacher_id.eq(teacher_id))
        .filter(lessons::semester_id.eq(semester_id))
        .order(lessons::id.asc())
        .load::<LessonRow>(conn)?
        .into_iter()
        .map(LessonRow::into_domain)
        .collect()
}
