// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reads for the reference catalog: rooms, groups, teachers, subjects.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::{DomainError, Group, Room, Subject, Teacher};

use crate::data_models::{GroupRow, RoomRow, SubjectRow, TeacherRow};
use crate::diesel_schema::{groups, lessons, rooms, semester_groups, subjects, teachers};
use crate::error::PersistenceError;

/// Fetches a room by id.
///
/// # Errors
///
/// Returns `NotFound` if no room has the id.
pub fn room_by_id(conn: &mut SqliteConnection, room_id: i64) -> Result<Room, PersistenceError> {
    let row: RoomRow = rooms::table
        .find(room_id)
        .first::<RoomRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Room",
            id: room_id,
        }))?;
    Ok(row.into_domain())
}

/// Lists all rooms in managed sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_rooms(conn: &mut SqliteConnection) -> Result<Vec<Room>, PersistenceError> {
    Ok(rooms::table
        .order(rooms::sort_order.asc())
        .load::<RoomRow>(conn)?
        .into_iter()
        .map(RoomRow::into_domain)
        .collect())
}

/// Whether a (name, kind) room pair is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn room_exists(
    conn: &mut SqliteConnection,
    name: &str,
    kind: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = rooms::table
        .filter(rooms::name.eq(name))
        .filter(rooms::kind.eq(kind))
        .into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(rooms::id.ne(id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Fetches a group by id.
///
/// # Errors
///
/// Returns `NotFound` if no group has the id.
pub fn group_by_id(conn: &mut SqliteConnection, group_id: i64) -> Result<Group, PersistenceError> {
    let row: GroupRow = groups::table
        .find(group_id)
        .first::<GroupRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Group",
            id: group_id,
        }))?;
    Ok(row.into_domain())
}

/// Lists all groups in managed sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_groups(conn: &mut SqliteConnection) -> Result<Vec<Group>, PersistenceError> {
    Ok(groups::table
        .order(groups::sort_order.asc())
        .load::<GroupRow>(conn)?
        .into_iter()
        .map(GroupRow::into_domain)
        .collect())
}

/// Lists the groups enrolled in a semester, in managed sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn groups_for_semester(
    conn: &mut SqliteConnection,
    semester_id: i64,
) -> Result<Vec<Group>, PersistenceError> {
    Ok(groups::table
        .inner_join(semester_groups::table)
        .filter(semester_groups::semester_id.eq(semester_id))
        .order(groups::sort_order.asc())
        .select((groups::id, groups::title, groups::disabled, groups::sort_order))
        .load::<GroupRow>(conn)?
        .into_iter()
        .map(GroupRow::into_domain)
        .collect())
}

/// Whether a group title is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn group_title_exists(
    conn: &mut SqliteConnection,
    title: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = groups::table.filter(groups::title.eq(title)).into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(groups::id.ne(id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Whether any lesson references the group.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn group_is_referenced(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = lessons::table
        .filter(lessons::group_id.eq(group_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Fetches a teacher by id.
///
/// # Errors
///
/// Returns `NotFound` if no teacher has the id.
pub fn teacher_by_id(
    conn: &mut SqliteConnection,
    teacher_id: i64,
) -> Result<Teacher, PersistenceError> {
    let row: TeacherRow = teachers::table
        .find(teacher_id)
        .first::<TeacherRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Teacher",
            id: teacher_id,
        }))?;
    Ok(row.into_domain())
}

/// Lists all teachers, ordered by surname.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_teachers(conn: &mut SqliteConnection) -> Result<Vec<Teacher>, PersistenceError> {
    Ok(teachers::table
        .order((teachers::surname.asc(), teachers::name.asc()))
        .load::<TeacherRow>(conn)?
        .into_iter()
        .map(TeacherRow::into_domain)
        .collect())
}

/// Whether any lesson references the teacher.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn teacher_is_referenced(
    conn: &mut SqliteConnection,
    teacher_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = lessons::table
        .filter(lessons::teacher_id.eq(teacher_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Fetches a subject by id.
///
/// # Errors
///
/// Returns `NotFound` if no subject has the id.
pub fn subject_by_id(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> Result<Subject, PersistenceError> {
    let row: SubjectRow = subjects::table
        .find(subject_id)
        .first::<SubjectRow>(conn)
        .optional()?
        .ok_or(PersistenceError::Domain(DomainError::NotFound {
            entity: "Subject",
            id: subject_id,
        }))?;
    Ok(row.into_domain())
}

/// Lists all subjects, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_subjects(conn: &mut SqliteConnection) -> Result<Vec<Subject>, PersistenceError> {
    Ok(subjects::table
        .order(subjects::name.asc())
        .load::<SubjectRow>(conn)?
        .into_iter()
        .map(SubjectRow::into_domain)
        .collect())
}

/// Whether a subject name is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn subject_name_exists(
    conn: &mut SqliteConnection,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = subjects::table
        .filter(subjects::name.eq(name))
        .into_boxed();
    if let Some(id) = exclude_id {
        query = query.filter(subjects::id.ne(id));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

/// Whether any lesson references the subject.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn subject_is_referenced(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = lessons::table
        .filter(lessons::subject_id.eq(subject_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
