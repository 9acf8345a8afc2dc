// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes for the reference catalog: rooms, groups, teachers, subjects.

use diesel::SqliteConnection;
use diesel::prelude::*;
use timetable_domain::{Group, Room, Subject, Teacher};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewGroupRow, NewRoomRow, NewSubjectRow, NewTeacherRow};
use crate::diesel_schema::{groups, rooms, subjects, teachers};
use crate::error::PersistenceError;

/// Inserts one room and returns its id. The rank is assigned separately
/// by the ordering module.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_room(conn: &mut SqliteConnection, room: &Room) -> Result<i64, PersistenceError> {
    diesel::insert_into(rooms::table)
        .values(NewRoomRow::from_domain(room))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites the attributes of one room; the rank is not touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_room_row(
    conn: &mut SqliteConnection,
    room_id: i64,
    room: &Room,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(rooms::table.find(room_id))
        .set((
            rooms::name.eq(&room.name),
            rooms::kind.eq(&room.kind),
            rooms::disabled.eq(i32::from(room.disabled)),
        ))
        .execute(conn)?)
}

/// Deletes one room.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(rooms::table.find(room_id)).execute(conn)?)
}

/// Inserts one group and returns its id. The rank is assigned separately
/// by the ordering module.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_group(conn: &mut SqliteConnection, group: &Group) -> Result<i64, PersistenceError> {
    diesel::insert_into(groups::table)
        .values(NewGroupRow::from_domain(group))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites the attributes of one group; the rank is not touched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_group_row(
    conn: &mut SqliteConnection,
    group_id: i64,
    group: &Group,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(groups::table.find(group_id))
        .set((
            groups::title.eq(&group.title),
            groups::disabled.eq(i32::from(group.disabled)),
        ))
        .execute(conn)?)
}

/// Deletes one group.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_group(conn: &mut SqliteConnection, group_id: i64) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(groups::table.find(group_id)).execute(conn)?)
}

/// Inserts one teacher and returns the new id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_teacher(
    conn: &mut SqliteConnection,
    teacher: &Teacher,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(teachers::table)
        .values(NewTeacherRow::from_domain(teacher))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites one teacher row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_teacher_row(
    conn: &mut SqliteConnection,
    teacher_id: i64,
    teacher: &Teacher,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(teachers::table.find(teacher_id))
        .set((
            teachers::surname.eq(&teacher.surname),
            teachers::name.eq(&teacher.name),
            teachers::patronymic.eq(&teacher.patronymic),
            teachers::position.eq(&teacher.position),
            teachers::disabled.eq(i32::from(teacher.disabled)),
        ))
        .execute(conn)?)
}

/// Deletes one teacher.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_teacher(
    conn: &mut SqliteConnection,
    teacher_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(teachers::table.find(teacher_id)).execute(conn)?)
}

/// Inserts one subject and returns the new id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_subject(
    conn: &mut SqliteConnection,
    subject: &Subject,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(subjects::table)
        .values(NewSubjectRow::from_domain(subject))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Rewrites one subject row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_subject_row(
    conn: &mut SqliteConnection,
    subject_id: i64,
    subject: &Subject,
) -> Result<usize, PersistenceError> {
    Ok(diesel::update(subjects::table.find(subject_id))
        .set((
            subjects::name.eq(&subject.name),
            subjects::disabled.eq(i32::from(subject.disabled)),
        ))
        .execute(conn)?)
}

/// Deletes one subject.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_subject(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(subjects::table.find(subject_id)).execute(conn)?)
}
