// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the relational schema and the domain types.
//!
//! Dates are stored as `YYYY-MM-DD` text, times as `HH:MM:SS` text (which
//! sorts chronologically under lexicographic ordering), weekdays and
//! parities as upper-case text, and booleans as 0/1 integers.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};
use timetable::{DaySchedule, ScheduleEntry};
use timetable_domain::{
    Group, Lesson, LessonType, Period, Placement, Room, Semester, Subject, Teacher, WeekParity,
    day_of_week_from_str, day_of_week_to_str,
};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::ConversionError(e.to_string()))
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns an error if the stored value is not `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| PersistenceError::ConversionError(e.to_string()))
}

/// Formats a time of day for storage.
///
/// # Errors
///
/// Returns an error if the time cannot be formatted.
pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::ConversionError(e.to_string()))
}

/// Parses a stored time of day.
///
/// # Errors
///
/// Returns an error if the stored value is not `HH:MM:SS`.
pub fn parse_time(value: &str) -> Result<Time, PersistenceError> {
    Time::parse(value, TIME_FORMAT).map_err(|e| PersistenceError::ConversionError(e.to_string()))
}

/// Availability of a (semester, day, period, parity) slot for one lesson.
///
/// Produced by the pre-placement dry run so a client can warn before the
/// actual save is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    /// No enabled placement occupies the slot for the lesson's group.
    pub group_free: bool,
    /// No enabled placement occupies the slot for the lesson's teacher.
    pub teacher_free: bool,
}

impl SlotAvailability {
    /// Returns whether the slot is free for both the group and teacher.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.group_free && self.teacher_free
    }
}

/// The placements that occur on one concrete calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedSchedule {
    pub date: Date,
    pub entries: Vec<ScheduleEntry>,
}

/// One room with its availability at a candidate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    pub room: Room,
    pub available: bool,
}

/// Everything a client needs to offer placement choices for a lesson at
/// a slot: whether the teacher is free, and each enabled room annotated
/// with its availability. Produced only when the lesson's group is free
/// at the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOptions {
    pub teacher_free: bool,
    pub rooms: Vec<RoomAvailability>,
}

/// The assembled week view of one group, for the semester-wide view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupWeek {
    pub group: Group,
    pub days: Vec<DaySchedule>,
}

/// The assembled week view of one room, for the all-rooms listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomWeek {
    pub room: Room,
    pub days: Vec<DaySchedule>,
}

// ============================================================================
// Reference tables
// ============================================================================

#[derive(Debug, Queryable)]
pub struct GroupRow {
    pub id: i64,
    pub title: String,
    pub disabled: i32,
    pub sort_order: Option<i32>,
}

impl GroupRow {
    pub(crate) fn into_domain(self) -> Group {
        Group {
            id: Some(self.id),
            title: self.title,
            disabled: self.disabled != 0,
            sort_order: self.sort_order,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::groups)]
pub struct NewGroupRow {
    pub title: String,
    pub disabled: i32,
    pub sort_order: Option<i32>,
}

impl NewGroupRow {
    pub(crate) fn from_domain(group: &Group) -> Self {
        Self {
            title: group.title.clone(),
            disabled: i32::from(group.disabled),
            sort_order: group.sort_order,
        }
    }
}

#[derive(Debug, Queryable)]
pub struct RoomRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub disabled: i32,
    pub sort_order: Option<i32>,
}

impl RoomRow {
    pub(crate) fn into_domain(self) -> Room {
        Room {
            id: Some(self.id),
            name: self.name,
            kind: self.kind,
            disabled: self.disabled != 0,
            sort_order: self.sort_order,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::rooms)]
pub struct NewRoomRow {
    pub name: String,
    pub kind: String,
    pub disabled: i32,
    pub sort_order: Option<i32>,
}

impl NewRoomRow {
    pub(crate) fn from_domain(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            kind: room.kind.clone(),
            disabled: i32::from(room.disabled),
            sort_order: room.sort_order,
        }
    }
}

#[derive(Debug, Queryable)]
pub struct TeacherRow {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub position: String,
    pub disabled: i32,
}

impl TeacherRow {
    pub(crate) fn into_domain(self) -> Teacher {
        Teacher {
            id: Some(self.id),
            surname: self.surname,
            name: self.name,
            patronymic: self.patronymic,
            position: self.position,
            disabled: self.disabled != 0,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::teachers)]
pub struct NewTeacherRow {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub position: String,
    pub disabled: i32,
}

impl NewTeacherRow {
    pub(crate) fn from_domain(teacher: &Teacher) -> Self {
        Self {
            surname: teacher.surname.clone(),
            name: teacher.name.clone(),
            patronymic: teacher.patronymic.clone(),
            position: teacher.position.clone(),
            disabled: i32::from(teacher.disabled),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct SubjectRow {
    pub id: i64,
    pub name: String,
    pub disabled: i32,
}

impl SubjectRow {
    pub(crate) fn into_domain(self) -> Subject {
        Subject {
            id: Some(self.id),
            name: self.name,
            disabled: self.disabled != 0,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::subjects)]
pub struct NewSubjectRow {
    pub name: String,
    pub disabled: i32,
}

impl NewSubjectRow {
    pub(crate) fn from_domain(subject: &Subject) -> Self {
        Self {
            name: subject.name.clone(),
            disabled: i32::from(subject.disabled),
        }
    }
}

// ============================================================================
// Periods, semesters
// ============================================================================

#[derive(Debug, Queryable)]
pub struct PeriodRow {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl PeriodRow {
    pub(crate) fn into_domain(self) -> Result<Period, PersistenceError> {
        Ok(Period {
            id: Some(self.id),
            name: self.name,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::periods)]
pub struct NewPeriodRow {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl NewPeriodRow {
    pub(crate) fn from_domain(period: &Period) -> Result<Self, PersistenceError> {
        Ok(Self {
            name: period.name.clone(),
            start_time: format_time(period.start_time)?,
            end_time: format_time(period.end_time)?,
        })
    }
}

#[derive(Debug, Queryable)]
pub struct SemesterRow {
    pub id: i64,
    pub description: String,
    pub year: i32,
    pub start_date: String,
    pub end_date: String,
    pub current_semester: i32,
    pub default_semester: i32,
    pub disabled: i32,
}

impl SemesterRow {
    /// Combines the semester row with its junction-table collections.
    pub(crate) fn into_domain(
        self,
        days: Vec<time::Weekday>,
        period_ids: Vec<i64>,
        group_ids: Vec<i64>,
    ) -> Result<Semester, PersistenceError> {
        let year: u16 = self.year.to_u16().ok_or_else(|| {
            PersistenceError::ConversionError(format!("Semester year out of range: {}", self.year))
        })?;
        Ok(Semester {
            id: Some(self.id),
            description: self.description,
            year,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            current: self.current_semester != 0,
            default_semester: self.default_semester != 0,
            disabled: self.disabled != 0,
            days,
            period_ids,
            group_ids,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::semesters)]
pub struct NewSemesterRow {
    pub description: String,
    pub year: i32,
    pub start_date: String,
    pub end_date: String,
    pub current_semester: i32,
    pub default_semester: i32,
    pub disabled: i32,
}

impl NewSemesterRow {
    pub(crate) fn from_domain(semester: &Semester) -> Result<Self, PersistenceError> {
        Ok(Self {
            description: semester.description.clone(),
            year: i32::from(semester.year),
            start_date: format_date(semester.start_date)?,
            end_date: format_date(semester.end_date)?,
            current_semester: i32::from(semester.current),
            default_semester: i32::from(semester.default_semester),
            disabled: i32::from(semester.disabled),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::semester_days)]
pub struct NewSemesterDayRow {
    pub semester_id: i64,
    pub day_of_week: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::semester_periods)]
pub struct NewSemesterPeriodRow {
    pub semester_id: i64,
    pub period_id: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::semester_groups)]
pub struct NewSemesterGroupRow {
    pub semester_id: i64,
    pub group_id: i64,
}

// ============================================================================
// Lessons, schedules
// ============================================================================

#[derive(Debug, Queryable)]
pub struct LessonRow {
    pub id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub group_id: i64,
    pub semester_id: i64,
    pub hours: i32,
    pub lesson_type: String,
    pub title: String,
    pub link_to_meeting: Option<String>,
    pub grouped: i32,
}

impl LessonRow {
    pub(crate) fn into_domain(self) -> Result<Lesson, PersistenceError> {
        Ok(Lesson {
            id: Some(self.id),
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            group_id: self.group_id,
            semester_id: self.semester_id,
            hours: self.hours,
            lesson_type: LessonType::from_str(&self.lesson_type)?,
            title: self.title,
            link_to_meeting: self.link_to_meeting,
            grouped: self.grouped != 0,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::lessons)]
pub struct NewLessonRow {
    pub subject_id: i64,
    pub teacher_id: i64,
    pub group_id: i64,
    pub semester_id: i64,
    pub hours: i32,
    pub lesson_type: String,
    pub title: String,
    pub link_to_meeting: Option<String>,
    pub grouped: i32,
}

impl NewLessonRow {
    pub(crate) fn from_domain(lesson: &Lesson) -> Self {
        Self {
            subject_id: lesson.subject_id,
            teacher_id: lesson.teacher_id,
            group_id: lesson.group_id,
            semester_id: lesson.semester_id,
            hours: lesson.hours,
            lesson_type: lesson.lesson_type.as_str().to_string(),
            title: lesson.title.clone(),
            link_to_meeting: lesson.link_to_meeting.clone(),
            grouped: i32::from(lesson.grouped),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct ScheduleRow {
    pub id: i64,
    pub lesson_id: i64,
    pub room_id: i64,
    pub period_id: i64,
    pub day_of_week: String,
    pub parity: String,
}

impl ScheduleRow {
    pub(crate) fn into_domain(self) -> Result<Placement, PersistenceError> {
        Ok(Placement {
            id: Some(self.id),
            lesson_id: self.lesson_id,
            room_id: self.room_id,
            period_id: self.period_id,
            day: day_of_week_from_str(&self.day_of_week)?,
            parity: WeekParity::from_str(&self.parity)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::schedules)]
pub struct NewScheduleRow {
    pub lesson_id: i64,
    pub room_id: i64,
    pub period_id: i64,
    pub day_of_week: String,
    pub parity: String,
}

impl NewScheduleRow {
    pub(crate) fn from_domain(placement: &Placement) -> Self {
        Self {
            lesson_id: placement.lesson_id,
            room_id: placement.room_id,
            period_id: placement.period_id,
            day_of_week: day_of_week_to_str(placement.day).to_string(),
            parity: placement.parity.as_str().to_string(),
        }
    }
}
