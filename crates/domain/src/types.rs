// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time, Weekday};

/// The week parity of a placement.
///
/// `Weekly` is a wildcard meaning "every week": it overlaps both `Even`
/// and `Odd` for conflict purposes, while `Even` and `Odd` never overlap
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekParity {
    Even,
    Odd,
    Weekly,
}

impl WeekParity {
    /// Converts this parity to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Even => "EVEN",
            Self::Odd => "ODD",
            Self::Weekly => "WEEKLY",
        }
    }

    /// Returns whether two parities occupy overlapping weeks.
    ///
    /// `Weekly` overlaps everything; `Even` and `Odd` only overlap
    /// themselves.
    #[must_use]
    pub const fn overlaps(&self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Weekly, _) | (_, Self::Weekly) | (Self::Even, Self::Even) | (Self::Odd, Self::Odd)
        )
    }
}

impl FromStr for WeekParity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVEN" => Ok(Self::Even),
            "ODD" => Ok(Self::Odd),
            "WEEKLY" => Ok(Self::Weekly),
            _ => Err(DomainError::InvalidParity(s.to_string())),
        }
    }
}

impl std::fmt::Display for WeekParity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The enumerated category of a teaching assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    Lecture,
    Practical,
    Laboratory,
}

impl LessonType {
    /// Converts this lesson type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "LECTURE",
            Self::Practical => "PRACTICAL",
            Self::Laboratory => "LABORATORY",
        }
    }

    /// All lesson types, in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Lecture, Self::Practical, Self::Laboratory]
    }
}

impl FromStr for LessonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LECTURE" => Ok(Self::Lecture),
            "PRACTICAL" => Ok(Self::Practical),
            "LABORATORY" => Ok(Self::Laboratory),
            _ => Err(DomainError::InvalidLessonType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Converts a weekday to its stored upper-case string representation.
#[must_use]
pub const fn day_of_week_to_str(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "MONDAY",
        Weekday::Tuesday => "TUESDAY",
        Weekday::Wednesday => "WEDNESDAY",
        Weekday::Thursday => "THURSDAY",
        Weekday::Friday => "FRIDAY",
        Weekday::Saturday => "SATURDAY",
        Weekday::Sunday => "SUNDAY",
    }
}

/// Parses a stored upper-case weekday string.
///
/// # Errors
///
/// Returns an error if the value is not a valid upper-case weekday name.
pub fn day_of_week_from_str(s: &str) -> Result<Weekday, DomainError> {
    match s {
        "MONDAY" => Ok(Weekday::Monday),
        "TUESDAY" => Ok(Weekday::Tuesday),
        "WEDNESDAY" => Ok(Weekday::Wednesday),
        "THURSDAY" => Ok(Weekday::Thursday),
        "FRIDAY" => Ok(Weekday::Friday),
        "SATURDAY" => Ok(Weekday::Saturday),
        "SUNDAY" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidDayOfWeek(s.to_string())),
    }
}

/// Sort key placing Monday first and Sunday last.
#[must_use]
pub const fn day_order(day: Weekday) -> u8 {
    day.number_days_from_monday()
}

/// A semester with its active days, periods and enrolled groups.
///
/// Exactly one semester is flagged `current` and exactly one `default`
/// system-wide; the write path enforces both as single-row invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// The canonical id assigned by the store. `None` before persistence.
    pub id: Option<i64>,
    pub description: String,
    pub year: u16,
    pub start_date: Date,
    pub end_date: Date,
    pub current: bool,
    pub default_semester: bool,
    pub disabled: bool,
    /// The days of the week on which this semester has classes.
    pub days: Vec<Weekday>,
    /// Ids of the periods active in this semester.
    pub period_ids: Vec<i64>,
    /// Ids of the groups enrolled in this semester.
    pub group_ids: Vec<i64>,
}

/// A teaching period (a "class slot" within a day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: Option<i64>,
    pub name: String,
    pub start_time: Time,
    pub end_time: Time,
}

/// A room, order-managed through its `sort_order` rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Option<i64>,
    pub name: String,
    /// The room category name (e.g. "Laboratory"); (name, kind) is unique.
    pub kind: String,
    pub disabled: bool,
    /// The dense 1..N rank assigned by the ordered position manager.
    pub sort_order: Option<i32>,
}

/// A student group, order-managed through its `sort_order` rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Option<i64>,
    pub title: String,
    pub disabled: bool,
    /// The dense 1..N rank assigned by the ordered position manager.
    pub sort_order: Option<i32>,
}

/// A teacher reference entity; not order-managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Option<i64>,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub position: String,
    pub disabled: bool,
}

/// A subject reference entity; not order-managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Option<i64>,
    pub name: String,
    pub disabled: bool,
}

/// A teaching assignment: (teacher, subject, group, semester, type).
///
/// Duplicates of that tuple are rejected. When `grouped` is true the
/// lesson is one member of a sibling set identified by [`SiblingKey`]
/// and must be scheduled, edited and deleted in lockstep with its
/// siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Option<i64>,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub group_id: i64,
    pub semester_id: i64,
    pub hours: i32,
    pub lesson_type: LessonType,
    /// The display label shown on the published timetable.
    pub title: String,
    pub link_to_meeting: Option<String>,
    pub grouped: bool,
}

/// A placement: one concrete assignment of a lesson to a slot and room.
///
/// The slot is (semester, day, period, parity); the semester is derived
/// transitively from the lesson and never stored on the placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub id: Option<i64>,
    pub lesson_id: i64,
    pub room_id: i64,
    pub period_id: i64,
    pub day: Weekday,
    pub parity: WeekParity,
}

/// The attribute tuple identifying a grouped lesson's sibling set.
///
/// Two lessons are siblings iff all six attributes match and both are
/// flagged `grouped`. Siblings reference each other only through this
/// shared tuple, never through a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiblingKey {
    pub subject_id: i64,
    pub hours: i32,
    pub teacher_id: i64,
    pub semester_id: i64,
    pub lesson_type: LessonType,
    pub title: String,
}

impl SiblingKey {
    /// Extracts the sibling key from a lesson.
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            subject_id: lesson.subject_id,
            hours: lesson.hours,
            teacher_id: lesson.teacher_id,
            semester_id: lesson.semester_id,
            lesson_type: lesson.lesson_type,
            title: lesson.title.clone(),
        }
    }

    /// Returns whether a lesson belongs to this sibling set.
    ///
    /// The lesson must be flagged `grouped` in addition to matching all
    /// six key attributes.
    #[must_use]
    pub fn matches(&self, lesson: &Lesson) -> bool {
        lesson.grouped
            && lesson.subject_id == self.subject_id
            && lesson.hours == self.hours
            && lesson.teacher_id == self.teacher_id
            && lesson.semester_id == self.semester_id
            && lesson.lesson_type == self.lesson_type
            && lesson.title == self.title
    }
}
