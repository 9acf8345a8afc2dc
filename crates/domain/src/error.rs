// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced entity does not exist.
    NotFound {
        /// The entity kind (e.g. "Lesson", "Room").
        entity: &'static str,
        /// The id that failed to resolve.
        id: i64,
    },
    /// The anchor entity of a sort-order operation does not exist.
    AnchorNotFound {
        /// The entity kind being ordered.
        entity: &'static str,
        /// The anchor id that failed to resolve.
        anchor_id: i64,
    },
    /// An entity with the same identifying attributes already exists.
    AlreadyExists {
        /// The entity kind.
        entity: &'static str,
        /// Human-readable description of the duplicate.
        detail: String,
    },
    /// The group or teacher is already booked in an overlapping parity
    /// at the requested (semester, day, period) slot.
    ScheduleConflict(String),
    /// The entity is still referenced and cannot be deleted or shrunk.
    UsedEntity(String),
    /// A period or semester ends before (or exactly when) it starts.
    IncorrectTime(String),
    /// A period overlaps or is exactly adjacent to an existing one.
    PeriodConflict(String),
    /// No semester is flagged as current.
    NoCurrentSemester,
    /// No semester is flagged as default.
    NoDefaultSemester,
    /// A stored week parity value could not be parsed.
    InvalidParity(String),
    /// A stored day-of-week value could not be parsed.
    InvalidDayOfWeek(String),
    /// A stored lesson type value could not be parsed.
    InvalidLessonType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => {
                write!(f, "{entity} with id {id} not found")
            }
            Self::AnchorNotFound { entity, anchor_id } => {
                write!(f, "{entity} used as sort anchor with id {anchor_id} not found")
            }
            Self::AlreadyExists { entity, detail } => {
                write!(f, "{entity} already exists: {detail}")
            }
            Self::ScheduleConflict(msg) => write!(f, "{msg}"),
            Self::UsedEntity(msg) => write!(f, "{msg}"),
            Self::IncorrectTime(msg) => write!(f, "Incorrect time: {msg}"),
            Self::PeriodConflict(msg) => write!(f, "Period conflict: {msg}"),
            Self::NoCurrentSemester => write!(f, "No semester is currently set as current"),
            Self::NoDefaultSemester => write!(f, "No semester is currently set as default"),
            Self::InvalidParity(value) => write!(f, "Invalid week parity: {value}"),
            Self::InvalidDayOfWeek(value) => write!(f, "Invalid day of week: {value}"),
            Self::InvalidLessonType(value) => write!(f, "Invalid lesson type: {value}"),
        }
    }
}

impl std::error::Error for DomainError {}
