// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Timetable System.
//!
//! This crate owns the relational store behind the placement engine:
//! the reference catalog (rooms, groups, teachers, subjects), semesters
//! with their day/period/group collections, lessons, and the placements
//! (`schedules`) that pin lessons to (day, period, parity) slots. It is
//! built on Diesel over `SQLite`.
//!
//! ## Write Discipline
//!
//! Every multi-step write runs inside a single transaction: conflict
//! checks and the inserts they guard, grouped sibling expansion, rank
//! shifts of the ordered tables, and the current/default semester flag
//! flips all commit or roll back as one unit. The conflict check is
//! count-then-insert under the transaction; there is no unique slot
//! constraint backing it up, so two writers racing past the count can
//! both commit. This matches the behavior the engine has always had.
//!
//! ## Cache Invalidation
//!
//! Rendered week views are cached by the embedding process, keyed by
//! (semester, group, teacher). The adapter notifies a
//! [`CacheInvalidator`] after each committing write that can change a
//! rendered view, dropping everything after bulk or cross-semester
//! changes; the default invalidator only logs.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory `SQLite` databases, one
//! per test, named by an atomic counter for deterministic isolation.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Weekday};
use timetable::{
    DaySchedule, ParityPredicate, ScheduleEntry, assemble_week, conflict_predicate,
    expand_for_siblings, occurs_on,
};
use timetable_domain::{
    DomainError, Group, Lesson, LessonType, Period, Placement, Room, Semester, SiblingKey,
    Subject, Teacher, WeekParity, day_of_week_to_str, validate_period_batch, validate_period_time,
    validate_period_uniqueness, validate_semester_dates,
};
use tracing::info;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod cache;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use cache::{CacheInvalidator, NoopCacheInvalidator};
pub use data_models::{
    DatedSchedule, GroupWeek, PlacementOptions, RoomAvailability, RoomWeek, SlotAvailability,
};
pub use error::PersistenceError;

/// Persistence adapter for the timetable store.
///
/// Owns the `SQLite` connection and the cache invalidation seam. All
/// scheduling rules are evaluated through the pure `timetable` crate;
/// this adapter executes the resulting plans and predicates against the
/// database.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
    cache: Box<dyn CacheInvalidator>,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            cache: Box::new(NoopCacheInvalidator),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            cache: Box::new(NoopCacheInvalidator),
        })
    }

    /// Installs a cache invalidator, replacing the logging default.
    #[must_use]
    pub fn with_cache_invalidator(mut self, cache: Box<dyn CacheInvalidator>) -> Self {
        self.cache = cache;
        self
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Placements
    // ========================================================================

    /// Places a lesson into a (day, period, parity) slot and room.
    ///
    /// The slot is checked for group and teacher conflicts under the
    /// parity overlap rule before anything is written. For a grouped
    /// lesson the placement expands across the whole sibling set: each
    /// sibling's group is conflict-checked independently and the batch
    /// commits atomically.
    ///
    /// # Arguments
    ///
    /// * `placement` - The requested placement; its id is ignored
    ///
    /// # Returns
    ///
    /// The ids of all placements written (one per sibling for grouped
    /// lessons).
    ///
    /// # Errors
    ///
    /// Returns `ScheduleConflict` if the group or teacher is already
    /// booked in an overlapping parity at the slot, or `NotFound` if
    /// the lesson does not exist.
    pub fn save_schedule(&mut self, placement: &Placement) -> Result<Vec<i64>, PersistenceError> {
        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, placement.lesson_id)?;
        let semester_id: i64 = lesson.semester_id;

        let (ids, placed_groups): (Vec<i64>, Vec<i64>) = self
            .conn
            .transaction::<(Vec<i64>, Vec<i64>), PersistenceError, _>(|conn| {
                let predicate: ParityPredicate = conflict_predicate(placement.parity);

                if queries::conflicts::teacher_conflict_count(
                    conn,
                    semester_id,
                    lesson.teacher_id,
                    placement.day,
                    placement.period_id,
                    predicate,
                )? > 0
                {
                    return Err(PersistenceError::Domain(DomainError::ScheduleConflict(
                        format!(
                            "Teacher {} is already booked at ({}, period {}, {})",
                            lesson.teacher_id,
                            day_of_week_to_str(placement.day),
                            placement.period_id,
                            placement.parity
                        ),
                    )));
                }

                let targets: Vec<Lesson> = if lesson.grouped {
                    queries::lessons::siblings_of(conn, &SiblingKey::from_lesson(&lesson))?
                } else {
                    vec![lesson.clone()]
                };

                for target in &targets {
                    if queries::conflicts::group_conflict_count(
                        conn,
                        semester_id,
                        target.group_id,
                        placement.day,
                        placement.period_id,
                        predicate,
                    )? > 0
                    {
                        return Err(PersistenceError::Domain(DomainError::ScheduleConflict(
                            format!(
                                "Group {} is already booked at ({}, period {}, {})",
                                target.group_id,
                                day_of_week_to_str(placement.day),
                                placement.period_id,
                                placement.parity
                            ),
                        )));
                    }
                }

                let expanded: Vec<Placement> = expand_for_siblings(placement, &targets);
                let mut ids: Vec<i64> = Vec::with_capacity(expanded.len());
                for item in &expanded {
                    ids.push(mutations::schedules::insert_schedule(conn, item)?);
                }
                Ok((ids, targets.iter().map(|t| t.group_id).collect()))
            })?;

        info!(
            "Saved {} placement(s) for lesson {} in semester {semester_id}",
            ids.len(),
            placement.lesson_id
        );
        for group_id in placed_groups {
            self.cache
                .evict_schedule(semester_id, group_id, lesson.teacher_id);
        }
        Ok(ids)
    }

    /// Dry-runs the conflict check for a lesson at a slot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lesson does not exist.
    pub fn check_slot(
        &mut self,
        lesson_id: i64,
        day: Weekday,
        period_id: i64,
        parity: WeekParity,
    ) -> Result<SlotAvailability, PersistenceError> {
        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, lesson_id)?;
        let predicate: ParityPredicate = conflict_predicate(parity);

        let group_busy: i64 = queries::conflicts::group_conflict_count(
            &mut self.conn,
            lesson.semester_id,
            lesson.group_id,
            day,
            period_id,
            predicate,
        )?;
        let teacher_busy: i64 = queries::conflicts::teacher_conflict_count(
            &mut self.conn,
            lesson.semester_id,
            lesson.teacher_id,
            day,
            period_id,
            predicate,
        )?;

        Ok(SlotAvailability {
            group_free: group_busy == 0,
            teacher_free: teacher_busy == 0,
        })
    }

    /// Gathers everything needed to offer placement choices for a
    /// lesson at a slot: teacher availability and every enabled room
    /// annotated with whether it is taken under the parity overlap
    /// rule.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleConflict` immediately if the lesson's group is
    /// already booked at the slot, or `NotFound` if the lesson does not
    /// exist.
    pub fn get_placement_options(
        &mut self,
        lesson_id: i64,
        day: Weekday,
        period_id: i64,
        parity: WeekParity,
    ) -> Result<PlacementOptions, PersistenceError> {
        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, lesson_id)?;
        let predicate: ParityPredicate = conflict_predicate(parity);

        if queries::conflicts::group_conflict_count(
            &mut self.conn,
            lesson.semester_id,
            lesson.group_id,
            day,
            period_id,
            predicate,
        )? > 0
        {
            return Err(PersistenceError::Domain(DomainError::ScheduleConflict(
                format!(
                    "Group {} is already booked at ({}, period {period_id}, {parity})",
                    lesson.group_id,
                    day_of_week_to_str(day),
                ),
            )));
        }

        let teacher_busy: i64 = queries::conflicts::teacher_conflict_count(
            &mut self.conn,
            lesson.semester_id,
            lesson.teacher_id,
            day,
            period_id,
            predicate,
        )?;
        let occupied: Vec<i64> = queries::schedules::occupied_room_ids_at_slot(
            &mut self.conn,
            lesson.semester_id,
            day,
            period_id,
            predicate,
        )?;

        let rooms: Vec<RoomAvailability> = queries::catalog::all_rooms(&mut self.conn)?
            .into_iter()
            .filter(|room| !room.disabled)
            .map(|room| {
                let available: bool = room.id.is_some_and(|id| !occupied.contains(&id));
                RoomAvailability { room, available }
            })
            .collect();

        Ok(PlacementOptions {
            teacher_free: teacher_busy == 0,
            rooms,
        })
    }

    /// Fetches a placement by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no placement has the id.
    pub fn get_schedule_by_id(&mut self, schedule_id: i64) -> Result<Placement, PersistenceError> {
        queries::schedules::schedule_by_id(&mut self.conn, schedule_id)
    }

    /// Moves an existing placement to a different room.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the placement or the room does not exist.
    pub fn change_schedule_room(
        &mut self,
        schedule_id: i64,
        room_id: i64,
    ) -> Result<Placement, PersistenceError> {
        queries::catalog::room_by_id(&mut self.conn, room_id)?;
        let placement: Placement = queries::schedules::schedule_by_id(&mut self.conn, schedule_id)?;
        mutations::schedules::update_schedule_room(&mut self.conn, schedule_id, room_id)?;

        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, placement.lesson_id)?;
        self.cache
            .evict_schedule(lesson.semester_id, lesson.group_id, lesson.teacher_id);
        queries::schedules::schedule_by_id(&mut self.conn, schedule_id)
    }

    /// Deletes a placement.
    ///
    /// Deleting any placement of a grouped lesson takes the whole
    /// sibling set out of that slot.
    ///
    /// # Returns
    ///
    /// The number of placements deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the placement does not exist.
    pub fn delete_schedule(&mut self, schedule_id: i64) -> Result<usize, PersistenceError> {
        let placement: Placement = queries::schedules::schedule_by_id(&mut self.conn, schedule_id)?;
        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, placement.lesson_id)?;

        let (deleted, affected_groups): (usize, Vec<i64>) = self
            .conn
            .transaction::<(usize, Vec<i64>), PersistenceError, _>(|conn| {
                if lesson.grouped {
                    let siblings: Vec<Lesson> =
                        queries::lessons::siblings_of(conn, &SiblingKey::from_lesson(&lesson))?;
                    let lesson_ids: Vec<i64> = siblings.iter().filter_map(|l| l.id).collect();
                    let schedule_ids: Vec<i64> = queries::schedules::schedule_ids_at_slot(
                        conn,
                        &lesson_ids,
                        placement.day,
                        placement.period_id,
                        placement.parity,
                    )?;
                    let deleted: usize =
                        mutations::schedules::delete_schedules_by_ids(conn, &schedule_ids)?;
                    Ok((deleted, siblings.iter().map(|l| l.group_id).collect()))
                } else {
                    let deleted: usize = mutations::schedules::delete_schedule(conn, schedule_id)?;
                    Ok((deleted, vec![lesson.group_id]))
                }
            })?;

        for group_id in affected_groups {
            self.cache.evict_schedule_with_lessons(
                lesson.semester_id,
                group_id,
                lesson.teacher_id,
            );
        }
        Ok(deleted)
    }

    /// Deletes every placement of a semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_schedules_by_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<usize, PersistenceError> {
        let deleted: usize =
            mutations::schedules::delete_schedules_by_semester(&mut self.conn, semester_id)?;
        self.cache.evict_all_schedules();
        Ok(deleted)
    }

    /// Assembles the full semester view: one week view per enrolled
    /// group, in managed group order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn schedule_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<GroupWeek>, PersistenceError> {
        let semester: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        let groups: Vec<Group> = queries::catalog::groups_for_semester(&mut self.conn, semester_id)?;

        let mut weeks: Vec<GroupWeek> = Vec::with_capacity(groups.len());
        for group in groups {
            let Some(group_id) = group.id else {
                continue;
            };
            let entries: Vec<ScheduleEntry> =
                queries::schedules::entries_for_group(&mut self.conn, semester_id, group_id)?;
            weeks.push(GroupWeek {
                group,
                days: assemble_week(&entries, &semester.days, &semester.period_ids),
            });
        }
        Ok(weeks)
    }

    /// Assembles the week view for one group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn schedule_for_group(
        &mut self,
        semester_id: i64,
        group_id: i64,
    ) -> Result<Vec<DaySchedule>, PersistenceError> {
        let semester: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        let entries: Vec<ScheduleEntry> =
            queries::schedules::entries_for_group(&mut self.conn, semester_id, group_id)?;
        Ok(assemble_week(&entries, &semester.days, &semester.period_ids))
    }

    /// Assembles the week view for one teacher.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn schedule_for_teacher(
        &mut self,
        semester_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<DaySchedule>, PersistenceError> {
        let semester: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        let entries: Vec<ScheduleEntry> =
            queries::schedules::entries_for_teacher(&mut self.conn, semester_id, teacher_id)?;
        Ok(assemble_week(&entries, &semester.days, &semester.period_ids))
    }

    /// Assembles the week view for one room.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn schedule_for_room(
        &mut self,
        semester_id: i64,
        room_id: i64,
    ) -> Result<Vec<DaySchedule>, PersistenceError> {
        let semester: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        let entries: Vec<ScheduleEntry> =
            queries::schedules::entries_for_room(&mut self.conn, semester_id, room_id)?;
        Ok(assemble_week(&entries, &semester.days, &semester.period_ids))
    }

    /// Assembles the week view of every enabled room, in managed room
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn schedule_for_all_rooms(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<RoomWeek>, PersistenceError> {
        let semester: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        let rooms: Vec<Room> = queries::catalog::all_rooms(&mut self.conn)?;

        let mut weeks: Vec<RoomWeek> = Vec::new();
        for room in rooms {
            if room.disabled {
                continue;
            }
            let Some(room_id) = room.id else {
                continue;
            };
            let entries: Vec<ScheduleEntry> =
                queries::schedules::entries_for_room(&mut self.conn, semester_id, room_id)?;
            weeks.push(RoomWeek {
                room,
                days: assemble_week(&entries, &semester.days, &semester.period_ids),
            });
        }
        Ok(weeks)
    }

    /// Lists the days on which a group actually has placements, Monday
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn days_with_classes_for_group(
        &mut self,
        semester_id: i64,
        group_id: i64,
    ) -> Result<Vec<Weekday>, PersistenceError> {
        queries::schedules::days_with_classes_for_group(&mut self.conn, semester_id, group_id)
    }

    /// Lists the periods in which a group has placements on one day, in
    /// start-time order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn periods_with_classes_for_group(
        &mut self,
        semester_id: i64,
        group_id: i64,
        day: Weekday,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::schedules::period_ids_with_classes_for_group(
            &mut self.conn,
            semester_id,
            group_id,
            day,
        )
    }

    /// Resolves a teacher's placements to concrete calendar dates.
    ///
    /// Walks every date in `[start, end]`, matching it against each
    /// enabled semester whose date range covers it: a placement occurs
    /// on a date when the weekday matches and the placement's parity
    /// overlaps the date's ISO-week parity.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn schedule_for_teacher_by_date_range(
        &mut self,
        teacher_id: i64,
        start: Date,
        end: Date,
    ) -> Result<Vec<DatedSchedule>, PersistenceError> {
        let semesters: Vec<Semester> = queries::semesters::all_semesters(&mut self.conn)?;

        let mut active: Vec<(Semester, Vec<ScheduleEntry>)> = Vec::new();
        for semester in semesters {
            if semester.disabled || semester.end_date < start || semester.start_date > end {
                continue;
            }
            let Some(semester_id) = semester.id else {
                continue;
            };
            let entries: Vec<ScheduleEntry> =
                queries::schedules::entries_for_teacher(&mut self.conn, semester_id, teacher_id)?;
            active.push((semester, entries));
        }

        let mut result: Vec<DatedSchedule> = Vec::new();
        let mut date: Date = start;
        loop {
            let weekday: Weekday = date.weekday();
            let mut entries_for_date: Vec<ScheduleEntry> = Vec::new();
            for (semester, entries) in &active {
                if date < semester.start_date
                    || date > semester.end_date
                    || !semester.days.contains(&weekday)
                {
                    continue;
                }
                entries_for_date.extend(
                    entries
                        .iter()
                        .filter(|entry| entry.day == weekday && occurs_on(entry.parity, date))
                        .cloned(),
                );
            }
            if !entries_for_date.is_empty() {
                result.push(DatedSchedule {
                    date,
                    entries: entries_for_date,
                });
            }
            if date >= end {
                break;
            }
            match date.next_day() {
                Some(next) => date = next,
                None => break,
            }
        }
        Ok(result)
    }

    /// Lists the enabled rooms free at a slot under the parity overlap
    /// rule.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn free_rooms_at_slot(
        &mut self,
        semester_id: i64,
        day: Weekday,
        period_id: i64,
        parity: WeekParity,
    ) -> Result<Vec<Room>, PersistenceError> {
        let predicate: ParityPredicate = conflict_predicate(parity);
        let occupied: Vec<i64> = queries::schedules::occupied_room_ids_at_slot(
            &mut self.conn,
            semester_id,
            day,
            period_id,
            predicate,
        )?;
        let rooms: Vec<Room> = queries::catalog::all_rooms(&mut self.conn)?;
        Ok(rooms
            .into_iter()
            .filter(|room| !room.disabled && room.id.is_some_and(|id| !occupied.contains(&id)))
            .collect())
    }

    // ========================================================================
    // Lessons
    // ========================================================================

    /// Creates a lesson.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the group already has a lesson with
    /// the same subject, teacher and type in the semester.
    pub fn save_lesson(&mut self, lesson: &Lesson) -> Result<i64, PersistenceError> {
        let lesson: Lesson = self.with_default_title(lesson)?;
        if queries::lessons::count_duplicates(&mut self.conn, &lesson)? > 0 {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Lesson",
                detail: format!(
                    "subject {} with teacher {} for group {} in semester {}",
                    lesson.subject_id, lesson.teacher_id, lesson.group_id, lesson.semester_id
                ),
            }));
        }
        let id: i64 = mutations::lessons::insert_lesson(&mut self.conn, &lesson)?;
        self.cache
            .evict_schedule_with_lessons(lesson.semester_id, lesson.group_id, lesson.teacher_id);
        Ok(id)
    }

    /// Fills an empty lesson title with the subject's name.
    fn with_default_title(&mut self, lesson: &Lesson) -> Result<Lesson, PersistenceError> {
        let mut lesson: Lesson = lesson.clone();
        if lesson.title.is_empty() {
            lesson.title =
                queries::catalog::subject_by_id(&mut self.conn, lesson.subject_id)?.name;
        }
        Ok(lesson)
    }

    /// Creates one grouped lesson per listed group, all sharing the
    /// template's attributes and flagged as siblings of each other.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if any target group already has a
    /// duplicate lesson; nothing is written in that case.
    pub fn save_grouped_lessons(
        &mut self,
        template: &Lesson,
        group_ids: &[i64],
    ) -> Result<Vec<i64>, PersistenceError> {
        let template: Lesson = self.with_default_title(template)?;
        let ids: Vec<i64> = self.conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
            let mut ids: Vec<i64> = Vec::with_capacity(group_ids.len());
            for group_id in group_ids {
                let member = Lesson {
                    id: None,
                    group_id: *group_id,
                    grouped: true,
                    ..template.clone()
                };
                if queries::lessons::count_duplicates(conn, &member)? > 0 {
                    return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                        entity: "Lesson",
                        detail: format!(
                            "subject {} with teacher {} for group {group_id} in semester {}",
                            member.subject_id, member.teacher_id, member.semester_id
                        ),
                    }));
                }
                ids.push(mutations::lessons::insert_lesson(conn, &member)?);
            }
            Ok(ids)
        })?;
        for group_id in group_ids {
            self.cache.evict_schedule_with_lessons(
                template.semester_id,
                *group_id,
                template.teacher_id,
            );
        }
        Ok(ids)
    }

    /// Fetches a lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no lesson has the id.
    pub fn get_lesson_by_id(&mut self, lesson_id: i64) -> Result<Lesson, PersistenceError> {
        queries::lessons::lesson_by_id(&mut self.conn, lesson_id)
    }

    /// Lists the lessons of one group in a semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lessons_for_group(
        &mut self,
        semester_id: i64,
        group_id: i64,
    ) -> Result<Vec<Lesson>, PersistenceError> {
        queries::lessons::lessons_for_group(&mut self.conn, semester_id, group_id)
    }

    /// Lists the lessons taught by one teacher in a semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lessons_for_teacher(
        &mut self,
        semester_id: i64,
        teacher_id: i64,
    ) -> Result<Vec<Lesson>, PersistenceError> {
        queries::lessons::lessons_for_teacher(&mut self.conn, semester_id, teacher_id)
    }

    /// Lists all lessons of a semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lessons_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<Lesson>, PersistenceError> {
        queries::lessons::lessons_for_semester(&mut self.conn, semester_id)
    }

    /// Updates a lesson.
    ///
    /// A grouped edit propagates the shared attributes to the entire
    /// sibling set. The set is resolved against the lesson's *stored*
    /// attributes: by the six-column sibling key normally, or by the
    /// wide (subject, teacher, semester) scope when the edit changes
    /// the teacher or subject (the narrow key would miss siblings still
    /// carrying the old values). A lesson newly flagged grouped has its
    /// flag flipped first so the rewrite includes it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lesson does not exist or
    /// `AlreadyExists` if the edit collides with another lesson.
    pub fn update_lesson(&mut self, lesson: &Lesson) -> Result<(), PersistenceError> {
        let lesson_id: i64 = lesson.id.ok_or_else(|| {
            PersistenceError::Other("Lesson must have an id to be updated".to_string())
        })?;
        let old: Lesson = queries::lessons::lesson_by_id(&mut self.conn, lesson_id)?;

        if queries::lessons::count_duplicates(&mut self.conn, lesson)? > 0 {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Lesson",
                detail: format!(
                    "subject {} with teacher {} for group {} in semester {}",
                    lesson.subject_id, lesson.teacher_id, lesson.group_id, lesson.semester_id
                ),
            }));
        }

        let affected_groups: Vec<i64> =
            self.conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
                if lesson.grouped {
                    if !old.grouped {
                        mutations::lessons::set_grouped(conn, lesson_id, true)?;
                    }
                    let scope_changed: bool =
                        old.teacher_id != lesson.teacher_id || old.subject_id != lesson.subject_id;
                    let targets: Vec<Lesson> = if scope_changed {
                        queries::lessons::grouped_by_wide_scope(
                            conn,
                            old.subject_id,
                            old.teacher_id,
                            old.semester_id,
                        )?
                    } else {
                        queries::lessons::siblings_of(conn, &SiblingKey::from_lesson(&old))?
                    };
                    let target_ids: Vec<i64> = targets.iter().filter_map(|l| l.id).collect();
                    mutations::lessons::rewrite_shared_fields(conn, &target_ids, lesson)?;
                    Ok(targets.iter().map(|l| l.group_id).collect())
                } else {
                    mutations::lessons::update_lesson_row(conn, lesson_id, lesson)?;
                    Ok(vec![old.group_id])
                }
            })?;

        for group_id in affected_groups {
            self.cache
                .evict_schedule_with_lessons(old.semester_id, group_id, old.teacher_id);
        }
        if lesson.teacher_id != old.teacher_id {
            self.cache.evict_schedule_with_lessons(
                lesson.semester_id,
                lesson.group_id,
                lesson.teacher_id,
            );
        }
        Ok(())
    }

    /// Deletes a lesson with its placements.
    ///
    /// Deleting a grouped lesson deletes the whole sibling set and all
    /// of their placements.
    ///
    /// # Returns
    ///
    /// The number of lessons deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lesson does not exist.
    pub fn delete_lesson(&mut self, lesson_id: i64) -> Result<usize, PersistenceError> {
        let lesson: Lesson = queries::lessons::lesson_by_id(&mut self.conn, lesson_id)?;

        let (deleted, affected_groups): (usize, Vec<i64>) = self
            .conn
            .transaction::<(usize, Vec<i64>), PersistenceError, _>(|conn| {
                let targets: Vec<Lesson> = if lesson.grouped {
                    queries::lessons::siblings_of(conn, &SiblingKey::from_lesson(&lesson))?
                } else {
                    vec![lesson.clone()]
                };
                let target_ids: Vec<i64> = targets.iter().filter_map(|l| l.id).collect();
                mutations::schedules::delete_schedules_for_lessons(conn, &target_ids)?;
                let deleted: usize = mutations::lessons::delete_lessons_by_ids(conn, &target_ids)?;
                Ok((deleted, targets.iter().map(|l| l.group_id).collect()))
            })?;

        for group_id in affected_groups {
            self.cache.evict_schedule_with_lessons(
                lesson.semester_id,
                group_id,
                lesson.teacher_id,
            );
        }
        Ok(deleted)
    }

    /// Deletes every lesson of a semester along with its placements.
    ///
    /// # Returns
    ///
    /// The number of lessons deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_lessons_by_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<usize, PersistenceError> {
        let deleted: usize = self.conn.transaction::<usize, PersistenceError, _>(|conn| {
            mutations::schedules::delete_schedules_by_semester(conn, semester_id)?;
            mutations::lessons::delete_lessons_by_semester(conn, semester_id)
        })?;
        self.cache.evict_all_schedules();
        Ok(deleted)
    }

    /// Copies every lesson of one semester into another, skipping
    /// lessons the target semester already has.
    ///
    /// # Returns
    ///
    /// The ids of the lessons created in the target semester.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either semester does not exist.
    pub fn copy_lessons_to_semester(
        &mut self,
        from_semester_id: i64,
        to_semester_id: i64,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::semesters::semester_by_id(&mut self.conn, from_semester_id)?;
        queries::semesters::semester_by_id(&mut self.conn, to_semester_id)?;

        let (ids, copied): (Vec<i64>, Vec<(i64, i64)>) = self
            .conn
            .transaction::<(Vec<i64>, Vec<(i64, i64)>), PersistenceError, _>(|conn| {
                let source: Vec<Lesson> =
                    queries::lessons::lessons_for_semester(conn, from_semester_id)?;
                let mut ids: Vec<i64> = Vec::new();
                let mut copied: Vec<(i64, i64)> = Vec::new();
                for lesson in source {
                    let copy = Lesson {
                        id: None,
                        semester_id: to_semester_id,
                        ..lesson
                    };
                    if queries::lessons::count_duplicates(conn, &copy)? > 0 {
                        continue;
                    }
                    ids.push(mutations::lessons::insert_lesson(conn, &copy)?);
                    copied.push((copy.group_id, copy.teacher_id));
                }
                Ok((ids, copied))
            })?;

        info!(
            "Copied {} lessons from semester {from_semester_id} to semester {to_semester_id}",
            ids.len()
        );
        for (group_id, teacher_id) in copied {
            self.cache
                .evict_schedule_with_lessons(to_semester_id, group_id, teacher_id);
        }
        Ok(ids)
    }

    /// Sets the meeting link on a teacher's lessons in a semester,
    /// optionally narrowed to one subject and/or lesson type.
    ///
    /// # Returns
    ///
    /// The number of lessons updated.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn update_link_to_meeting(
        &mut self,
        semester_id: i64,
        teacher_id: i64,
        subject_id: Option<i64>,
        lesson_type: Option<LessonType>,
        link: &str,
    ) -> Result<usize, PersistenceError> {
        let ids: Vec<i64> = queries::lessons::lesson_ids_for_link_scope(
            &mut self.conn,
            semester_id,
            teacher_id,
            subject_id,
            lesson_type,
        )?;
        let updated: usize = mutations::lessons::set_link_to_meeting(&mut self.conn, &ids, link)?;
        self.cache.evict_all_schedules();
        Ok(updated)
    }

    // ========================================================================
    // Semesters
    // ========================================================================

    /// Creates a semester with its day, period and group collections.
    ///
    /// When the new semester is flagged current or default, the flag is
    /// cleared from every other semester in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `IncorrectTime` for an inverted date range or
    /// `AlreadyExists` for a duplicate (description, year) pair.
    pub fn save_semester(&mut self, semester: &Semester) -> Result<i64, PersistenceError> {
        validate_semester_dates(semester.start_date, semester.end_date)?;
        if queries::semesters::description_exists(
            &mut self.conn,
            &semester.description,
            i32::from(semester.year),
            None,
        )? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Semester",
                detail: format!("{} in year {}", semester.description, semester.year),
            }));
        }

        self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            let id: i64 = mutations::semesters::insert_semester(conn, semester)?;
            if semester.current {
                mutations::semesters::set_current(conn, id)?;
            }
            if semester.default_semester {
                mutations::semesters::set_default(conn, id)?;
            }
            Ok(id)
        })
    }

    /// Updates a semester and replaces its collections.
    ///
    /// Shrinking the day or period set is rejected while any placement
    /// still occupies a removed day or period.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` if a removed day or period is still
    /// referenced, `IncorrectTime` or `AlreadyExists` as on save, and
    /// `NotFound` if the semester does not exist.
    pub fn update_semester(&mut self, semester: &Semester) -> Result<(), PersistenceError> {
        let semester_id: i64 = semester.id.ok_or_else(|| {
            PersistenceError::Other("Semester must have an id to be updated".to_string())
        })?;
        let old: Semester = queries::semesters::semester_by_id(&mut self.conn, semester_id)?;

        validate_semester_dates(semester.start_date, semester.end_date)?;
        if queries::semesters::description_exists(
            &mut self.conn,
            &semester.description,
            i32::from(semester.year),
            Some(semester_id),
        )? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Semester",
                detail: format!("{} in year {}", semester.description, semester.year),
            }));
        }

        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            for day in &old.days {
                if !semester.days.contains(day)
                    && queries::schedules::semester_day_is_referenced(conn, semester_id, *day)?
                {
                    return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                        "Day {} still has placements in semester {semester_id}",
                        day_of_week_to_str(*day)
                    ))));
                }
            }
            for period_id in &old.period_ids {
                if !semester.period_ids.contains(period_id)
                    && queries::schedules::semester_period_is_referenced(
                        conn,
                        semester_id,
                        *period_id,
                    )?
                {
                    return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                        "Period {period_id} still has placements in semester {semester_id}"
                    ))));
                }
            }

            mutations::semesters::update_semester_row(conn, semester_id, semester)?;
            mutations::semesters::replace_collections(conn, semester_id, semester)?;
            if semester.current && !old.current {
                mutations::semesters::set_current(conn, semester_id)?;
            }
            if semester.default_semester && !old.default_semester {
                mutations::semesters::set_default(conn, semester_id)?;
            }
            Ok(())
        })?;

        self.cache.evict_all_schedules();
        Ok(())
    }

    /// Deletes a semester.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any lesson still references the
    /// semester, or `NotFound` if it does not exist.
    pub fn delete_semester(&mut self, semester_id: i64) -> Result<(), PersistenceError> {
        queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        if queries::semesters::semester_is_referenced(&mut self.conn, semester_id)? {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Semester {semester_id} still has lessons"
            ))));
        }
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            mutations::semesters::delete_semester(conn, semester_id)?;
            Ok(())
        })
    }

    /// Fetches a semester by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no semester has the id.
    pub fn get_semester_by_id(&mut self, semester_id: i64) -> Result<Semester, PersistenceError> {
        queries::semesters::semester_by_id(&mut self.conn, semester_id)
    }

    /// Lists all semesters, newest year first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn get_all_semesters(&mut self) -> Result<Vec<Semester>, PersistenceError> {
        queries::semesters::all_semesters(&mut self.conn)
    }

    /// Fetches the semester flagged current.
    ///
    /// # Errors
    ///
    /// Returns `NoCurrentSemester` if no semester carries the flag.
    pub fn get_current_semester(&mut self) -> Result<Semester, PersistenceError> {
        queries::semesters::current_semester(&mut self.conn)
    }

    /// Fetches the semester flagged default.
    ///
    /// # Errors
    ///
    /// Returns `NoDefaultSemester` if no semester carries the flag.
    pub fn get_default_semester(&mut self) -> Result<Semester, PersistenceError> {
        queries::semesters::default_semester(&mut self.conn)
    }

    /// Makes the given semester the single current one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn change_current_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Semester, PersistenceError> {
        queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            mutations::semesters::set_current(conn, semester_id)
        })?;
        queries::semesters::semester_by_id(&mut self.conn, semester_id)
    }

    /// Makes the given semester the single default one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the semester does not exist.
    pub fn change_default_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Semester, PersistenceError> {
        queries::semesters::semester_by_id(&mut self.conn, semester_id)?;
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            mutations::semesters::set_default(conn, semester_id)
        })?;
        queries::semesters::semester_by_id(&mut self.conn, semester_id)
    }

    // ========================================================================
    // Periods
    // ========================================================================

    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `IncorrectTime` for an inverted interval,
    /// `AlreadyExists` for a duplicate name, and `PeriodConflict` if
    /// the interval overlaps or is exactly adjacent to an existing
    /// period.
    pub fn save_period(&mut self, period: &Period) -> Result<i64, PersistenceError> {
        validate_period_time(period)?;
        if queries::periods::name_exists(&mut self.conn, &period.name, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Period",
                detail: period.name.clone(),
            }));
        }
        let existing: Vec<Period> = queries::periods::all_periods(&mut self.conn)?;
        validate_period_uniqueness(&existing, period)?;
        mutations::periods::insert_period(&mut self.conn, period)
    }

    /// Creates a batch of periods atomically.
    ///
    /// The batch is validated against the existing periods and against
    /// itself before anything is written.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; nothing is written in that
    /// case.
    pub fn save_periods(&mut self, batch: &[Period]) -> Result<Vec<i64>, PersistenceError> {
        let existing: Vec<Period> = queries::periods::all_periods(&mut self.conn)?;
        validate_period_batch(&existing, batch)?;
        for period in batch {
            if queries::periods::name_exists(&mut self.conn, &period.name, None)? {
                return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                    entity: "Period",
                    detail: period.name.clone(),
                }));
            }
        }
        self.conn.transaction::<Vec<i64>, PersistenceError, _>(|conn| {
            let mut ids: Vec<i64> = Vec::with_capacity(batch.len());
            for period in batch {
                ids.push(mutations::periods::insert_period(conn, period)?);
            }
            Ok(ids)
        })
    }

    /// Updates a period.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as save; the period's own row
    /// is excluded from the conflict check.
    pub fn update_period(&mut self, period: &Period) -> Result<(), PersistenceError> {
        let period_id: i64 = period.id.ok_or_else(|| {
            PersistenceError::Other("Period must have an id to be updated".to_string())
        })?;
        queries::periods::period_by_id(&mut self.conn, period_id)?;
        validate_period_time(period)?;
        if queries::periods::name_exists(&mut self.conn, &period.name, Some(period_id))? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Period",
                detail: period.name.clone(),
            }));
        }
        let existing: Vec<Period> = queries::periods::all_periods(&mut self.conn)?;
        validate_period_uniqueness(&existing, period)?;
        mutations::periods::update_period_row(&mut self.conn, period_id, period)?;
        Ok(())
    }

    /// Deletes a period.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any semester or placement still
    /// references the period, or `NotFound` if it does not exist.
    pub fn delete_period(&mut self, period_id: i64) -> Result<(), PersistenceError> {
        queries::periods::period_by_id(&mut self.conn, period_id)?;
        if queries::periods::period_in_any_semester(&mut self.conn, period_id)?
            || queries::schedules::period_is_referenced(&mut self.conn, period_id)?
        {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Period {period_id} is still in use"
            ))));
        }
        mutations::periods::delete_period(&mut self.conn, period_id)?;
        Ok(())
    }

    /// Lists all periods in start-time order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_periods(&mut self) -> Result<Vec<Period>, PersistenceError> {
        queries::periods::all_periods(&mut self.conn)
    }

    /// Fetches a period by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no period has the id.
    pub fn get_period_by_id(&mut self, period_id: i64) -> Result<Period, PersistenceError> {
        queries::periods::period_by_id(&mut self.conn, period_id)
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Creates a room at the end of the managed order.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a duplicate (name, kind) pair.
    pub fn save_room(&mut self, room: &Room) -> Result<i64, PersistenceError> {
        if queries::catalog::room_exists(&mut self.conn, &room.name, &room.kind, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Room",
                detail: format!("{} ({})", room.name, room.kind),
            }));
        }
        self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            let id: i64 = mutations::catalog::insert_room(conn, room)?;
            mutations::ordering::append_rooms_rank(conn, id)?;
            Ok(id)
        })
    }

    /// Creates a room directly after the anchor room (`None` places it
    /// first), shifting every later room down.
    ///
    /// # Errors
    ///
    /// Returns `AnchorNotFound` if the anchor does not exist, or
    /// `AlreadyExists` for a duplicate (name, kind) pair.
    pub fn save_room_after(
        &mut self,
        room: &Room,
        after_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        if queries::catalog::room_exists(&mut self.conn, &room.name, &room.kind, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Room",
                detail: format!("{} ({})", room.name, room.kind),
            }));
        }
        self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            let id: i64 = mutations::catalog::insert_room(conn, room)?;
            mutations::ordering::insert_rooms_after(conn, id, after_id)?;
            Ok(id)
        })
    }

    /// Moves a room directly after the anchor room (`None` moves it
    /// first). Anchoring a room on itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AnchorNotFound` if the anchor does not exist or
    /// `NotFound` if the moved room does not exist.
    pub fn move_room_after(
        &mut self,
        room_id: i64,
        after_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            mutations::ordering::move_rooms_after(conn, room_id, after_id)
        })
    }

    /// Updates a room's attributes; its rank is not touched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the room does not exist or
    /// `AlreadyExists` for a duplicate (name, kind) pair.
    pub fn update_room(&mut self, room: &Room) -> Result<(), PersistenceError> {
        let room_id: i64 = room.id.ok_or_else(|| {
            PersistenceError::Other("Room must have an id to be updated".to_string())
        })?;
        queries::catalog::room_by_id(&mut self.conn, room_id)?;
        if queries::catalog::room_exists(&mut self.conn, &room.name, &room.kind, Some(room_id))? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Room",
                detail: format!("{} ({})", room.name, room.kind),
            }));
        }
        mutations::catalog::update_room_row(&mut self.conn, room_id, room)?;
        self.cache.evict_all_schedules();
        Ok(())
    }

    /// Deletes a room.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any placement still references the
    /// room, or `NotFound` if it does not exist.
    pub fn delete_room(&mut self, room_id: i64) -> Result<(), PersistenceError> {
        queries::catalog::room_by_id(&mut self.conn, room_id)?;
        if queries::schedules::room_is_referenced(&mut self.conn, room_id)? {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Room {room_id} still has placements"
            ))));
        }
        mutations::catalog::delete_room(&mut self.conn, room_id)?;
        Ok(())
    }

    /// Lists all rooms in managed sort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_rooms(&mut self) -> Result<Vec<Room>, PersistenceError> {
        queries::catalog::all_rooms(&mut self.conn)
    }

    /// Fetches a room by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no room has the id.
    pub fn get_room_by_id(&mut self, room_id: i64) -> Result<Room, PersistenceError> {
        queries::catalog::room_by_id(&mut self.conn, room_id)
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Creates a group at the end of the managed order.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a duplicate title.
    pub fn save_group(&mut self, group: &Group) -> Result<i64, PersistenceError> {
        if queries::catalog::group_title_exists(&mut self.conn, &group.title, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Group",
                detail: group.title.clone(),
            }));
        }
        self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            let id: i64 = mutations::catalog::insert_group(conn, group)?;
            mutations::ordering::append_groups_rank(conn, id)?;
            Ok(id)
        })
    }

    /// Creates a group directly after the anchor group (`None` places
    /// it first), shifting every later group down.
    ///
    /// # Errors
    ///
    /// Returns `AnchorNotFound` if the anchor does not exist, or
    /// `AlreadyExists` for a duplicate title.
    pub fn save_group_after(
        &mut self,
        group: &Group,
        after_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        if queries::catalog::group_title_exists(&mut self.conn, &group.title, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Group",
                detail: group.title.clone(),
            }));
        }
        self.conn.transaction::<i64, PersistenceError, _>(|conn| {
            let id: i64 = mutations::catalog::insert_group(conn, group)?;
            mutations::ordering::insert_groups_after(conn, id, after_id)?;
            Ok(id)
        })
    }

    /// Moves a group directly after the anchor group (`None` moves it
    /// first). Anchoring a group on itself is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AnchorNotFound` if the anchor does not exist or
    /// `NotFound` if the moved group does not exist.
    pub fn move_group_after(
        &mut self,
        group_id: i64,
        after_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            mutations::ordering::move_groups_after(conn, group_id, after_id)
        })
    }

    /// Updates a group's attributes; its rank is not touched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the group does not exist or
    /// `AlreadyExists` for a duplicate title.
    pub fn update_group(&mut self, group: &Group) -> Result<(), PersistenceError> {
        let group_id: i64 = group.id.ok_or_else(|| {
            PersistenceError::Other("Group must have an id to be updated".to_string())
        })?;
        queries::catalog::group_by_id(&mut self.conn, group_id)?;
        if queries::catalog::group_title_exists(&mut self.conn, &group.title, Some(group_id))? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Group",
                detail: group.title.clone(),
            }));
        }
        mutations::catalog::update_group_row(&mut self.conn, group_id, group)?;
        self.cache.evict_all_schedules();
        Ok(())
    }

    /// Deletes a group and its semester enrollments.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any lesson still references the
    /// group, or `NotFound` if it does not exist.
    pub fn delete_group(&mut self, group_id: i64) -> Result<(), PersistenceError> {
        queries::catalog::group_by_id(&mut self.conn, group_id)?;
        if queries::catalog::group_is_referenced(&mut self.conn, group_id)? {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Group {group_id} still has lessons"
            ))));
        }
        self.conn.transaction::<(), PersistenceError, _>(|conn| {
            diesel::delete(
                diesel_schema::semester_groups::table
                    .filter(diesel_schema::semester_groups::group_id.eq(group_id)),
            )
            .execute(conn)?;
            mutations::catalog::delete_group(conn, group_id)?;
            Ok(())
        })
    }

    /// Lists all groups in managed sort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_groups(&mut self) -> Result<Vec<Group>, PersistenceError> {
        queries::catalog::all_groups(&mut self.conn)
    }

    /// Lists the groups enrolled in a semester, in managed sort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn groups_for_semester(
        &mut self,
        semester_id: i64,
    ) -> Result<Vec<Group>, PersistenceError> {
        queries::catalog::groups_for_semester(&mut self.conn, semester_id)
    }

    /// Fetches a group by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no group has the id.
    pub fn get_group_by_id(&mut self, group_id: i64) -> Result<Group, PersistenceError> {
        queries::catalog::group_by_id(&mut self.conn, group_id)
    }

    // ========================================================================
    // Teachers
    // ========================================================================

    /// Creates a teacher.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn save_teacher(&mut self, teacher: &Teacher) -> Result<i64, PersistenceError> {
        mutations::catalog::insert_teacher(&mut self.conn, teacher)
    }

    /// Updates a teacher.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the teacher does not exist.
    pub fn update_teacher(&mut self, teacher: &Teacher) -> Result<(), PersistenceError> {
        let teacher_id: i64 = teacher.id.ok_or_else(|| {
            PersistenceError::Other("Teacher must have an id to be updated".to_string())
        })?;
        queries::catalog::teacher_by_id(&mut self.conn, teacher_id)?;
        mutations::catalog::update_teacher_row(&mut self.conn, teacher_id, teacher)?;
        self.cache.evict_all_schedules();
        Ok(())
    }

    /// Deletes a teacher.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any lesson still references the
    /// teacher, or `NotFound` if it does not exist.
    pub fn delete_teacher(&mut self, teacher_id: i64) -> Result<(), PersistenceError> {
        queries::catalog::teacher_by_id(&mut self.conn, teacher_id)?;
        if queries::catalog::teacher_is_referenced(&mut self.conn, teacher_id)? {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Teacher {teacher_id} still has lessons"
            ))));
        }
        mutations::catalog::delete_teacher(&mut self.conn, teacher_id)?;
        Ok(())
    }

    /// Lists all teachers, ordered by surname.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_teachers(&mut self) -> Result<Vec<Teacher>, PersistenceError> {
        queries::catalog::all_teachers(&mut self.conn)
    }

    /// Fetches a teacher by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no teacher has the id.
    pub fn get_teacher_by_id(&mut self, teacher_id: i64) -> Result<Teacher, PersistenceError> {
        queries::catalog::teacher_by_id(&mut self.conn, teacher_id)
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Creates a subject.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a duplicate name.
    pub fn save_subject(&mut self, subject: &Subject) -> Result<i64, PersistenceError> {
        if queries::catalog::subject_name_exists(&mut self.conn, &subject.name, None)? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Subject",
                detail: subject.name.clone(),
            }));
        }
        mutations::catalog::insert_subject(&mut self.conn, subject)
    }

    /// Updates a subject.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the subject does not exist or
    /// `AlreadyExists` for a duplicate name.
    pub fn update_subject(&mut self, subject: &Subject) -> Result<(), PersistenceError> {
        let subject_id: i64 = subject.id.ok_or_else(|| {
            PersistenceError::Other("Subject must have an id to be updated".to_string())
        })?;
        queries::catalog::subject_by_id(&mut self.conn, subject_id)?;
        if queries::catalog::subject_name_exists(&mut self.conn, &subject.name, Some(subject_id))? {
            return Err(PersistenceError::Domain(DomainError::AlreadyExists {
                entity: "Subject",
                detail: subject.name.clone(),
            }));
        }
        mutations::catalog::update_subject_row(&mut self.conn, subject_id, subject)?;
        self.cache.evict_all_schedules();
        Ok(())
    }

    /// Deletes a subject.
    ///
    /// # Errors
    ///
    /// Returns `UsedEntity` while any lesson still references the
    /// subject, or `NotFound` if it does not exist.
    pub fn delete_subject(&mut self, subject_id: i64) -> Result<(), PersistenceError> {
        queries::catalog::subject_by_id(&mut self.conn, subject_id)?;
        if queries::catalog::subject_is_referenced(&mut self.conn, subject_id)? {
            return Err(PersistenceError::Domain(DomainError::UsedEntity(format!(
                "Subject {subject_id} still has lessons"
            ))));
        }
        mutations::catalog::delete_subject(&mut self.conn, subject_id)?;
        Ok(())
    }

    /// Lists all subjects, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all_subjects(&mut self) -> Result<Vec<Subject>, PersistenceError> {
        queries::catalog::all_subjects(&mut self.conn)
    }

    /// Fetches a subject by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no subject has the id.
    pub fn get_subject_by_id(&mut self, subject_id: i64) -> Result<Subject, PersistenceError> {
        queries::catalog::subject_by_id(&mut self.conn, subject_id)
    }
}
