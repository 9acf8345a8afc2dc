// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    Campus, create_test_group, create_test_lesson, create_test_persistence, create_test_placement,
    create_test_semester, create_test_subject, create_test_teacher, seed_campus,
};
use crate::{Persistence, PersistenceError};
use time::Weekday;
use timetable_domain::{DomainError, Lesson, LessonType, WeekParity};

#[test]
fn test_duplicate_lesson_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let result: Result<i64, PersistenceError> =
        persistence.save_lesson(&create_test_lesson(&campus));
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AlreadyExists {
            entity: "Lesson",
            ..
        }))
    ));

    // A different lesson type is a different lesson.
    persistence
        .save_lesson(&Lesson {
            lesson_type: LessonType::Practical,
            ..create_test_lesson(&campus)
        })
        .unwrap();
}

#[test]
fn test_update_lesson_changes_row() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let mut lesson: Lesson = persistence.get_lesson_by_id(lesson_id).unwrap();
    lesson.hours = 4;
    lesson.title = String::from("Advanced Algebra");
    persistence.update_lesson(&lesson).unwrap();

    let stored: Lesson = persistence.get_lesson_by_id(lesson_id).unwrap();
    assert_eq!(stored.hours, 4);
    assert_eq!(stored.title, "Advanced Algebra");
}

#[test]
fn test_grouped_update_rewrites_siblings() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let other_group: i64 = persistence.save_group(&create_test_group("CS-22")).unwrap();
    let ids: Vec<i64> = persistence
        .save_grouped_lessons(&create_test_lesson(&campus), &[campus.group_id, other_group])
        .unwrap();

    let mut edited: Lesson = persistence.get_lesson_by_id(ids[0]).unwrap();
    edited.hours = 6;
    edited.title = String::from("Algebra II");
    persistence.update_lesson(&edited).unwrap();

    // The sibling picked up the shared attributes but kept its own group.
    let sibling: Lesson = persistence.get_lesson_by_id(ids[1]).unwrap();
    assert_eq!(sibling.hours, 6);
    assert_eq!(sibling.title, "Algebra II");
    assert_eq!(sibling.group_id, other_group);
    assert!(sibling.grouped);
}

#[test]
fn test_grouped_update_widens_scope_when_teacher_changes() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let other_group: i64 = persistence.save_group(&create_test_group("CS-22")).unwrap();
    let ids: Vec<i64> = persistence
        .save_grouped_lessons(&create_test_lesson(&campus), &[campus.group_id, other_group])
        .unwrap();

    let new_teacher: i64 = persistence
        .save_teacher(&create_test_teacher("Shevchenko"))
        .unwrap();
    let mut edited: Lesson = persistence.get_lesson_by_id(ids[0]).unwrap();
    edited.teacher_id = new_teacher;
    persistence.update_lesson(&edited).unwrap();

    // The narrow six-column key no longer matches after the first row is
    // rewritten; the wide scope still reaches every sibling.
    let first: Lesson = persistence.get_lesson_by_id(ids[0]).unwrap();
    let second: Lesson = persistence.get_lesson_by_id(ids[1]).unwrap();
    assert_eq!(first.teacher_id, new_teacher);
    assert_eq!(second.teacher_id, new_teacher);
}

#[test]
fn test_newly_grouped_lesson_is_flipped_before_rewrite() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let mut edited: Lesson = persistence.get_lesson_by_id(lesson_id).unwrap();
    edited.grouped = true;
    edited.hours = 8;
    persistence.update_lesson(&edited).unwrap();

    let stored: Lesson = persistence.get_lesson_by_id(lesson_id).unwrap();
    assert!(stored.grouped);
    assert_eq!(stored.hours, 8);
}

#[test]
fn test_delete_grouped_lesson_removes_set_and_placements() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let other_group: i64 = persistence.save_group(&create_test_group("CS-22")).unwrap();
    let ids: Vec<i64> = persistence
        .save_grouped_lessons(&create_test_lesson(&campus), &[campus.group_id, other_group])
        .unwrap();
    let schedule_ids: Vec<i64> = persistence
        .save_schedule(&create_test_placement(
            ids[0],
            campus.room_id,
            campus.period_ids[0],
            Weekday::Monday,
            WeekParity::Weekly,
        ))
        .unwrap();

    let deleted: usize = persistence.delete_lesson(ids[0]).unwrap();
    assert_eq!(deleted, 2);
    assert!(persistence.get_lesson_by_id(ids[1]).is_err());
    for schedule_id in schedule_ids {
        assert!(persistence.get_schedule_by_id(schedule_id).is_err());
    }
}

#[test]
fn test_copy_lessons_skips_duplicates() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let target_semester: i64 = persistence
        .save_semester(&create_test_semester(
            "Spring",
            campus.period_ids.clone(),
            vec![campus.group_id],
        ))
        .unwrap();

    let copied: Vec<i64> = persistence
        .copy_lessons_to_semester(campus.semester_id, target_semester)
        .unwrap();
    assert_eq!(copied.len(), 1);

    let stored: Lesson = persistence.get_lesson_by_id(copied[0]).unwrap();
    assert_eq!(stored.semester_id, target_semester);

    // A second copy finds nothing left to carry over.
    let copied_again: Vec<i64> = persistence
        .copy_lessons_to_semester(campus.semester_id, target_semester)
        .unwrap();
    assert!(copied_again.is_empty());
}

#[test]
fn test_update_link_to_meeting_scoped_by_subject() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let algebra_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let physics_subject: i64 = persistence
        .save_subject(&create_test_subject("Physics"))
        .unwrap();
    let physics_id: i64 = persistence
        .save_lesson(&Lesson {
            subject_id: physics_subject,
            title: String::from("Physics"),
            ..create_test_lesson(&campus)
        })
        .unwrap();

    let updated: usize = persistence
        .update_link_to_meeting(
            campus.semester_id,
            campus.teacher_id,
            Some(campus.subject_id),
            None,
            "https://meet.example.com/algebra",
        )
        .unwrap();
    assert_eq!(updated, 1);

    let algebra: Lesson = persistence.get_lesson_by_id(algebra_id).unwrap();
    let physics: Lesson = persistence.get_lesson_by_id(physics_id).unwrap();
    assert_eq!(
        algebra.link_to_meeting.as_deref(),
        Some("https://meet.example.com/algebra")
    );
    assert!(physics.link_to_meeting.is_none());
}

#[test]
fn test_update_link_to_meeting_for_whole_teacher() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    persistence.save_lesson(&create_test_lesson(&campus)).unwrap();
    persistence
        .save_lesson(&Lesson {
            lesson_type: LessonType::Practical,
            ..create_test_lesson(&campus)
        })
        .unwrap();

    let other_teacher: i64 = persistence
        .save_teacher(&create_test_teacher("Shevchenko"))
        .unwrap();
    persistence
        .save_lesson(&Lesson {
            teacher_id: other_teacher,
            ..create_test_lesson(&campus)
        })
        .unwrap();

    let updated: usize = persistence
        .update_link_to_meeting(
            campus.semester_id,
            campus.teacher_id,
            None,
            None,
            "https://meet.example.com/all",
        )
        .unwrap();
    assert_eq!(updated, 2);
}

#[test]
fn test_lessons_for_group_and_teacher() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let by_group: Vec<Lesson> = persistence
        .lessons_for_group(campus.semester_id, campus.group_id)
        .unwrap();
    assert_eq!(by_group.len(), 1);
    assert_eq!(by_group[0].id, Some(lesson_id));

    let by_teacher: Vec<Lesson> = persistence
        .lessons_for_teacher(campus.semester_id, campus.teacher_id)
        .unwrap();
    assert_eq!(by_teacher.len(), 1);

    let by_other_teacher: Vec<Lesson> = persistence
        .lessons_for_teacher(campus.semester_id, campus.teacher_id + 1)
        .unwrap();
    assert!(by_other_teacher.is_empty());
}

#[test]
fn test_delete_lessons_by_semester_removes_placements() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();
    let ids: Vec<i64> = persistence
        .save_schedule(&create_test_placement(
            lesson_id,
            campus.room_id,
            campus.period_ids[0],
            Weekday::Monday,
            WeekParity::Weekly,
        ))
        .unwrap();

    let deleted: usize = persistence
        .delete_lessons_by_semester(campus.semester_id)
        .unwrap();
    assert_eq!(deleted, 1);

    let lessons: Vec<Lesson> = persistence.lessons_for_semester(campus.semester_id).unwrap();
    assert!(lessons.is_empty());
    assert!(persistence.get_schedule_by_id(ids[0]).is_err());
}

#[test]
fn test_empty_lesson_title_defaults_to_subject_name() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence
        .save_lesson(&Lesson {
            title: String::new(),
            ..create_test_lesson(&campus)
        })
        .unwrap();

    let stored: Lesson = persistence.get_lesson_by_id(lesson_id).unwrap();
    assert_eq!(stored.title, "Algebra");
}
