// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    Campus, create_test_group, create_test_lesson, create_test_persistence, create_test_semester,
    create_test_subject, create_test_teacher, seed_campus,
};
use crate::{Persistence, PersistenceError};
use timetable_domain::{DomainError, Group, Subject, Teacher};

#[test]
fn test_teacher_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = persistence
        .save_teacher(&create_test_teacher("Kovalenko"))
        .unwrap();

    let mut teacher: Teacher = persistence.get_teacher_by_id(id).unwrap();
    assert_eq!(teacher.surname, "Kovalenko");

    teacher.position = String::from("Professor");
    persistence.update_teacher(&teacher).unwrap();
    let stored: Teacher = persistence.get_teacher_by_id(id).unwrap();
    assert_eq!(stored.position, "Professor");

    persistence.delete_teacher(id).unwrap();
    assert!(matches!(
        persistence.get_teacher_by_id(id),
        Err(PersistenceError::Domain(DomainError::NotFound {
            entity: "Teacher",
            ..
        }))
    ));
}

#[test]
fn test_teachers_listed_by_surname() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .save_teacher(&create_test_teacher("Shevchenko"))
        .unwrap();
    persistence
        .save_teacher(&create_test_teacher("Bondarenko"))
        .unwrap();

    let surnames: Vec<String> = persistence
        .get_all_teachers()
        .unwrap()
        .into_iter()
        .map(|teacher| teacher.surname)
        .collect();
    assert_eq!(surnames, vec!["Bondarenko", "Shevchenko"]);
}

#[test]
fn test_delete_teacher_with_lessons_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let result: Result<(), PersistenceError> = persistence.delete_teacher(campus.teacher_id);
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::UsedEntity(_)))
    ));
}

#[test]
fn test_duplicate_subject_name_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = persistence
        .save_subject(&create_test_subject("History"))
        .unwrap();

    let result: Result<i64, PersistenceError> =
        persistence.save_subject(&create_test_subject("History"));
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AlreadyExists {
            entity: "Subject",
            ..
        }))
    ));

    // Renaming onto another subject's name is rejected the same way.
    persistence
        .save_subject(&create_test_subject("Geography"))
        .unwrap();
    let mut subject: Subject = persistence.get_subject_by_id(id).unwrap();
    subject.name = String::from("Geography");
    let result: Result<(), PersistenceError> = persistence.update_subject(&subject);
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AlreadyExists {
            entity: "Subject",
            ..
        }))
    ));
}

#[test]
fn test_delete_subject_with_lessons_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let lesson_id: i64 = persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let result: Result<(), PersistenceError> = persistence.delete_subject(campus.subject_id);
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::UsedEntity(_)))
    ));

    persistence.delete_lesson(lesson_id).unwrap();
    persistence.delete_subject(campus.subject_id).unwrap();
}

#[test]
fn test_delete_group_with_lessons_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    persistence.save_lesson(&create_test_lesson(&campus)).unwrap();

    let result: Result<(), PersistenceError> = persistence.delete_group(campus.group_id);
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::UsedEntity(_)))
    ));
}

#[test]
fn test_delete_enrolled_group_without_lessons() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);

    // Enrollment in a semester alone does not block deletion; the
    // enrollment rows go with the group.
    persistence.delete_group(campus.group_id).unwrap();
    assert!(persistence.get_group_by_id(campus.group_id).is_err());
    assert!(
        persistence
            .groups_for_semester(campus.semester_id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_groups_for_semester_filters_enrollment() {
    let mut persistence: Persistence = create_test_persistence();
    let campus: Campus = seed_campus(&mut persistence);
    let outsider: i64 = persistence.save_group(&create_test_group("FI-31")).unwrap();

    let enrolled: Vec<Group> = persistence.groups_for_semester(campus.semester_id).unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, Some(campus.group_id));
    assert!(enrolled.iter().all(|group| group.id != Some(outsider)));
}

#[test]
fn test_groups_for_semester_in_managed_order() {
    let mut persistence: Persistence = create_test_persistence();
    let first: i64 = persistence.save_group(&create_test_group("IN-11")).unwrap();
    let second: i64 = persistence.save_group(&create_test_group("IN-12")).unwrap();
    let period_id: i64 = persistence
        .save_period(&crate::tests::create_test_period("1st period", 8, 9))
        .unwrap();
    let semester_id: i64 = persistence
        .save_semester(&create_test_semester(
            "Fall",
            vec![period_id],
            vec![first, second],
        ))
        .unwrap();

    persistence.move_group_after(first, Some(second)).unwrap();
    let enrolled: Vec<Group> = persistence.groups_for_semester(semester_id).unwrap();
    assert_eq!(enrolled[0].id, Some(second));
    assert_eq!(enrolled[1].id, Some(first));
}

#[test]
fn test_missing_catalog_rows_report_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(matches!(
        persistence.get_room_by_id(42),
        Err(PersistenceError::Domain(DomainError::NotFound {
            entity: "Room",
            id: 42,
        }))
    ));
    assert!(matches!(
        persistence.get_group_by_id(42),
        Err(PersistenceError::Domain(DomainError::NotFound {
            entity: "Group",
            ..
        }))
    ));
    assert!(matches!(
        persistence.get_subject_by_id(42),
        Err(PersistenceError::Domain(DomainError::NotFound {
            entity: "Subject",
            ..
        }))
    ));
}
