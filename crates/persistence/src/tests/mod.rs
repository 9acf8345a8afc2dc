// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod catalog_tests;
mod lesson_tests;
mod ordering_tests;

use crate::Persistence;
use time::{Date, Month, Time, Weekday};
use timetable_domain::{
    Group, Lesson, LessonType, Period, Placement, Room, Semester, Subject, Teacher, WeekParity,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_period(name: &str, start_hour: u8, end_hour: u8) -> Period {
    Period {
        id: None,
        name: String::from(name),
        start_time: Time::from_hms(start_hour, 0, 0).unwrap(),
        end_time: Time::from_hms(end_hour, 0, 0).unwrap(),
    }
}

pub fn create_test_room(name: &str) -> Room {
    Room {
        id: None,
        name: String::from(name),
        kind: String::from("Lecture hall"),
        disabled: false,
        sort_order: None,
    }
}

pub fn create_test_group(title: &str) -> Group {
    Group {
        id: None,
        title: String::from(title),
        disabled: false,
        sort_order: None,
    }
}

pub fn create_test_teacher(surname: &str) -> Teacher {
    Teacher {
        id: None,
        surname: String::from(surname),
        name: String::from("Olha"),
        patronymic: String::from("Petrivna"),
        position: String::from("Lecturer"),
        disabled: false,
    }
}

pub fn create_test_subject(name: &str) -> Subject {
    Subject {
        id: None,
        name: String::from(name),
        disabled: false,
    }
}

/// Creates a five-day fall semester for 2026 over the given periods and
/// groups. September 1, 2026 is a Tuesday; the range ends December 20.
pub fn create_test_semester(description: &str, period_ids: Vec<i64>, group_ids: Vec<i64>) -> Semester {
    Semester {
        id: None,
        description: String::from(description),
        year: 2026,
        start_date: Date::from_calendar_date(2026, Month::September, 1).unwrap(),
        end_date: Date::from_calendar_date(2026, Month::December, 20).unwrap(),
        current: false,
        default_semester: false,
        disabled: false,
        days: vec![
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ],
        period_ids,
        group_ids,
    }
}

/// Ids of a fully seeded campus: two periods, one of each catalog
/// entity and a five-day semester enrolling the group.
pub struct Campus {
    pub semester_id: i64,
    pub period_ids: Vec<i64>,
    pub room_id: i64,
    pub group_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
}

/// Seeds the minimal fixture most placement tests start from.
pub fn seed_campus(persistence: &mut Persistence) -> Campus {
    let first: i64 = persistence
        .save_period(&create_test_period("1st period", 8, 9))
        .unwrap();
    let second: i64 = persistence
        .save_period(&create_test_period("2nd period", 10, 11))
        .unwrap();
    let room_id: i64 = persistence.save_room(&create_test_room("Room 101")).unwrap();
    let group_id: i64 = persistence.save_group(&create_test_group("CS-21")).unwrap();
    let teacher_id: i64 = persistence
        .save_teacher(&create_test_teacher("Ivanenko"))
        .unwrap();
    let subject_id: i64 = persistence
        .save_subject(&create_test_subject("Algebra"))
        .unwrap();
    let semester_id: i64 = persistence
        .save_semester(&create_test_semester(
            "Fall",
            vec![first, second],
            vec![group_id],
        ))
        .unwrap();
    Campus {
        semester_id,
        period_ids: vec![first, second],
        room_id,
        group_id,
        teacher_id,
        subject_id,
    }
}

pub fn create_test_lesson(campus: &Campus) -> Lesson {
    Lesson {
        id: None,
        subject_id: campus.subject_id,
        teacher_id: campus.teacher_id,
        group_id: campus.group_id,
        semester_id: campus.semester_id,
        hours: 2,
        lesson_type: LessonType::Lecture,
        title: String::from("Algebra"),
        link_to_meeting: None,
        grouped: false,
    }
}

pub fn create_test_placement(
    lesson_id: i64,
    room_id: i64,
    period_id: i64,
    day: Weekday,
    parity: WeekParity,
) -> Placement {
    Placement {
        id: None,
        lesson_id,
        room_id,
        period_id,
        day,
        parity,
    }
}
