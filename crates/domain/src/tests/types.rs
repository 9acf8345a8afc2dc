// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Lesson, LessonType, SiblingKey, WeekParity, day_of_week_from_str,
    day_of_week_to_str, day_order,
};
use std::str::FromStr;
use time::Weekday;

fn create_test_lesson() -> Lesson {
    Lesson {
        id: Some(1),
        subject_id: 10,
        teacher_id: 20,
        group_id: 30,
        semester_id: 40,
        hours: 2,
        lesson_type: LessonType::Lecture,
        title: String::from("Calculus I"),
        link_to_meeting: None,
        grouped: true,
    }
}

#[test]
fn test_weekly_parity_overlaps_every_parity() {
    assert!(WeekParity::Weekly.overlaps(WeekParity::Even));
    assert!(WeekParity::Weekly.overlaps(WeekParity::Odd));
    assert!(WeekParity::Weekly.overlaps(WeekParity::Weekly));
    assert!(WeekParity::Even.overlaps(WeekParity::Weekly));
    assert!(WeekParity::Odd.overlaps(WeekParity::Weekly));
}

#[test]
fn test_even_and_odd_never_overlap() {
    assert!(!WeekParity::Even.overlaps(WeekParity::Odd));
    assert!(!WeekParity::Odd.overlaps(WeekParity::Even));
}

#[test]
fn test_same_parity_overlaps_itself() {
    assert!(WeekParity::Even.overlaps(WeekParity::Even));
    assert!(WeekParity::Odd.overlaps(WeekParity::Odd));
}

#[test]
fn test_week_parity_round_trips_through_str() {
    for parity in [WeekParity::Even, WeekParity::Odd, WeekParity::Weekly] {
        let parsed: WeekParity = WeekParity::from_str(parity.as_str()).unwrap();
        assert_eq!(parsed, parity);
    }
}

#[test]
fn test_week_parity_rejects_unknown_value() {
    let result = WeekParity::from_str("BIWEEKLY");
    assert_eq!(
        result,
        Err(DomainError::InvalidParity(String::from("BIWEEKLY")))
    );
}

#[test]
fn test_lesson_type_round_trips_through_str() {
    for lesson_type in LessonType::all() {
        let parsed: LessonType = LessonType::from_str(lesson_type.as_str()).unwrap();
        assert_eq!(parsed, lesson_type);
    }
}

#[test]
fn test_day_of_week_round_trips_through_str() {
    for day in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ] {
        let parsed: Weekday = day_of_week_from_str(day_of_week_to_str(day)).unwrap();
        assert_eq!(parsed, day);
    }
}

#[test]
fn test_day_order_places_monday_first() {
    assert_eq!(day_order(Weekday::Monday), 0);
    assert!(day_order(Weekday::Monday) < day_order(Weekday::Friday));
    assert_eq!(day_order(Weekday::Sunday), 6);
}

#[test]
fn test_sibling_key_matches_identical_grouped_lesson() {
    let lesson: Lesson = create_test_lesson();
    let key: SiblingKey = SiblingKey::from_lesson(&lesson);

    let mut sibling: Lesson = lesson.clone();
    sibling.id = Some(2);
    sibling.group_id = 31;

    assert!(key.matches(&sibling));
}

#[test]
fn test_sibling_key_rejects_non_grouped_lesson() {
    let lesson: Lesson = create_test_lesson();
    let key: SiblingKey = SiblingKey::from_lesson(&lesson);

    let mut other: Lesson = lesson.clone();
    other.grouped = false;

    assert!(!key.matches(&other));
}

#[test]
fn test_sibling_key_rejects_different_title() {
    let lesson: Lesson = create_test_lesson();
    let key: SiblingKey = SiblingKey::from_lesson(&lesson);

    let mut other: Lesson = lesson.clone();
    other.title = String::from("Calculus II");

    assert!(!key.matches(&other));
}

#[test]
fn test_sibling_key_rejects_different_hours() {
    let lesson: Lesson = create_test_lesson();
    let key: SiblingKey = SiblingKey::from_lesson(&lesson);

    let mut other: Lesson = lesson.clone();
    other.hours = 4;

    assert!(!key.matches(&other));
}
