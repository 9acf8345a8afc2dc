// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::expand_for_siblings;
use time::Weekday;
use timetable_domain::{Lesson, LessonType, Placement, WeekParity};

fn create_test_lesson(id: Option<i64>, group_id: i64) -> Lesson {
    Lesson {
        id,
        subject_id: 5,
        teacher_id: 7,
        group_id,
        semester_id: 1,
        hours: 32,
        lesson_type: LessonType::Lecture,
        title: String::from("Algorithms"),
        link_to_meeting: None,
        grouped: true,
    }
}

fn create_test_placement() -> Placement {
    Placement {
        id: Some(900),
        lesson_id: 11,
        room_id: 3,
        period_id: 2,
        day: Weekday::Tuesday,
        parity: WeekParity::Even,
    }
}

#[test]
fn one_placement_per_sibling_in_the_same_slot() {
    let base: Placement = create_test_placement();
    let siblings: Vec<Lesson> = vec![
        create_test_lesson(Some(12), 41),
        create_test_lesson(Some(13), 42),
    ];

    let expanded: Vec<Placement> = expand_for_siblings(&base, &siblings);
    assert_eq!(expanded.len(), 2);
    for (placement, sibling) in expanded.iter().zip(&siblings) {
        assert_eq!(placement.id, None);
        assert_eq!(Some(placement.lesson_id), sibling.id);
        assert_eq!(placement.room_id, base.room_id);
        assert_eq!(placement.period_id, base.period_id);
        assert_eq!(placement.day, base.day);
        assert_eq!(placement.parity, base.parity);
    }
}

#[test]
fn unsaved_siblings_are_skipped() {
    let base: Placement = create_test_placement();
    let siblings: Vec<Lesson> = vec![
        create_test_lesson(None, 41),
        create_test_lesson(Some(13), 42),
    ];

    let expanded: Vec<Placement> = expand_for_siblings(&base, &siblings);
    assert_eq!(expanded.len(), 1);
    assert_eq!(expanded[0].lesson_id, 13);
}

#[test]
fn no_siblings_means_no_extra_placements() {
    let base: Placement = create_test_placement();
    let expanded: Vec<Placement> = expand_for_siblings(&base, &[]);
    assert!(expanded.is_empty());
}
