// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod conflict_tests;
mod placement_tests;
mod view_tests;

use crate::{PlacedLesson, ScheduleEntry};
use timetable_domain::{LessonType, WeekParity};
use time::Weekday;

pub fn create_test_entry(
    schedule_id: i64,
    day: Weekday,
    period_id: i64,
    parity: WeekParity,
) -> ScheduleEntry {
    ScheduleEntry {
        day,
        period_id,
        parity,
        lesson: PlacedLesson {
            schedule_id,
            lesson_id: schedule_id + 100,
            title: format!("Lesson {schedule_id}"),
            lesson_type: LessonType::Lecture,
            teacher_surname: String::from("Petrenko"),
            group_title: String::from("G-41"),
            room_name: String::from("Room 1"),
            link_to_meeting: None,
        },
    }
}
