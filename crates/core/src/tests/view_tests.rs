// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_entry;
use crate::{DaySchedule, ScheduleEntry, assemble_week, occurs_on, parity_for_date};
use time::{Date, Month, Weekday};
use timetable_domain::WeekParity;

#[test]
fn grid_is_rectangular_even_when_empty() {
    let days: Vec<Weekday> = vec![Weekday::Monday, Weekday::Wednesday];
    let period_ids: Vec<i64> = vec![1, 2, 3];

    let week: Vec<DaySchedule> = assemble_week(&[], &days, &period_ids);
    assert_eq!(week.len(), 2);
    for day in &week {
        assert_eq!(day.periods.len(), 3);
        for cell in &day.periods {
            assert!(cell.cell.even.is_none());
            assert!(cell.cell.odd.is_none());
        }
    }
}

#[test]
fn days_come_out_in_week_order() {
    let days: Vec<Weekday> = vec![Weekday::Friday, Weekday::Monday, Weekday::Wednesday];
    let week: Vec<DaySchedule> = assemble_week(&[], &days, &[1]);
    let order: Vec<Weekday> = week.iter().map(|day| day.day).collect();
    assert_eq!(
        order,
        vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
    );
}

#[test]
fn weekly_entry_fills_both_parity_cells() {
    let entries: Vec<ScheduleEntry> =
        vec![create_test_entry(1, Weekday::Monday, 1, WeekParity::Weekly)];
    let week: Vec<DaySchedule> =
        assemble_week(&entries, &[Weekday::Monday], &[1]);

    let cell = &week[0].periods[0].cell;
    assert_eq!(cell.even.as_ref().unwrap().schedule_id, 1);
    assert_eq!(cell.odd.as_ref().unwrap().schedule_id, 1);
}

#[test]
fn exact_parity_beats_the_weekly_fallback() {
    let entries: Vec<ScheduleEntry> = vec![
        create_test_entry(1, Weekday::Monday, 1, WeekParity::Weekly),
        create_test_entry(2, Weekday::Monday, 1, WeekParity::Even),
    ];
    let week: Vec<DaySchedule> =
        assemble_week(&entries, &[Weekday::Monday], &[1]);

    let cell = &week[0].periods[0].cell;
    assert_eq!(cell.even.as_ref().unwrap().schedule_id, 2);
    assert_eq!(cell.odd.as_ref().unwrap().schedule_id, 1);
}

#[test]
fn entries_land_in_their_own_day_and_period() {
    let entries: Vec<ScheduleEntry> = vec![
        create_test_entry(1, Weekday::Monday, 1, WeekParity::Odd),
        create_test_entry(2, Weekday::Tuesday, 2, WeekParity::Even),
    ];
    let week: Vec<DaySchedule> = assemble_week(
        &entries,
        &[Weekday::Monday, Weekday::Tuesday],
        &[1, 2],
    );

    assert!(week[0].periods[0].cell.odd.is_some());
    assert!(week[0].periods[0].cell.even.is_none());
    assert!(week[0].periods[1].cell.odd.is_none());
    assert!(week[1].periods[1].cell.even.is_some());
    assert!(week[1].periods[0].cell.even.is_none());
}

#[test]
fn adjacent_weeks_alternate_parity() {
    // 2026-01-05 is a Monday in ISO week 2.
    let monday: Date = Date::from_calendar_date(2026, Month::January, 5).unwrap();
    let next_monday: Date = Date::from_calendar_date(2026, Month::January, 12).unwrap();
    assert_eq!(parity_for_date(monday), WeekParity::Even);
    assert_eq!(parity_for_date(next_monday), WeekParity::Odd);
}

#[test]
fn weekly_placements_occur_on_every_date() {
    let monday: Date = Date::from_calendar_date(2026, Month::January, 5).unwrap();
    let next_monday: Date = Date::from_calendar_date(2026, Month::January, 12).unwrap();
    assert!(occurs_on(WeekParity::Weekly, monday));
    assert!(occurs_on(WeekParity::Weekly, next_monday));
    assert!(occurs_on(WeekParity::Even, monday));
    assert!(!occurs_on(WeekParity::Even, next_monday));
}

#[test]
fn duplicate_days_are_collapsed() {
    let days: Vec<Weekday> = vec![Weekday::Monday, Weekday::Monday];
    let week: Vec<DaySchedule> = assemble_week(&[], &days, &[1]);
    assert_eq!(week.len(), 1);
}
