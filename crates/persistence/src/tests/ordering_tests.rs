// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_group, create_test_persistence, create_test_room};
use crate::{Persistence, PersistenceError};
use timetable_domain::{DomainError, Group, Room};

fn room_names(persistence: &mut Persistence) -> Vec<String> {
    persistence
        .get_all_rooms()
        .unwrap()
        .into_iter()
        .map(|room| room.name)
        .collect()
}

#[test]
fn test_rooms_append_in_save_order() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_room(&create_test_room("A")).unwrap();
    persistence.save_room(&create_test_room("B")).unwrap();
    persistence.save_room(&create_test_room("C")).unwrap();

    assert_eq!(room_names(&mut persistence), vec!["A", "B", "C"]);
    let rooms: Vec<Room> = persistence.get_all_rooms().unwrap();
    assert_eq!(
        rooms.iter().map(|r| r.sort_order).collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(3)]
    );
}

#[test]
fn test_save_room_after_anchor_shifts_later_rooms() {
    let mut persistence: Persistence = create_test_persistence();
    let a: i64 = persistence.save_room(&create_test_room("A")).unwrap();
    persistence.save_room(&create_test_room("B")).unwrap();
    persistence.save_room(&create_test_room("C")).unwrap();

    persistence
        .save_room_after(&create_test_room("D"), Some(a))
        .unwrap();
    assert_eq!(room_names(&mut persistence), vec!["A", "D", "B", "C"]);
}

#[test]
fn test_save_room_after_none_goes_first() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_room(&create_test_room("A")).unwrap();
    persistence
        .save_room_after(&create_test_room("B"), None)
        .unwrap();
    assert_eq!(room_names(&mut persistence), vec!["B", "A"]);
}

#[test]
fn test_move_first_room_after_third() {
    let mut persistence: Persistence = create_test_persistence();
    let a: i64 = persistence.save_room(&create_test_room("A")).unwrap();
    persistence.save_room(&create_test_room("B")).unwrap();
    let c: i64 = persistence.save_room(&create_test_room("C")).unwrap();

    persistence.move_room_after(a, Some(c)).unwrap();
    assert_eq!(room_names(&mut persistence), vec!["B", "C", "A"]);
}

#[test]
fn test_move_last_room_to_front() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_room(&create_test_room("A")).unwrap();
    persistence.save_room(&create_test_room("B")).unwrap();
    let c: i64 = persistence.save_room(&create_test_room("C")).unwrap();

    persistence.move_room_after(c, None).unwrap();
    assert_eq!(room_names(&mut persistence), vec!["C", "A", "B"]);
}

#[test]
fn test_move_room_after_itself_is_a_noop() {
    let mut persistence: Persistence = create_test_persistence();
    let a: i64 = persistence.save_room(&create_test_room("A")).unwrap();
    persistence.save_room(&create_test_room("B")).unwrap();

    persistence.move_room_after(a, Some(a)).unwrap();
    assert_eq!(room_names(&mut persistence), vec!["A", "B"]);
}

#[test]
fn test_move_room_after_missing_anchor_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let a: i64 = persistence.save_room(&create_test_room("A")).unwrap();

    let result: Result<(), PersistenceError> = persistence.move_room_after(a, Some(9999));
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AnchorNotFound {
            entity: "Room",
            anchor_id: 9999,
        }))
    ));
}

#[test]
fn test_duplicate_room_name_and_kind_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_room(&create_test_room("A")).unwrap();

    let result: Result<i64, PersistenceError> = persistence.save_room(&create_test_room("A"));
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AlreadyExists {
            entity: "Room",
            ..
        }))
    ));

    // The same name under a different kind is a different room.
    let mut laboratory: Room = create_test_room("A");
    laboratory.kind = String::from("Laboratory");
    persistence.save_room(&laboratory).unwrap();
}

#[test]
fn test_update_room_keeps_rank() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_room(&create_test_room("A")).unwrap();
    let b: i64 = persistence.save_room(&create_test_room("B")).unwrap();

    let mut room: Room = persistence.get_room_by_id(b).unwrap();
    room.name = String::from("B renamed");
    persistence.update_room(&room).unwrap();

    let stored: Room = persistence.get_room_by_id(b).unwrap();
    assert_eq!(stored.name, "B renamed");
    assert_eq!(stored.sort_order, Some(2));
}

#[test]
fn test_groups_are_order_managed_like_rooms() {
    let mut persistence: Persistence = create_test_persistence();
    let a: i64 = persistence.save_group(&create_test_group("IN-11")).unwrap();
    persistence.save_group(&create_test_group("IN-12")).unwrap();
    let c: i64 = persistence
        .save_group_after(&create_test_group("IN-13"), Some(a))
        .unwrap();

    persistence.move_group_after(a, Some(c)).unwrap();
    let titles: Vec<String> = persistence
        .get_all_groups()
        .unwrap()
        .into_iter()
        .map(|group| group.title)
        .collect();
    assert_eq!(titles, vec!["IN-13", "IN-11", "IN-12"]);
}

#[test]
fn test_duplicate_group_title_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_group(&create_test_group("IN-11")).unwrap();

    let result: Result<i64, PersistenceError> =
        persistence.save_group(&create_test_group("IN-11"));
    assert!(matches!(
        result,
        Err(PersistenceError::Domain(DomainError::AlreadyExists {
            entity: "Group",
            ..
        }))
    ));
}

#[test]
fn test_rejected_duplicate_does_not_burn_a_rank() {
    let mut persistence: Persistence = create_test_persistence();
    persistence.save_group(&create_test_group("IN-11")).unwrap();
    let _ = persistence.save_group(&create_test_group("IN-11"));
    let b: i64 = persistence.save_group(&create_test_group("IN-12")).unwrap();

    let group: Group = persistence.get_group_by_id(b).unwrap();
    assert_eq!(group.sort_order, Some(2));
}
