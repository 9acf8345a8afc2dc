// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ParityPredicate, conflict_predicate};
use timetable_domain::WeekParity;

#[test]
fn weekly_request_checks_every_parity() {
    let predicate: ParityPredicate = conflict_predicate(WeekParity::Weekly);
    assert!(matches!(predicate, ParityPredicate::AnyParity));
    assert!(predicate.matches(WeekParity::Even));
    assert!(predicate.matches(WeekParity::Odd));
    assert!(predicate.matches(WeekParity::Weekly));
}

#[test]
fn even_request_sees_even_and_weekly_only() {
    let predicate: ParityPredicate = conflict_predicate(WeekParity::Even);
    assert!(predicate.matches(WeekParity::Even));
    assert!(predicate.matches(WeekParity::Weekly));
    assert!(!predicate.matches(WeekParity::Odd));
}

#[test]
fn odd_request_sees_odd_and_weekly_only() {
    let predicate: ParityPredicate = conflict_predicate(WeekParity::Odd);
    assert!(predicate.matches(WeekParity::Odd));
    assert!(predicate.matches(WeekParity::Weekly));
    assert!(!predicate.matches(WeekParity::Even));
}

#[test]
fn parity_overlap_is_symmetric() {
    let parities: [WeekParity; 3] =
        [WeekParity::Even, WeekParity::Odd, WeekParity::Weekly];
    for requested in parities {
        for existing in parities {
            assert_eq!(
                conflict_predicate(requested).matches(existing),
                conflict_predicate(existing).matches(requested),
                "{requested} vs {existing} must agree in both directions"
            );
        }
    }
}
