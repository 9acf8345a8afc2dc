// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Week-parity → predicate derivation for the slot conflict detector.
//!
//! The store switches its conflict-count query on the shape returned
//! here, so the overlap rule stays a pure function: a WEEKLY request
//! collides with anything at the slot, an EVEN or ODD request collides
//! with the same parity or with WEEKLY.

use timetable_domain::WeekParity;

/// The predicate an existing placement's parity must satisfy to count
/// as a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityPredicate {
    /// Any existing placement at the slot conflicts.
    AnyParity,
    /// Only placements with the given parity, or WEEKLY, conflict.
    SameOrWeekly(WeekParity),
}

/// Derives the conflict predicate for a requested parity.
#[must_use]
pub const fn conflict_predicate(requested: WeekParity) -> ParityPredicate {
    match requested {
        WeekParity::Weekly => ParityPredicate::AnyParity,
        WeekParity::Even | WeekParity::Odd => ParityPredicate::SameOrWeekly(requested),
    }
}

impl ParityPredicate {
    /// Evaluates the predicate against an existing placement's parity.
    #[must_use]
    pub const fn matches(&self, existing: WeekParity) -> bool {
        match self {
            Self::AnyParity => true,
            Self::SameOrWeekly(parity) => {
                matches!(existing, WeekParity::Weekly) || existing.overlaps(*parity)
            }
        }
    }
}
