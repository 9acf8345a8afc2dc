// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rank-shift planning for the ordered position manager.
//!
//! A `sort_order` column holds a dense 1..N rank over a collection.
//! Inserting after an anchor always needs an open-ended shift, because
//! nothing occupies the target rank yet; moving only needs to shift the
//! displaced range, because the moving entity's old slot is vacated and
//! backfills the gap. Both plans are executed by the store together with
//! the final row write inside one transaction, so transient duplicate
//! ranks are never observable.

/// A planned rank shift: every member with rank in `[lower, upper)` is
/// incremented by one, and the subject entity lands on `new_rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    /// The rank the inserted or moved entity receives.
    pub new_rank: i32,
    /// Inclusive lower bound of the shifted range.
    pub lower: i32,
    /// Exclusive upper bound of the shifted range.
    pub upper: i32,
}

/// Plans the shift for inserting a new entity after an anchor.
///
/// `anchor_rank` is the resolved rank of the anchor entity, or `None`
/// for the "place first" sentinel. `max_rank` is the current highest
/// rank (0 for an empty collection). The shift is open-ended: every
/// member at or beyond the target rank moves up by one.
#[must_use]
pub const fn insert_plan(anchor_rank: Option<i32>, max_rank: i32) -> ShiftPlan {
    match anchor_rank {
        Some(rank) => ShiftPlan {
            new_rank: rank + 1,
            lower: rank + 1,
            upper: max_rank + 1,
        },
        None => ShiftPlan {
            new_rank: 1,
            lower: 0,
            upper: max_rank + 1,
        },
    }
}

/// Plans the shift for moving an existing entity after an anchor.
///
/// `old_rank` is the entity's current rank (`None` when it never had
/// one, in which case the move degenerates to an append-like open
/// shift). The shift is bounded: only ranks in `[anchor + 1, old_rank]`
/// are displaced, ranks beyond the vacated slot are untouched.
#[must_use]
pub const fn move_plan(anchor_rank: Option<i32>, old_rank: Option<i32>, max_rank: i32) -> ShiftPlan {
    match anchor_rank {
        Some(rank) => {
            let upper = match old_rank {
                Some(old) => old + 1,
                None => max_rank + 2,
            };
            ShiftPlan {
                new_rank: rank + 1,
                lower: rank + 1,
                upper,
            }
        }
        None => ShiftPlan {
            new_rank: 1,
            lower: 0,
            upper: max_rank + 1,
        },
    }
}
