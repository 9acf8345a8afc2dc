// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timetable_domain::{Lesson, Placement};

/// Expands a placement request across a grouped lesson's sibling set.
///
/// Each sibling receives an equivalent placement: same room, period,
/// day and parity, differing only in the lesson. Siblings without a
/// persisted id are skipped; the store never returns such rows.
///
/// The caller validates every expanded placement independently (each
/// sibling has a different group) and persists the batch atomically.
#[must_use]
pub fn expand_for_siblings(base: &Placement, siblings: &[Lesson]) -> Vec<Placement> {
    siblings
        .iter()
        .filter_map(|lesson| {
            lesson.id.map(|lesson_id| Placement {
                id: None,
                lesson_id,
                room_id: base.room_id,
                period_id: base.period_id,
                day: base.day,
                parity: base.parity,
            })
        })
        .collect()
}
