// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule cache invalidation seam.
//!
//! Published week views are heavily read and typically served from a
//! cache owned by the process embedding this crate. Every write that can
//! change a rendered schedule notifies the invalidator after the
//! transaction commits; eviction is fire-and-forget and never fails the
//! write itself.

use tracing::debug;

/// Receives eviction notifications for rendered schedule views.
///
/// Keys are the (semester, group, teacher) triple the views are cached
/// under. The default implementation is [`NoopCacheInvalidator`];
/// embedders with an actual view cache install their own via
/// [`crate::Persistence::with_cache_invalidator`].
pub trait CacheInvalidator: Send {
    /// A placement changed for the given group and teacher.
    fn evict_schedule(&self, semester_id: i64, group_id: i64, teacher_id: i64);

    /// A lesson changed for the given group and teacher, invalidating
    /// both the lesson lists and any placements rendered from them.
    fn evict_schedule_with_lessons(&self, semester_id: i64, group_id: i64, teacher_id: i64);

    /// A bulk or cross-semester change occurred; drop everything.
    fn evict_all_schedules(&self);
}

/// Invalidator that only logs evictions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCacheInvalidator;

impl CacheInvalidator for NoopCacheInvalidator {
    fn evict_schedule(&self, semester_id: i64, group_id: i64, teacher_id: i64) {
        debug!(
            "Schedule cache eviction for (semester {semester_id}, group {group_id}, teacher {teacher_id}) (no cache installed)"
        );
    }

    fn evict_schedule_with_lessons(&self, semester_id: i64, group_id: i64, teacher_id: i64) {
        debug!(
            "Schedule+lesson cache eviction for (semester {semester_id}, group {group_id}, teacher {teacher_id}) (no cache installed)"
        );
    }

    fn evict_all_schedules(&self) {
        debug!("Full schedule cache eviction (no cache installed)");
    }
}
