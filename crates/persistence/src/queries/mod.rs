// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `catalog` — Room, group, teacher and subject reads
//! - `conflicts` — Slot conflict counting over the fully-enabled chain
//! - `lessons` — Lesson reads, including sibling-set resolution
//! - `periods` — Period reads
//! - `schedules` — Placement reads and flat week-view rows
//! - `semesters` — Semester reads, including the current/default flags

pub mod catalog;
pub mod conflicts;
pub mod lessons;
pub mod periods;
pub mod schedules;
pub mod semesters;
