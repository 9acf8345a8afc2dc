// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! This module contains all state-changing operations. Mutations use
//! Diesel DSL exclusively, with the single `last_insert_rowid()` helper
//! imported from the `backend` module.
//!
//! ## Module Organization
//!
//! - `catalog` — Room, group, teacher and subject writes
//! - `lessons` — Lesson writes, including grouped sibling rewrites
//! - `ordering` — Rank shifting for the order-managed tables
//! - `periods` — Period writes
//! - `schedules` — Placement writes
//! - `semesters` — Semester writes, including the singleton flag flips

pub mod catalog;
pub mod lessons;
pub mod ordering;
pub mod periods;
pub mod schedules;
pub mod semesters;
