//! Roster domain model.
//!
//! # Responsibility
//! - Define courses, groups, sessions, students and tasks.
//! - Provide the identity-unique list every collection is stored in.
//!
//! # Invariants
//! - Every entity type separates identity (`Entity::is_same`) from full
//!   equality (`Entity::fully_equal`).
//! - Field values are validated on construction and on deserialization.

pub mod course;
pub mod fields;
pub mod roster;
pub mod student;
pub mod task;
pub mod unique_list;
