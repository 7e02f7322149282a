//! Persistence seams for the roster.
//!
//! # Responsibility
//! - Define the storage contract used by the logic layer.
//! - Keep SQLite query details out of command execution.
//!
//! # Invariants
//! - Repositories only accept connections whose migrations are applied.

pub mod snapshot_repo;
