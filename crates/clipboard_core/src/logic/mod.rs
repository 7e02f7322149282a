//! Command/result protocol.
//!
//! # Responsibility
//! - Parse text into typed commands.
//! - Execute commands against the roster under the current page context.
//! - Drive persistence and undo for the caller.
//!
//! # Invariants
//! - Validation (page, index, uniqueness) happens before the single
//!   mutating list call; failures leave roster and selection unchanged.

pub mod command;
pub(crate) mod commands;
pub mod listing;
pub mod manager;
pub mod parser;
pub mod selection;
