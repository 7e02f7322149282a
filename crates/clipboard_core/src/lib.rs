//! Core of the CLIpboard roster shell.
//!
//! Courses own groups; groups own students, sessions and tasks. Every
//! collection is a [`UniqueList`], and every change goes through a parsed
//! [`Command`] executed against the page selected in [`CurrentSelection`].

pub mod config;
pub mod db;
pub mod logging;
pub mod logic;
pub mod model;
pub mod repo;

pub use config::{AppConfig, DEFAULT_DATA_FILE};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::command::{Command, CommandError, CommandResult, Index};
pub use logic::manager::{LogicError, LogicManager};
pub use logic::parser::{parse_command, ParseError};
pub use logic::selection::{CurrentSelection, PageType};
pub use model::course::{Course, Group, Session};
pub use model::fields::FieldError;
pub use model::roster::Roster;
pub use model::student::Student;
pub use model::task::Task;
pub use model::unique_list::{Entity, ListError, ListView, UniqueList};
pub use repo::snapshot_repo::{
    SnapshotError, SnapshotRepository, SnapshotResult, SqliteSnapshotRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
