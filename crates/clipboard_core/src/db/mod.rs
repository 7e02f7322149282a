//! SQLite data file holding the saved roster.
//!
//! # Responsibility
//! - Open the data file and bring its schema up to date.
//! - Report files this build cannot read instead of touching them.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A file written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The data file was migrated by a newer CLIpboard build.
    DataFileTooNew {
        file_version: u32,
        supported_version: u32,
    },
}

impl DbError {
    /// True when upgrading the binary, not repairing the file, is the fix.
    pub fn needs_newer_build(&self) -> bool {
        matches!(self, Self::DataFileTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "data file error: {err}"),
            Self::DataFileTooNew {
                file_version,
                supported_version,
            } => write!(
                f,
                "data file uses schema {file_version}, this build reads up to {supported_version}; \
                 upgrade CLIpboard to open it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::DataFileTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
