//! Roster snapshot persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Load the last saved roster at startup.
//! - Replace the saved roster after each state-modifying command.
//!
//! # Invariants
//! - At most one snapshot row exists (`id = 1`).
//! - A payload that fails to decode, or decodes into duplicate entities,
//!   is reported as `InvalidData` and never partially loaded.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::roster::Roster;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage seam for the roster.
pub trait SnapshotRepository {
    /// Returns `None` when nothing has been saved yet.
    fn load_snapshot(&self) -> SnapshotResult<Option<Roster>>;
    fn save_snapshot(&self, roster: &Roster) -> SnapshotResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> SnapshotResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Epoch milliseconds of the last save, if any.
    pub fn last_saved_at(&self) -> SnapshotResult<Option<i64>> {
        let saved_at = self
            .conn
            .query_row(
                "SELECT saved_at FROM roster_snapshots WHERE id = 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(saved_at)
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> SnapshotResult<Option<Roster>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM roster_snapshots WHERE id = 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;

        payload
            .map(|text| {
                serde_json::from_str::<Roster>(&text)
                    .map_err(|err| SnapshotError::InvalidData(err.to_string()))
            })
            .transpose()
    }

    fn save_snapshot(&self, roster: &Roster) -> SnapshotResult<()> {
        let payload = serde_json::to_string(roster)
            .map_err(|err| SnapshotError::InvalidData(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO roster_snapshots (id, payload, saved_at)
             VALUES (1, ?1, (strftime('%s', 'now') * 1000))
             ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at;",
            params![payload],
        )?;

        info!(
            "event=snapshot_save module=repo status=ok courses={} bytes={}",
            roster.courses().len(),
            payload.len()
        );
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> SnapshotResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SnapshotError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "roster_snapshots")? {
        return Err(SnapshotError::MissingRequiredTable("roster_snapshots"));
    }

    for column in ["id", "payload", "saved_at"] {
        if !table_has_column(conn, "roster_snapshots", column)? {
            return Err(SnapshotError::MissingRequiredColumn {
                table: "roster_snapshots",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> SnapshotResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> SnapshotResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{SnapshotError, SnapshotRepository, SqliteSnapshotRepository};
    use crate::db::open_db_in_memory;
    use crate::model::course::Course;
    use crate::model::fields::CourseCode;
    use crate::model::roster::Roster;
    use rusqlite::Connection;

    #[test]
    fn empty_store_loads_nothing() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        assert!(repo.load_snapshot().unwrap().is_none());
        assert!(repo.last_saved_at().unwrap().is_none());
    }

    #[test]
    fn save_replaces_previous_snapshot() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

        let mut roster = Roster::new();
        roster
            .courses_mut()
            .add(Course::new(CourseCode::parse("CS2103T").unwrap()))
            .unwrap();
        repo.save_snapshot(&roster).unwrap();
        repo.save_snapshot(&Roster::new()).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM roster_snapshots;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(repo.load_snapshot().unwrap(), Some(Roster::new()));
        assert!(repo.last_saved_at().unwrap().is_some());
    }

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteSnapshotRepository::try_new(&conn)
            .err()
            .expect("bare connection must be rejected");
        assert!(matches!(
            err,
            SnapshotError::UninitializedConnection {
                actual_version: 0,
                ..
            }
        ));
    }

    #[test]
    fn corrupt_payload_is_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO roster_snapshots (id, payload, saved_at) VALUES (1, 'not json', 0);",
            [],
        )
        .unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        assert!(matches!(
            repo.load_snapshot(),
            Err(SnapshotError::InvalidData(_))
        ));
    }
}
