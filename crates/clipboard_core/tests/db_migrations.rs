use clipboard_core::db::migrations::{current_user_version, latest_version};
use clipboard_core::db::{open_db, open_db_in_memory, DbError};
use clipboard_core::{Roster, SnapshotRepository, SqliteSnapshotRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "roster_snapshots");
}

#[test]
fn reopening_data_file_keeps_schema_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clipboard.sqlite3");

    let conn_first = open_db(&path).unwrap();
    SqliteSnapshotRepository::try_new(&conn_first)
        .unwrap()
        .save_snapshot(&Roster::new())
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn_second).unwrap(), latest_version());
    let repo = SqliteSnapshotRepository::try_new(&conn_second).unwrap();
    assert_eq!(repo.load_snapshot().unwrap(), Some(Roster::new()));
}

#[test]
fn opening_data_file_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(err.needs_newer_build());
    assert!(err.to_string().contains("upgrade CLIpboard"));
    match err {
        DbError::DataFileTooNew {
            file_version,
            supported_version,
        } => {
            assert_eq!(file_version, 999);
            assert_eq!(supported_version, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
