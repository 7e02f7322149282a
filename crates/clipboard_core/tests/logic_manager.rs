use clipboard_core::logic::manager::MAX_UNDO_DEPTH;
use clipboard_core::{
    open_db, open_db_in_memory, CommandError, CurrentSelection, LogicError, LogicManager,
    PageType, Roster, SnapshotError, SnapshotRepository, SnapshotResult,
    SqliteSnapshotRepository,
};
use std::cell::{Cell, RefCell};

/// In-memory store that counts saves and can be told to fail.
#[derive(Default)]
struct RecordingRepo {
    saved: RefCell<Option<Roster>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl SnapshotRepository for &RecordingRepo {
    fn load_snapshot(&self) -> SnapshotResult<Option<Roster>> {
        Ok(self.saved.borrow().clone())
    }

    fn save_snapshot(&self, roster: &Roster) -> SnapshotResult<()> {
        if self.fail_saves.get() {
            return Err(SnapshotError::InvalidData("disk full".to_string()));
        }
        self.saves.set(self.saves.get() + 1);
        *self.saved.borrow_mut() = Some(roster.clone());
        Ok(())
    }
}

#[test]
fn only_state_modifying_commands_are_saved() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();

    manager.execute("add course CS2103T").unwrap();
    manager.execute("find cs").unwrap();
    manager.execute("select 1").unwrap();
    manager.execute("help").unwrap();
    assert_eq!(repo.saves.get(), 1);

    manager.execute("add group T01").unwrap();
    assert_eq!(repo.saves.get(), 2);
    assert_eq!(repo.saved.borrow().as_ref(), Some(manager.roster()));
}

#[test]
fn rejected_command_is_neither_saved_nor_undoable() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();

    manager.execute("add course CS2103T").unwrap();
    let err = manager.execute("add course CS2103T").unwrap_err();
    assert!(matches!(err, LogicError::Command(CommandError::List(_))));
    assert_eq!(repo.saves.get(), 1);

    manager.execute("undo").unwrap();
    assert!(manager.roster().courses().is_empty());
    assert!(matches!(
        manager.execute("undo"),
        Err(LogicError::Command(CommandError::NothingToUndo))
    ));
}

#[test]
fn undo_restores_roster_and_page() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();
    manager.execute("add course CS2103T").unwrap();
    manager.execute("select 1").unwrap();
    manager.execute("add group T01").unwrap();
    manager.execute("select 1").unwrap();
    manager.execute("home").unwrap();
    assert_eq!(manager.selection(), &CurrentSelection::new());

    let result = manager.execute("undo").unwrap();

    assert_eq!(result.message(), "Undid command: add");
    assert!(result.will_modify_state());
    assert_eq!(manager.selection().page(), PageType::Group);
    assert!(manager.page_listing().is_empty());
    assert_eq!(repo.saved.borrow().as_ref(), Some(manager.roster()));
}

#[test]
fn undo_history_is_bounded() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();

    for n in 0..MAX_UNDO_DEPTH + 5 {
        manager.execute(&format!("add course C{n}")).unwrap();
    }
    for _ in 0..MAX_UNDO_DEPTH {
        manager.execute("undo").unwrap();
    }

    assert_eq!(manager.roster().courses().len(), 5);
    assert!(manager.execute("undo").is_err());
}

#[test]
fn failed_save_is_reported_as_storage_error() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();
    repo.fail_saves.set(true);

    let err = manager.execute("add course CS2103T").unwrap_err();

    assert!(matches!(err, LogicError::Storage(_)));
    assert!(err.to_string().starts_with("Could not save data"));
    assert_eq!(repo.saves.get(), 0);
}

#[test]
fn parse_failures_surface_as_command_errors() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();

    let err = manager.execute("select zero").unwrap_err();
    match err {
        LogicError::Command(inner) => assert_eq!(inner.code(), "parse_failure"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn exit_result_is_flagged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = LogicManager::new(repo).unwrap();

    let result = manager.execute("exit").unwrap();
    assert!(result.is_exit());
    assert!(!result.will_modify_state());
}

#[test]
fn roster_survives_restart_through_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clipboard.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut manager = LogicManager::new(repo).unwrap();
        manager.execute("add course CS2103T").unwrap();
        manager.execute("select 1").unwrap();
        manager.execute("add group T01").unwrap();
        manager.execute("select 1").unwrap();
        manager
            .execute("add student n/Alice Tan p/91234567 e/alice@u.nus.edu sid/A0000001X")
            .unwrap();
        manager.execute("session").unwrap();
        manager.execute("add session Week1").unwrap();
        manager.execute("select 1").unwrap();
        manager.execute("mark 1").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = LogicManager::new(repo).unwrap();

    assert_eq!(manager.selection(), &CurrentSelection::new());
    assert_eq!(manager.page_listing(), ["1. CS2103T"]);
    manager.execute("select 1").unwrap();
    manager.execute("select 1").unwrap();
    manager.execute("session").unwrap();
    manager.execute("select 1").unwrap();
    assert_eq!(
        manager.page_listing(),
        ["1. Alice Tan (A0000001X) [present]"]
    );
}

#[test]
fn repeated_mark_is_not_saved_or_undoable() {
    let repo = RecordingRepo::default();
    let mut manager = LogicManager::new(&repo).unwrap();
    for input in [
        "add course CS2103T",
        "select 1",
        "add group T01",
        "select 1",
        "add student n/Al Lim p/91234567 e/al@u.nus.edu sid/A0000001X",
        "session",
        "add session W1",
        "select 1",
        "mark 1",
    ] {
        manager.execute(input).unwrap();
    }
    let saves_after_first_mark = repo.saves.get();

    let result = manager.execute("mark 1").unwrap();
    assert_eq!(result.message(), "Al Lim is already present for W1");
    assert_eq!(repo.saves.get(), saves_after_first_mark);

    let undone = manager.execute("undo").unwrap();
    assert_eq!(undone.message(), "Undid command: mark");
    assert_eq!(manager.page_listing(), ["1. Al Lim (A0000001X) [absent]"]);
}
