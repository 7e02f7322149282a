use clipboard_core::model::fields::{Email, Name, Phone, StudentId, TaskName};
use clipboard_core::{ListError, Student, Task, UniqueList};
use std::sync::Arc;

fn student(name: &str, id: &str) -> Student {
    Student::new(
        Name::parse(name).unwrap(),
        Phone::parse("98765432").unwrap(),
        Email::parse("someone@example.com").unwrap(),
        StudentId::parse(id).unwrap(),
    )
}

fn task(name: &str) -> Task {
    Task::new(TaskName::parse(name).unwrap())
}

#[test]
fn add_rejects_same_identity_with_different_fields() {
    let mut students = UniqueList::new();
    students.add(student("Alice Tan", "A0000001X")).unwrap();

    let err = students
        .add(student("Someone Else", "A0000001X"))
        .unwrap_err();

    assert_eq!(err, ListError::DuplicateEntity { kind: "student" });
    assert_eq!(err.to_string(), "This student already exists");
    assert_eq!(students.len(), 1);
}

#[test]
fn contains_uses_identity_but_remove_uses_full_equality() {
    let mut students = UniqueList::new();
    students.add(student("Alice Tan", "A0000001X")).unwrap();
    let lookalike = student("Alice Renamed", "A0000001X");

    assert!(students.contains(&lookalike));
    assert_eq!(
        students.remove(&lookalike).unwrap_err(),
        ListError::EntityNotFound { kind: "student" }
    );
    assert_eq!(students.len(), 1);
}

#[test]
fn set_entity_keeps_position_and_rejects_identity_clash() {
    let mut students = UniqueList::from_vec(vec![
        student("Alice Tan", "A0000001X"),
        student("Bob Lee", "A0000002X"),
        student("Cara Ng", "A0000003X"),
    ])
    .unwrap();

    let bob = students.get(1).unwrap().clone();
    students
        .set_entity(&bob, student("Bobby Lee", "A0000002X"))
        .unwrap();
    assert_eq!(students.get(1).unwrap().name.as_str(), "Bobby Lee");

    let cara = students.get(2).unwrap().clone();
    let before = students.clone();
    let err = students
        .set_entity(&cara, student("Cara Ng", "A0000001X"))
        .unwrap_err();
    assert_eq!(err, ListError::DuplicateEntity { kind: "student" });
    assert_eq!(students, before);
}

#[test]
fn set_entity_on_missing_target_is_not_found() {
    let mut tasks = UniqueList::from_vec(vec![task("Lab1")]).unwrap();
    let err = tasks.set_entity(&task("Lab9"), task("Lab10")).unwrap_err();
    assert_eq!(err, ListError::EntityNotFound { kind: "task" });
}

#[test]
fn replace_all_rejects_duplicates_without_touching_list() {
    let mut tasks = UniqueList::from_vec(vec![task("Lab1")]).unwrap();

    let err = tasks
        .replace_all(vec![task("Lab2"), task("Lab3"), task("Lab2")])
        .unwrap_err();
    assert_eq!(err, ListError::DuplicateEntity { kind: "task" });
    assert_eq!(tasks.len(), 1);

    tasks.replace_all(vec![task("Lab2"), task("Lab3")]).unwrap();
    let names: Vec<&str> = tasks.iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["Lab2", "Lab3"]);
}

#[test]
fn filtered_view_follows_predicate_and_backing_changes() {
    let mut tasks =
        UniqueList::from_vec(vec![task("Lab1"), task("Quiz1"), task("Lab2")]).unwrap();
    tasks.set_filter(Arc::new(|task: &Task| task.name.as_str().starts_with("Lab")));

    assert_eq!(tasks.filtered().len(), 2);
    assert_eq!(tasks.filtered().get(1).unwrap().name.as_str(), "Lab2");
    assert_eq!(tasks.as_view().len(), 3);

    tasks.add(task("Lab3")).unwrap();
    assert_eq!(tasks.filtered().len(), 3);

    tasks.clear_filter();
    assert!(!tasks.is_filtered());
    assert_eq!(tasks.filtered().len(), 4);
}

#[test]
fn done_flag_is_part_of_full_equality_only() {
    let mut tasks = UniqueList::new();
    tasks.add(task("Wash")).unwrap();

    let mut washed = task("Wash");
    washed.done = true;

    assert!(tasks.contains(&washed));
    assert!(tasks.remove(&washed).is_err());

    let pending = task("Wash");
    tasks.set_entity(&pending, washed.clone()).unwrap();
    assert_eq!(tasks.remove(&washed).unwrap(), washed);
    assert!(tasks.is_empty());
}

#[test]
fn deserializing_duplicates_fails() {
    let json = r#"[{"name":"Lab1"},{"name":"Lab1","done":true}]"#;
    let err = serde_json::from_str::<UniqueList<Task>>(json).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}
