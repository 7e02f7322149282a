use clipboard_core::logic::command::{AddCommand, DeleteCommand, EditCommand, EntityKind};
use clipboard_core::logic::parser::{parse_index, ADD_USAGE, EDIT_USAGE, FIND_USAGE};
use clipboard_core::model::fields::{Email, Name, Phone, StudentId};
use clipboard_core::{parse_command, Command, Index, PageType, ParseError, Student};

#[test]
fn parse_index_accepts_padded_positive_integers() {
    assert_eq!(parse_index("1").unwrap(), Index::from_zero_based(0));
    assert_eq!(parse_index("  1  ").unwrap(), Index::from_zero_based(0));
    assert_eq!(
        parse_index("2147483647").unwrap(),
        Index::from_one_based(2_147_483_647).unwrap()
    );
}

#[test]
fn parse_index_rejects_non_positive_and_oversized_values() {
    for input in ["10 a", "0", "-1", "+1", "", "2147483648", "1.5"] {
        assert!(
            matches!(parse_index(input), Err(ParseError::InvalidIndex(_))),
            "`{input}` should be rejected"
        );
    }
}

#[test]
fn parses_add_student_with_all_prefixes() {
    let command =
        parse_command("add student n/John Doe p/98765432 e/johnd@example.com sid/A0123456X")
            .unwrap();

    let expected = Student::new(
        Name::parse("John Doe").unwrap(),
        Phone::parse("98765432").unwrap(),
        Email::parse("johnd@example.com").unwrap(),
        StudentId::parse("A0123456X").unwrap(),
    );
    assert_eq!(command, Command::Add(AddCommand::Student(expected)));
    assert!(command.will_modify_state());
}

#[test]
fn add_student_missing_prefix_is_invalid_format() {
    let err = parse_command("add student n/John Doe p/98765432 sid/A0123456X").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat { usage: ADD_USAGE });
}

#[test]
fn add_student_with_bad_phone_reports_field() {
    let err = parse_command("add student n/John p/12 e/john@example.com sid/A1").unwrap_err();
    match err {
        ParseError::InvalidField(field) => assert_eq!(field.field, "phone"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn edit_student_requires_at_least_one_field() {
    assert_eq!(
        parse_command("edit student 1 junk").unwrap_err(),
        ParseError::InvalidFormat { usage: EDIT_USAGE }
    );

    let command = parse_command("edit student 2 p/91234567").unwrap();
    match command {
        Command::Edit(EditCommand::Student { index, descriptor }) => {
            assert_eq!(index.one_based(), 2);
            assert!(descriptor.is_any_field_edited());
            assert_eq!(descriptor.phone, Some(Phone::parse("91234567").unwrap()));
            assert!(descriptor.name.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn edit_with_zero_index_is_invalid_index() {
    assert_eq!(
        parse_command("edit group 0 T02").unwrap_err(),
        ParseError::InvalidIndex("0".to_string())
    );
}

#[test]
fn parses_delete_and_navigation_words() {
    assert_eq!(
        parse_command("delete task 3").unwrap(),
        Command::Delete(DeleteCommand {
            kind: EntityKind::Task,
            index: Index::from_one_based(3).unwrap(),
        })
    );
    assert_eq!(parse_command("  back ").unwrap(), Command::Back);
    assert_eq!(parse_command("home").unwrap(), Command::Home);
    assert_eq!(
        parse_command("session").unwrap(),
        Command::Show(PageType::Session)
    );
    assert_eq!(parse_command("undo").unwrap(), Command::Undo);
    assert!(!parse_command("list").unwrap().will_modify_state());
}

#[test]
fn find_collects_keywords_and_requires_one() {
    assert_eq!(
        parse_command("find alice  bob").unwrap(),
        Command::Find(vec!["alice".to_string(), "bob".to_string()])
    );
    assert_eq!(
        parse_command("find").unwrap_err(),
        ParseError::InvalidFormat { usage: FIND_USAGE }
    );
}

#[test]
fn unknown_and_empty_input_are_rejected() {
    assert_eq!(parse_command("   ").unwrap_err(), ParseError::Empty);
    assert_eq!(
        parse_command("frobnicate 1").unwrap_err(),
        ParseError::UnknownCommand("frobnicate".to_string())
    );
    assert!(matches!(
        parse_command("add widget W1"),
        Err(ParseError::InvalidFormat { .. })
    ));
}

#[test]
fn session_and_task_names_are_single_tokens() {
    match parse_command("add task Lab-1").unwrap() {
        Command::Add(AddCommand::Task(task)) => assert_eq!(task.name.as_str(), "Lab-1"),
        other => panic!("unexpected command: {other:?}"),
    }

    for input in ["add session Week 1", "edit task 1 Lab 2", "edit session 2 Week 3"] {
        match parse_command(input) {
            Err(ParseError::InvalidField(field)) => {
                assert!(field.field.ends_with("name"), "`{input}`: {field}")
            }
            other => panic!("`{input}` should fail field validation, got {other:?}"),
        }
    }
}
