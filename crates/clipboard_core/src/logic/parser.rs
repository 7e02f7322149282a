//! Text command parser.
//!
//! # Responsibility
//! - Turn one input line into a fully typed [`Command`].
//! - Validate indices and field values before the core sees a command.
//!
//! # Invariants
//! - Display indices in text are 1-based positive integers within `i32`.
//! - A returned command never needs re-parsing.

use crate::logic::command::{
    AddCommand, Command, DeleteCommand, EditCommand, EditStudentDescriptor, EntityKind, Index,
};
use crate::logic::selection::PageType;
use crate::model::course::{Course, Group, Session};
use crate::model::fields::{
    CourseCode, Email, FieldError, GroupName, Name, Phone, SessionName, StudentId, TaskName,
};
use crate::model::student::Student;
use crate::model::task::Task;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREFIX_NAME: &str = "n";
pub const PREFIX_PHONE: &str = "p";
pub const PREFIX_EMAIL: &str = "e";
pub const PREFIX_STUDENT_ID: &str = "sid";

pub const ADD_USAGE: &str = "add: Adds a course, group, student, session or task to the current page.\n\
Parameters: course CODE | group NAME | student n/NAME p/PHONE e/EMAIL sid/STUDENT_ID | session NAME | task NAME\n\
Example: add student n/John Doe p/98765432 e/johnd@example.com sid/A0123456X";
pub const EDIT_USAGE: &str = "edit: Edits the entry at INDEX of the displayed list.\n\
Parameters: course INDEX CODE | group INDEX NAME | student INDEX [n/NAME] [p/PHONE] [e/EMAIL] [sid/STUDENT_ID] | session INDEX NAME | task INDEX NAME\n\
Example: edit group 1 T02";
pub const DELETE_USAGE: &str = "delete: Deletes the entry at INDEX of the displayed list.\n\
Parameters: course|group|student|session|task INDEX\n\
Example: delete student 2";
pub const SELECT_USAGE: &str = "select: Opens the course, group or session at INDEX.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: select 1";
pub const FIND_USAGE: &str = "find: Shows entries matching any of the keywords.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob";
pub const MARK_USAGE: &str = "mark/unmark: Marks a student present/absent on the attendance page, or a task done/not done on the task page.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: mark 1";

static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(n|p|e|sid)/").expect("valid prefix regex"));

/// Input line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    /// Arguments do not fit the command's shape.
    InvalidFormat { usage: &'static str },
    /// Index text is not a non-zero unsigned integer.
    InvalidIndex(String),
    InvalidField(FieldError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Please enter a command. Type `help` for a list"),
            Self::UnknownCommand(word) => write!(f, "Unknown command: `{word}`"),
            Self::InvalidFormat { usage } => write!(f, "Invalid command format!\n{usage}"),
            Self::InvalidIndex(value) => {
                write!(f, "Index is not a non-zero unsigned integer: `{value}`")
            }
            Self::InvalidField(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::InvalidField(value)
    }
}

/// Parses one input line.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (word, args) = split_first_word(trimmed);
    match word {
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "delete" => parse_delete(args),
        "select" => parse_index_with_usage(args, SELECT_USAGE).map(Command::Select),
        "back" => Ok(Command::Back),
        "home" => Ok(Command::Home),
        "student" => Ok(Command::Show(PageType::Student)),
        "session" => Ok(Command::Show(PageType::Session)),
        "task" => Ok(Command::Show(PageType::Task)),
        "find" => parse_find(args),
        "list" => Ok(Command::List),
        "mark" => parse_index_with_usage(args, MARK_USAGE).map(Command::Mark),
        "unmark" => parse_index_with_usage(args, MARK_USAGE).map(Command::Unmark),
        "undo" => Ok(Command::Undo),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Parses a 1-based display index.
///
/// Leading and trailing whitespace is ignored; signs, zero and values above
/// `i32::MAX` are rejected.
pub fn parse_index(value: &str) -> Result<Index, ParseError> {
    let trimmed = value.trim();
    let invalid = || ParseError::InvalidIndex(trimmed.to_string());
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }
    let parsed = trimmed.parse::<i32>().map_err(|_| invalid())?;
    let one_based = usize::try_from(parsed).map_err(|_| invalid())?;
    Index::from_one_based(one_based).ok_or_else(invalid)
}

fn parse_index_with_usage(args: &str, usage: &'static str) -> Result<Index, ParseError> {
    if args.trim().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    parse_index(args)
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let (kind_word, rest) = split_first_word(args);
    let kind = parse_kind(kind_word).ok_or(ParseError::InvalidFormat { usage: ADD_USAGE })?;
    if rest.is_empty() {
        return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
    }

    let command = match kind {
        EntityKind::Course => AddCommand::Course(Course::new(CourseCode::parse(rest)?)),
        EntityKind::Group => AddCommand::Group(Group::new(GroupName::parse(rest)?)),
        EntityKind::Student => AddCommand::Student(parse_new_student(rest)?),
        EntityKind::Session => AddCommand::Session(Session::new(SessionName::parse(rest)?)),
        EntityKind::Task => AddCommand::Task(Task::new(TaskName::parse(rest)?)),
    };
    Ok(Command::Add(command))
}

fn parse_new_student(args: &str) -> Result<Student, ParseError> {
    let arguments = tokenize(args);
    let format_error = || ParseError::InvalidFormat { usage: ADD_USAGE };
    if !arguments.preamble.is_empty() {
        return Err(format_error());
    }

    let name = arguments.value(PREFIX_NAME).ok_or_else(format_error)?;
    let phone = arguments.value(PREFIX_PHONE).ok_or_else(format_error)?;
    let email = arguments.value(PREFIX_EMAIL).ok_or_else(format_error)?;
    let student_id = arguments
        .value(PREFIX_STUDENT_ID)
        .ok_or_else(format_error)?;

    Ok(Student::new(
        Name::parse(name)?,
        Phone::parse(phone)?,
        Email::parse(email)?,
        StudentId::parse(student_id)?,
    ))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let format_error = || ParseError::InvalidFormat { usage: EDIT_USAGE };
    let (kind_word, rest) = split_first_word(args);
    let kind = parse_kind(kind_word).ok_or_else(format_error)?;
    let (index_text, value) = split_first_word(rest);
    if index_text.is_empty() || value.is_empty() {
        return Err(format_error());
    }
    let index = parse_index(index_text)?;

    let command = match kind {
        EntityKind::Course => EditCommand::Course {
            index,
            new_course: Course::new(CourseCode::parse(value)?),
        },
        EntityKind::Group => EditCommand::Group {
            index,
            new_group: Group::new(GroupName::parse(value)?),
        },
        EntityKind::Student => EditCommand::Student {
            index,
            descriptor: parse_student_descriptor(value)?,
        },
        EntityKind::Session => EditCommand::Session {
            index,
            new_session: Session::new(SessionName::parse(value)?),
        },
        EntityKind::Task => EditCommand::Task {
            index,
            new_task: Task::new(TaskName::parse(value)?),
        },
    };
    Ok(Command::Edit(command))
}

fn parse_student_descriptor(args: &str) -> Result<EditStudentDescriptor, ParseError> {
    let arguments = tokenize(args);
    if !arguments.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage: EDIT_USAGE });
    }

    let descriptor = EditStudentDescriptor {
        name: arguments.value(PREFIX_NAME).map(Name::parse).transpose()?,
        phone: arguments.value(PREFIX_PHONE).map(Phone::parse).transpose()?,
        email: arguments.value(PREFIX_EMAIL).map(Email::parse).transpose()?,
        student_id: arguments
            .value(PREFIX_STUDENT_ID)
            .map(StudentId::parse)
            .transpose()?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::InvalidFormat { usage: EDIT_USAGE });
    }
    Ok(descriptor)
}

fn parse_delete(args: &str) -> Result<Command, ParseError> {
    let (kind_word, rest) = split_first_word(args);
    let kind = parse_kind(kind_word).ok_or(ParseError::InvalidFormat {
        usage: DELETE_USAGE,
    })?;
    let index = parse_index_with_usage(rest, DELETE_USAGE)?;
    Ok(Command::Delete(DeleteCommand { kind, index }))
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find(keywords))
}

fn parse_kind(word: &str) -> Option<EntityKind> {
    match word {
        "course" => Some(EntityKind::Course),
        "group" => Some(EntityKind::Group),
        "student" => Some(EntityKind::Student),
        "session" => Some(EntityKind::Session),
        "task" => Some(EntityKind::Task),
        _ => None,
    }
}

fn split_first_word(input: &str) -> (&str, &str) {
    let trimmed = input.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    }
}

/// Prefixed arguments such as `n/John Doe p/98765432`.
struct PrefixedArguments<'a> {
    /// Text before the first prefix.
    preamble: &'a str,
    values: HashMap<&'a str, &'a str>,
}

impl<'a> PrefixedArguments<'a> {
    fn value(&self, prefix: &str) -> Option<&'a str> {
        self.values.get(prefix).copied()
    }
}

/// Splits `args` at every recognised prefix. A repeated prefix keeps its last value.
fn tokenize(args: &str) -> PrefixedArguments<'_> {
    let markers: Vec<(usize, usize, &str)> = PREFIX_RE
        .captures_iter(args)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let prefix = caps.get(1)?;
            Some((prefix.start(), whole.end(), prefix.as_str()))
        })
        .collect();

    let preamble_end = markers.first().map_or(args.len(), |marker| marker.0);
    let mut values = HashMap::new();
    for (position, (_, value_start, prefix)) in markers.iter().enumerate() {
        let value_end = markers
            .get(position + 1)
            .map_or(args.len(), |next| next.0);
        values.insert(*prefix, args[*value_start..value_end].trim());
    }

    PrefixedArguments {
        preamble: args[..preamble_end].trim(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::{split_first_word, tokenize};

    #[test]
    fn tokenize_splits_values_at_prefixes() {
        let arguments = tokenize("n/John Doe p/98765432 e/johnd@example.com sid/A0123456X");
        assert_eq!(arguments.preamble, "");
        assert_eq!(arguments.value("n"), Some("John Doe"));
        assert_eq!(arguments.value("p"), Some("98765432"));
        assert_eq!(arguments.value("e"), Some("johnd@example.com"));
        assert_eq!(arguments.value("sid"), Some("A0123456X"));
    }

    #[test]
    fn tokenize_keeps_preamble_and_last_repeated_value() {
        let arguments = tokenize("junk n/First n/Second");
        assert_eq!(arguments.preamble, "junk");
        assert_eq!(arguments.value("n"), Some("Second"));
        assert_eq!(arguments.value("p"), None);
    }

    #[test]
    fn prefix_inside_a_value_is_not_a_marker() {
        let arguments = tokenize("n/Ann e/ann/p@example.com");
        assert_eq!(arguments.value("e"), Some("ann/p@example.com"));
    }

    #[test]
    fn split_first_word_trims_rest() {
        assert_eq!(split_first_word("  edit   group 1 T02 "), ("edit", "group 1 T02"));
        assert_eq!(split_first_word("home"), ("home", ""));
    }
}
