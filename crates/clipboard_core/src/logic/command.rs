//! Typed commands, their results and errors.
//!
//! # Responsibility
//! - Represent one parsed user instruction with its static mutation flag.
//! - Dispatch execution to the per-command modules.
//!
//! # Invariants
//! - `execute` either returns a result or an error; on error neither the
//!   roster nor the selection has changed.
//! - `CommandResult::will_modify_state` always equals the originating
//!   command's `will_modify_state()`.

use crate::logic::commands::{add, delete, edit, filter, mark, navigate};
use crate::logic::parser::ParseError;
use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::course::{Course, Group, Session};
use crate::model::fields::{Email, Name, Phone, StudentId};
use crate::model::roster::Roster;
use crate::model::student::Student;
use crate::model::task::Task;
use crate::model::unique_list::ListError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_EXIT: &str = "Exiting CLIpboard as requested ...";
pub const MESSAGE_HELP: &str = "Commands: add, edit, delete, select, back, home, student, \
session, task, find, list, mark, unmark, undo, help, exit. \
Indices refer to the list currently displayed and start at 1.";

/// Zero-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    pub fn from_zero_based(value: usize) -> Self {
        Self(value)
    }

    /// Returns `None` for `0`, which is not a valid display index.
    pub fn from_one_based(value: usize) -> Option<Self> {
        value.checked_sub(1).map(Self)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

/// Kind of roster entity a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Course,
    Group,
    Student,
    Session,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Group => "group",
            Self::Student => "student",
            Self::Session => "session",
            Self::Task => "task",
        }
    }

    /// Page on which entities of this kind are listed and edited.
    pub fn page(self) -> PageType {
        match self {
            Self::Course => PageType::Course,
            Self::Group => PageType::Group,
            Self::Student => PageType::Student,
            Self::Session => PageType::Session,
            Self::Task => PageType::Task,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddCommand {
    Course(Course),
    Group(Group),
    Student(Student),
    Session(Session),
    Task(Task),
}

impl AddCommand {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Course(_) => EntityKind::Course,
            Self::Group(_) => EntityKind::Group,
            Self::Student(_) => EntityKind::Student,
            Self::Session(_) => EntityKind::Session,
            Self::Task(_) => EntityKind::Task,
        }
    }
}

/// Fields to overwrite on an existing student. `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditStudentDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub student_id: Option<StudentId>,
}

impl EditStudentDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.student_id.is_some()
    }

    /// Builds the edited copy of `student`.
    pub fn apply(&self, student: &Student) -> Student {
        Student {
            name: self.name.clone().unwrap_or_else(|| student.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| student.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| student.email.clone()),
            student_id: self
                .student_id
                .clone()
                .unwrap_or_else(|| student.student_id.clone()),
        }
    }
}

/// Replacement values for the entity shown at `index`.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Course { index: Index, new_course: Course },
    Group { index: Index, new_group: Group },
    Student { index: Index, descriptor: EditStudentDescriptor },
    Session { index: Index, new_session: Session },
    Task { index: Index, new_task: Task },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    pub kind: EntityKind,
    pub index: Index,
}

/// One parsed user instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Delete(DeleteCommand),
    /// Opens the entity at the index: course, group or session.
    Select(Index),
    Back,
    Home,
    /// Switches between the student, session and task pages of a group.
    Show(PageType),
    Find(Vec<String>),
    List,
    /// Marks a student present or a task done, depending on the page.
    Mark(Index),
    Unmark(Index),
    Undo,
    Help,
    Exit,
}

impl Command {
    pub fn command_word(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Delete(_) => "delete",
            Self::Select(_) => "select",
            Self::Back => "back",
            Self::Home => "home",
            Self::Show(PageType::Session) => "session",
            Self::Show(PageType::Task) => "task",
            Self::Show(_) => "student",
            Self::Find(_) => "find",
            Self::List => "list",
            Self::Mark(_) => "mark",
            Self::Unmark(_) => "unmark",
            Self::Undo => "undo",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Whether a successful execution changes persisted roster state.
    pub fn will_modify_state(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::Edit(_)
                | Self::Delete(_)
                | Self::Mark(_)
                | Self::Unmark(_)
                | Self::Undo
        )
    }

    /// Validates against the current page and applies the command.
    ///
    /// `Undo` needs command history and is executed by
    /// [`crate::logic::manager::LogicManager`]; executing it here reports an
    /// empty history.
    pub fn execute(
        &self,
        roster: &mut Roster,
        selection: &mut CurrentSelection,
    ) -> Result<CommandResult, CommandError> {
        let message = match self {
            Self::Add(command) => add::execute(command, roster, selection)?,
            Self::Edit(command) => edit::execute(command, roster, selection)?,
            Self::Delete(command) => delete::execute(command, roster, selection)?,
            Self::Select(index) => navigate::select(*index, roster, selection)?,
            Self::Back => navigate::back(roster, selection)?,
            Self::Home => navigate::home(roster, selection),
            Self::Show(page) => navigate::show(*page, roster, selection)?,
            Self::Find(keywords) => filter::find(keywords, roster, selection)?,
            Self::List => filter::list(roster, selection)?,
            Self::Mark(index) => mark::execute(*index, true, roster, selection)?,
            Self::Unmark(index) => mark::execute(*index, false, roster, selection)?,
            Self::Undo => return Err(CommandError::NothingToUndo),
            Self::Help => MESSAGE_HELP.to_string(),
            Self::Exit => MESSAGE_EXIT.to_string(),
        };
        Ok(CommandResult::new(self.clone(), message))
    }
}

/// Outcome of one successful command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    command: Command,
    message: String,
    will_modify_state: bool,
}

impl CommandResult {
    pub fn new(command: Command, message: impl Into<String>) -> Self {
        let will_modify_state = command.will_modify_state();
        Self {
            command,
            message: message.into(),
            will_modify_state,
        }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// User-facing message, displayed verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn will_modify_state(&self) -> bool {
        self.will_modify_state
    }

    pub fn is_exit(&self) -> bool {
        self.command == Command::Exit
    }
}

/// Recoverable command failure. The roster is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Input text could not be turned into a command.
    Parse(ParseError),
    /// Command only runs on `required` page.
    WrongPage { required: PageType, action: String },
    /// Command has no meaning on the current page.
    UnsupportedOnPage {
        page: PageType,
        command: &'static str,
    },
    /// Index is outside the displayed list.
    InvalidIndex { kind: EntityKind, index: Index },
    /// A required selection is unset.
    NothingSelected(EntityKind),
    /// Uniqueness or existence violation from the target list.
    List(ListError),
    NothingToUndo,
}

impl CommandError {
    /// Stable metadata-only code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse_failure",
            Self::WrongPage { .. } | Self::UnsupportedOnPage { .. } => "wrong_context",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::NothingSelected(_) => "null_argument",
            Self::List(ListError::DuplicateEntity { .. }) => "duplicate_entity",
            Self::List(ListError::EntityNotFound { .. }) => "entity_not_found",
            Self::NothingToUndo => "nothing_to_undo",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::WrongPage { required, action } => {
                write!(f, "Wrong page. Navigate to {required} page to {action}")
            }
            Self::UnsupportedOnPage { page, command } => {
                write!(f, "`{command}` cannot be used on the {page} page")
            }
            Self::InvalidIndex { kind, index } => write!(
                f,
                "The {kind} index provided is invalid: {}",
                index.one_based()
            ),
            Self::NothingSelected(kind) => write!(f, "No {kind} is selected"),
            Self::List(err) => write!(f, "{err}"),
            Self::NothingToUndo => write!(f, "There is no command to undo"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::List(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ListError> for CommandError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

impl From<ParseError> for CommandError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}
