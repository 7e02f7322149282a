//! Command loop driver owning the roster, the page selection and undo history.
//!
//! # Responsibility
//! - Parse input, execute the command, persist when the command modifies state.
//! - Keep per-session undo history of state-modifying commands.
//!
//! # Invariants
//! - History only grows on successful state-modifying commands that
//!   actually changed the roster.
//! - A snapshot is saved after every such command and after `undo`; a
//!   state-modifying command that left the roster as it was (e.g. marking a
//!   student already present) is neither saved nor undoable.

use crate::logic::command::{Command, CommandError, CommandResult};
use crate::logic::listing::page_listing;
use crate::logic::parser::parse_command;
use crate::logic::selection::CurrentSelection;
use crate::model::roster::Roster;
use crate::repo::snapshot_repo::{SnapshotError, SnapshotRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Oldest entries are dropped beyond this depth.
pub const MAX_UNDO_DEPTH: usize = 50;

#[derive(Debug)]
pub enum LogicError {
    /// User-correctable command failure; nothing was changed.
    Command(CommandError),
    /// The command succeeded in memory but the snapshot could not be saved.
    Storage(SnapshotError),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "Could not save data: {err}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Command(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<CommandError> for LogicError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

impl From<SnapshotError> for LogicError {
    fn from(value: SnapshotError) -> Self {
        Self::Storage(value)
    }
}

struct HistoryEntry {
    command_word: &'static str,
    roster: Roster,
    selection: CurrentSelection,
}

pub struct LogicManager<R: SnapshotRepository> {
    repo: R,
    roster: Roster,
    selection: CurrentSelection,
    history: Vec<HistoryEntry>,
}

impl<R: SnapshotRepository> LogicManager<R> {
    /// Loads the last saved roster, or starts empty when none exists.
    pub fn new(repo: R) -> Result<Self, SnapshotError> {
        let roster = repo.load_snapshot()?.unwrap_or_default();
        info!(
            "event=roster_load module=logic status=ok courses={}",
            roster.courses().len()
        );
        Ok(Self {
            repo,
            roster,
            selection: CurrentSelection::new(),
            history: Vec::new(),
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selection(&self) -> &CurrentSelection {
        &self.selection
    }

    /// Numbered lines of the list displayed on the current page.
    pub fn page_listing(&self) -> Vec<String> {
        page_listing(&self.roster, &self.selection)
    }

    /// Parses and executes one input line.
    pub fn execute(&mut self, input: &str) -> Result<CommandResult, LogicError> {
        let command = parse_command(input).map_err(|err| {
            warn!("event=command_parse module=logic status=error error_code=parse_failure");
            CommandError::from(err)
        })?;
        self.execute_command(command)
    }

    pub fn execute_command(&mut self, command: Command) -> Result<CommandResult, LogicError> {
        let started_at = Instant::now();
        let command_word = command.command_word();

        let outcome = if command == Command::Undo {
            self.undo().map(|result| (result, true))
        } else {
            self.execute_recorded(command)
        };

        let (result, changed) = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "event=command_execute module=logic status=rejected command={} error_code={} duration_ms={}",
                    command_word,
                    err.code(),
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        if changed {
            if let Err(err) = self.repo.save_snapshot(&self.roster) {
                error!(
                    "event=snapshot_save module=logic status=error command={} error={}",
                    command_word, err
                );
                return Err(err.into());
            }
        }

        info!(
            "event=command_execute module=logic status=ok command={} modified={} page={} duration_ms={}",
            command_word,
            changed,
            self.selection.page(),
            started_at.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Returns the result and whether the roster changed.
    fn execute_recorded(
        &mut self,
        command: Command,
    ) -> Result<(CommandResult, bool), CommandError> {
        let before = command
            .will_modify_state()
            .then(|| (self.roster.clone(), self.selection.clone()));

        let result = command.execute(&mut self.roster, &mut self.selection)?;

        let Some((roster, selection)) = before else {
            return Ok((result, false));
        };
        if roster == self.roster {
            return Ok((result, false));
        }

        if self.history.len() == MAX_UNDO_DEPTH {
            self.history.remove(0);
        }
        self.history.push(HistoryEntry {
            command_word: command.command_word(),
            roster,
            selection,
        });
        Ok((result, true))
    }

    fn undo(&mut self) -> Result<CommandResult, CommandError> {
        let entry = self.history.pop().ok_or(CommandError::NothingToUndo)?;
        self.roster = entry.roster;
        self.selection = entry.selection;
        Ok(CommandResult::new(
            Command::Undo,
            format!("Undid command: {}", entry.command_word),
        ))
    }
}
