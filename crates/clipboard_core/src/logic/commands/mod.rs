//! Per-command execution logic.
//!
//! Each submodule validates page context, then the display index, then
//! domain rules, and only then performs its single list mutation.

pub(crate) mod add;
pub(crate) mod delete;
pub(crate) mod edit;
pub(crate) mod filter;
pub(crate) mod mark;
pub(crate) mod navigate;

use crate::logic::command::{CommandError, EntityKind, Index};
use crate::model::course::{Course, Group};
use crate::model::fields::{CourseCode, GroupName};
use crate::model::roster::Roster;
use crate::model::unique_list::{Entity, ListError, ListView};

/// Copies the entity shown at `index` so the roster can be borrowed mutably.
pub(crate) fn displayed_target<E: Entity>(
    view: ListView<'_, E>,
    index: Index,
    kind: EntityKind,
) -> Result<E, CommandError> {
    view.get(index.zero_based())
        .cloned()
        .ok_or(CommandError::InvalidIndex { kind, index })
}

pub(crate) fn selected_course<'a>(
    roster: &'a Roster,
    code: &CourseCode,
) -> Result<&'a Course, CommandError> {
    roster
        .course(code)
        .ok_or(CommandError::List(ListError::EntityNotFound {
            kind: Course::KIND,
        }))
}

pub(crate) fn selected_group<'a>(
    roster: &'a Roster,
    code: &CourseCode,
    name: &GroupName,
) -> Result<&'a Group, CommandError> {
    selected_course(roster, code)?
        .group(name)
        .ok_or(CommandError::List(ListError::EntityNotFound {
            kind: Group::KIND,
        }))
}
