//! `mark` / `unmark`: attendance on the attendance page, completion on the
//! task page.

use crate::logic::command::{CommandError, EntityKind, Index};
use crate::logic::commands::{displayed_target, selected_group};
use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::roster::Roster;
use crate::model::unique_list::Entity;

pub(crate) fn execute(
    index: Index,
    mark: bool,
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    match selection.page() {
        PageType::Attendance => {
            let (code, group_name, session_name) = selection.session_key()?;
            let group = selected_group(roster, code, group_name)?;
            let student =
                displayed_target(group.students.filtered(), index, EntityKind::Student)?;

            let changed = roster.update_session(code, group_name, session_name, |session| {
                let changed = if mark {
                    session.mark_present(&student.student_id)
                } else {
                    session.mark_absent(&student.student_id)
                };
                Ok::<_, CommandError>(changed)
            })?;

            let status = if mark { "present" } else { "absent" };
            Ok(if changed {
                format!("Marked {} as {status} for {session_name}", student.name)
            } else {
                format!("{} is already {status} for {session_name}", student.name)
            })
        }
        PageType::Task => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let task = displayed_target(group.tasks.filtered(), index, EntityKind::Task)?;

            roster.update_group(code, group_name, |group| {
                group.tasks.update_where(
                    |candidate| candidate.fully_equal(&task),
                    |candidate| {
                        candidate.done = mark;
                        Ok::<_, CommandError>(())
                    },
                )
            })?;

            let status = if mark { "done" } else { "not done" };
            Ok(format!("Marked task {} as {status}", task.name))
        }
        page => Err(CommandError::UnsupportedOnPage {
            page,
            command: if mark { "mark" } else { "unmark" },
        }),
    }
}
