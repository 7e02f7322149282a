//! Edit commands.
//!
//! Replacement values are built from the parsed arguments plus the children
//! of the entity being replaced, then written with one `set_entity` call.

use crate::logic::command::{CommandError, EditCommand, EntityKind};
use crate::logic::commands::{displayed_target, selected_course, selected_group};
use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::roster::Roster;

pub(crate) fn execute(
    command: &EditCommand,
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    match command {
        EditCommand::Course { index, new_course } => {
            selection.require_page(PageType::Course, "edit course")?;
            let target =
                displayed_target(roster.courses().filtered(), *index, EntityKind::Course)?;

            let mut replacement = new_course.clone();
            replacement.groups.set_all(&target.groups);
            let message = format!("Edited course: {target} to {replacement}");
            roster.courses_mut().set_entity(&target, replacement)?;
            Ok(message)
        }
        EditCommand::Group { index, new_group } => {
            selection.require_page(PageType::Group, "edit group")?;
            let code = selection.course_key()?;
            let course = selected_course(roster, code)?;
            let target = displayed_target(course.groups.filtered(), *index, EntityKind::Group)?;

            let mut replacement = new_group.clone();
            replacement.adopt_children(&target);
            let message = format!("Edited group: {target} to {replacement}");
            roster.update_course(code, |course| course.groups.set_entity(&target, replacement))?;
            Ok(message)
        }
        EditCommand::Student { index, descriptor } => {
            selection.require_page(PageType::Student, "edit student")?;
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target =
                displayed_target(group.students.filtered(), *index, EntityKind::Student)?;

            let edited = descriptor.apply(&target);
            let message = format!("Edited student: {edited}");
            roster.update_group(code, group_name, |group| {
                let new_id = edited.student_id.clone();
                group.students.set_entity(&target, edited)?;
                group.reassign_attendance(&target.student_id, Some(&new_id))
            })?;
            Ok(message)
        }
        EditCommand::Session { index, new_session } => {
            selection.require_page(PageType::Session, "edit session")?;
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target =
                displayed_target(group.sessions.filtered(), *index, EntityKind::Session)?;

            let mut replacement = new_session.clone();
            replacement.present = target.present.clone();
            let message = format!("Edited session: {target} to {replacement}");
            roster.update_group(code, group_name, |group| {
                group.sessions.set_entity(&target, replacement)
            })?;
            Ok(message)
        }
        EditCommand::Task { index, new_task } => {
            selection.require_page(PageType::Task, "edit task")?;
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target = displayed_target(group.tasks.filtered(), *index, EntityKind::Task)?;

            let mut replacement = new_task.clone();
            replacement.done = target.done;
            let message = format!("Edited task: {} to {}", target.name, replacement.name);
            roster.update_group(code, group_name, |group| {
                group.tasks.set_entity(&target, replacement)
            })?;
            Ok(message)
        }
    }
}
