use crate::logic::command::{CommandError, DeleteCommand, EntityKind};
use crate::logic::commands::{displayed_target, selected_course, selected_group};
use crate::logic::selection::CurrentSelection;
use crate::model::roster::Roster;

/// Removes the entity shown at the index. Removal matches by full equality.
pub(crate) fn execute(
    command: &DeleteCommand,
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    let DeleteCommand { kind, index } = *command;
    selection.require_page(kind.page(), &format!("delete {kind}"))?;

    match kind {
        EntityKind::Course => {
            let target = displayed_target(roster.courses().filtered(), index, kind)?;
            roster.courses_mut().remove(&target)?;
            Ok(format!("Deleted course: {target}"))
        }
        EntityKind::Group => {
            let code = selection.course_key()?;
            let course = selected_course(roster, code)?;
            let target = displayed_target(course.groups.filtered(), index, kind)?;
            roster.update_course(code, |course| course.groups.remove(&target))?;
            Ok(format!("Deleted group: {target}"))
        }
        EntityKind::Student => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target = displayed_target(group.students.filtered(), index, kind)?;
            roster.update_group(code, group_name, |group| {
                group.students.remove(&target)?;
                group.reassign_attendance(&target.student_id, None)
            })?;
            Ok(format!("Deleted student: {target}"))
        }
        EntityKind::Session => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target = displayed_target(group.sessions.filtered(), index, kind)?;
            roster.update_group(code, group_name, |group| group.sessions.remove(&target))?;
            Ok(format!("Deleted session: {target}"))
        }
        EntityKind::Task => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let target = displayed_target(group.tasks.filtered(), index, kind)?;
            roster.update_group(code, group_name, |group| group.tasks.remove(&target))?;
            Ok(format!("Deleted task: {}", target.name))
        }
    }
}
