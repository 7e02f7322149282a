use crate::logic::command::{AddCommand, CommandError};
use crate::logic::selection::CurrentSelection;
use crate::model::roster::Roster;

pub(crate) fn execute(
    command: &AddCommand,
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    let kind = command.kind();
    selection.require_page(kind.page(), &format!("add {kind}"))?;

    match command {
        AddCommand::Course(course) => {
            roster.courses_mut().add(course.clone())?;
            Ok(format!("New course added: {course}"))
        }
        AddCommand::Group(group) => {
            let code = selection.course_key()?;
            roster.update_course(code, |course| course.groups.add(group.clone()))?;
            Ok(format!("New group added to {code}: {group}"))
        }
        AddCommand::Student(student) => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| {
                group.students.add(student.clone())
            })?;
            Ok(format!("New student added to {group_name}: {student}"))
        }
        AddCommand::Session(session) => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| {
                group.sessions.add(session.clone())
            })?;
            Ok(format!("New session added to {group_name}: {session}"))
        }
        AddCommand::Task(task) => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| group.tasks.add(task.clone()))?;
            Ok(format!("New task added to {group_name}: {}", task.name))
        }
    }
}
