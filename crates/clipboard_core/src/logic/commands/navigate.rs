//! Page navigation. Entering a page clears the display filter of its list.

use crate::logic::command::{CommandError, EntityKind, Index};
use crate::logic::commands::filter::apply_page_filter;
use crate::logic::commands::{displayed_target, selected_course, selected_group};
use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::roster::Roster;

pub(crate) fn select(
    index: Index,
    roster: &mut Roster,
    selection: &mut CurrentSelection,
) -> Result<String, CommandError> {
    let mut next = selection.clone();
    let message = match selection.page() {
        PageType::Course => {
            let course =
                displayed_target(roster.courses().filtered(), index, EntityKind::Course)?;
            next.enter_course(course.code.clone());
            format!("Selected course: {course}")
        }
        PageType::Group => {
            let course = selected_course(roster, selection.course_key()?)?;
            let group = displayed_target(course.groups.filtered(), index, EntityKind::Group)?;
            next.enter_group(group.name.clone());
            format!("Selected group: {group}")
        }
        PageType::Session => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            let session =
                displayed_target(group.sessions.filtered(), index, EntityKind::Session)?;
            next.enter_session(session.name.clone());
            format!("Selected session: {session}")
        }
        page => {
            return Err(CommandError::UnsupportedOnPage {
                page,
                command: "select",
            })
        }
    };

    commit(roster, selection, next)?;
    Ok(message)
}

pub(crate) fn back(
    roster: &mut Roster,
    selection: &mut CurrentSelection,
) -> Result<String, CommandError> {
    let mut next = selection.clone();
    if !next.go_back() {
        return Err(CommandError::UnsupportedOnPage {
            page: selection.page(),
            command: "back",
        });
    }
    let message = format!("Returned to {} page", next.page());
    commit(roster, selection, next)?;
    Ok(message)
}

pub(crate) fn home(roster: &mut Roster, selection: &mut CurrentSelection) -> String {
    selection.go_home();
    roster.courses_mut().clear_filter();
    "Returned to home page".to_string()
}

/// Switches to the student, session or task page of the selected group.
pub(crate) fn show(
    page: PageType,
    roster: &mut Roster,
    selection: &mut CurrentSelection,
) -> Result<String, CommandError> {
    let (code, group_name) = selection.group_key()?;
    selected_group(roster, code, group_name)?;
    let message = format!("Showing {page}s of {group_name}");

    let mut next = selection.clone();
    next.show_group_page(page);
    commit(roster, selection, next)?;
    Ok(message)
}

fn commit(
    roster: &mut Roster,
    selection: &mut CurrentSelection,
    next: CurrentSelection,
) -> Result<(), CommandError> {
    apply_page_filter(roster, &next, None)?;
    *selection = next;
    Ok(())
}
