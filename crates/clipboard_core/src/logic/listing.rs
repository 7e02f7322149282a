//! Plain-text rendering of the list shown on the current page.

use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::roster::Roster;
use crate::model::unique_list::ListView;
use std::fmt::Display;

/// Numbered lines (1-based) of the displayed list. Empty when the selection
/// no longer resolves against the roster.
pub fn page_listing(roster: &Roster, selection: &CurrentSelection) -> Vec<String> {
    match selection.page() {
        PageType::Course => numbered(roster.courses().filtered()),
        PageType::Group => selection
            .selected_course()
            .and_then(|code| roster.course(code))
            .map(|course| numbered(course.groups.filtered()))
            .unwrap_or_default(),
        PageType::Student | PageType::Session | PageType::Task => {
            let Some(group) = selection
                .group_key()
                .ok()
                .and_then(|(code, name)| roster.group(code, name))
            else {
                return Vec::new();
            };
            match selection.page() {
                PageType::Session => numbered(group.sessions.filtered()),
                PageType::Task => numbered(group.tasks.filtered()),
                _ => numbered(group.students.filtered()),
            }
        }
        PageType::Attendance => {
            let Ok((code, group_name, session_name)) = selection.session_key() else {
                return Vec::new();
            };
            let (Some(group), Some(session)) = (
                roster.group(code, group_name),
                roster.session(code, group_name, session_name),
            ) else {
                return Vec::new();
            };
            group
                .students
                .filtered()
                .iter()
                .enumerate()
                .map(|(position, student)| {
                    let mark = if session.is_present(&student.student_id) {
                        "present"
                    } else {
                        "absent"
                    };
                    format!(
                        "{}. {} ({}) [{mark}]",
                        position + 1,
                        student.name,
                        student.student_id
                    )
                })
                .collect()
        }
    }
}

fn numbered<E: Display>(view: ListView<'_, E>) -> Vec<String> {
    view.iter()
        .enumerate()
        .map(|(position, item)| format!("{}. {item}", position + 1))
        .collect()
}
