//! Display filters for the list shown on the current page.

use crate::logic::command::{CommandError, EntityKind};
use crate::logic::commands::{selected_course, selected_group};
use crate::logic::selection::{CurrentSelection, PageType};
use crate::model::roster::Roster;
use crate::model::unique_list::{Entity, UniqueList};
use std::sync::Arc;

pub(crate) fn find(
    keywords: &[String],
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    apply_page_filter(roster, selection, Some(keywords))?;
    let (shown, kind) = displayed_count(roster, selection)?;
    Ok(format!("{shown} {kind}(s) listed!"))
}

pub(crate) fn list(
    roster: &mut Roster,
    selection: &CurrentSelection,
) -> Result<String, CommandError> {
    apply_page_filter(roster, selection, None)?;
    let (shown, kind) = displayed_count(roster, selection)?;
    Ok(format!("Listed all {shown} {kind}(s)"))
}

/// Installs a keyword filter on the page's list, or clears it for `None`.
pub(crate) fn apply_page_filter(
    roster: &mut Roster,
    selection: &CurrentSelection,
    keywords: Option<&[String]>,
) -> Result<(), CommandError> {
    match selection.page() {
        PageType::Course => {
            install(roster.courses_mut(), keywords, |course, keyword| {
                contains_ignore_case(course.code.as_str(), keyword)
            });
            Ok(())
        }
        PageType::Group => {
            let code = selection.course_key()?;
            roster.update_course(code, |course| {
                install(&mut course.groups, keywords, |group, keyword| {
                    contains_ignore_case(group.name.as_str(), keyword)
                });
                Ok::<_, CommandError>(())
            })
        }
        PageType::Student | PageType::Attendance => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| {
                install(&mut group.students, keywords, |student, keyword| {
                    student.matches_keyword(keyword)
                });
                Ok::<_, CommandError>(())
            })
        }
        PageType::Session => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| {
                install(&mut group.sessions, keywords, |session, keyword| {
                    contains_ignore_case(session.name.as_str(), keyword)
                });
                Ok::<_, CommandError>(())
            })
        }
        PageType::Task => {
            let (code, group_name) = selection.group_key()?;
            roster.update_group(code, group_name, |group| {
                install(&mut group.tasks, keywords, |task, keyword| {
                    contains_ignore_case(task.name.as_str(), keyword)
                });
                Ok::<_, CommandError>(())
            })
        }
    }
}

/// Number of entries in the page's displayed list.
pub(crate) fn displayed_count(
    roster: &Roster,
    selection: &CurrentSelection,
) -> Result<(usize, EntityKind), CommandError> {
    let counted = match selection.page() {
        PageType::Course => (roster.courses().filtered().len(), EntityKind::Course),
        PageType::Group => {
            let course = selected_course(roster, selection.course_key()?)?;
            (course.groups.filtered().len(), EntityKind::Group)
        }
        page => {
            let (code, group_name) = selection.group_key()?;
            let group = selected_group(roster, code, group_name)?;
            match page {
                PageType::Session => (group.sessions.filtered().len(), EntityKind::Session),
                PageType::Task => (group.tasks.filtered().len(), EntityKind::Task),
                _ => (group.students.filtered().len(), EntityKind::Student),
            }
        }
    };
    Ok(counted)
}

fn install<E: Entity + 'static>(
    list: &mut UniqueList<E>,
    keywords: Option<&[String]>,
    matches: fn(&E, &str) -> bool,
) {
    match keywords {
        None => list.clear_filter(),
        Some(keywords) => {
            let keywords = keywords.to_vec();
            list.set_filter(Arc::new(move |item: &E| {
                keywords.iter().any(|keyword| matches(item, keyword))
            }));
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
