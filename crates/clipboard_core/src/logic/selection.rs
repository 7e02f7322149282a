//! Current page and selected entities.
//!
//! # Invariants
//! - `Course` page: nothing selected.
//! - `Group` page: a course is selected.
//! - `Student`, `Session`, `Task` pages: a course and a group are selected.
//! - `Attendance` page: course, group and session are selected.
//! - Selections are identity keys resolved against the roster on each use.

use crate::logic::command::{CommandError, EntityKind};
use crate::model::fields::{CourseCode, GroupName, SessionName};
use std::fmt::{Display, Formatter};

/// Navigation scope gating which commands are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    /// Home page listing all courses.
    Course,
    /// Groups of the selected course.
    Group,
    /// Students of the selected group.
    Student,
    /// Sessions of the selected group.
    Session,
    /// Tasks of the selected group.
    Task,
    /// Students of the selected group with their presence in the selected session.
    Attendance,
}

impl PageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Group => "group",
            Self::Student => "student",
            Self::Session => "session",
            Self::Task => "task",
            Self::Attendance => "attendance",
        }
    }
}

impl Display for PageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSelection {
    page: PageType,
    course: Option<CourseCode>,
    group: Option<GroupName>,
    session: Option<SessionName>,
}

impl Default for CurrentSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrentSelection {
    /// Starts on the home page with nothing selected.
    pub fn new() -> Self {
        Self {
            page: PageType::Course,
            course: None,
            group: None,
            session: None,
        }
    }

    pub fn page(&self) -> PageType {
        self.page
    }

    pub fn selected_course(&self) -> Option<&CourseCode> {
        self.course.as_ref()
    }

    pub fn selected_group(&self) -> Option<&GroupName> {
        self.group.as_ref()
    }

    pub fn selected_session(&self) -> Option<&SessionName> {
        self.session.as_ref()
    }

    /// Fails with a wrong-page error unless the current page is `required`.
    pub fn require_page(&self, required: PageType, action: &str) -> Result<(), CommandError> {
        if self.page != required {
            return Err(CommandError::WrongPage {
                required,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    pub fn course_key(&self) -> Result<&CourseCode, CommandError> {
        self.course
            .as_ref()
            .ok_or(CommandError::NothingSelected(EntityKind::Course))
    }

    /// Selected course and group keys.
    pub fn group_key(&self) -> Result<(&CourseCode, &GroupName), CommandError> {
        let course = self.course_key()?;
        let group = self
            .group
            .as_ref()
            .ok_or(CommandError::NothingSelected(EntityKind::Group))?;
        Ok((course, group))
    }

    /// Selected course, group and session keys.
    pub fn session_key(&self) -> Result<(&CourseCode, &GroupName, &SessionName), CommandError> {
        let (course, group) = self.group_key()?;
        let session = self
            .session
            .as_ref()
            .ok_or(CommandError::NothingSelected(EntityKind::Session))?;
        Ok((course, group, session))
    }

    pub(crate) fn enter_course(&mut self, code: CourseCode) {
        self.page = PageType::Group;
        self.course = Some(code);
        self.group = None;
        self.session = None;
    }

    pub(crate) fn enter_group(&mut self, name: GroupName) {
        self.page = PageType::Student;
        self.group = Some(name);
        self.session = None;
    }

    pub(crate) fn enter_session(&mut self, name: SessionName) {
        self.page = PageType::Attendance;
        self.session = Some(name);
    }

    /// Switches between the pages of the selected group.
    pub(crate) fn show_group_page(&mut self, page: PageType) {
        self.page = page;
        self.session = None;
    }

    /// Moves one level up. Returns false when already on the home page.
    pub(crate) fn go_back(&mut self) -> bool {
        match self.page {
            PageType::Course => return false,
            PageType::Group => {
                self.course = None;
                self.page = PageType::Course;
            }
            PageType::Student | PageType::Session | PageType::Task => {
                self.group = None;
                self.page = PageType::Group;
            }
            PageType::Attendance => {
                self.session = None;
                self.page = PageType::Session;
            }
        }
        true
    }

    pub(crate) fn go_home(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::{CurrentSelection, PageType};
    use crate::model::fields::{CourseCode, GroupName, SessionName};

    #[test]
    fn back_from_attendance_returns_to_session_page() {
        let mut selection = CurrentSelection::new();
        selection.enter_course(CourseCode::parse("CS2103T").unwrap());
        selection.enter_group(GroupName::parse("T01").unwrap());
        selection.show_group_page(PageType::Session);
        selection.enter_session(SessionName::parse("Lab1").unwrap());

        assert!(selection.go_back());
        assert_eq!(selection.page(), PageType::Session);
        assert!(selection.selected_session().is_none());
        assert!(selection.selected_group().is_some());
    }

    #[test]
    fn back_on_home_page_is_rejected() {
        let mut selection = CurrentSelection::new();
        assert!(!selection.go_back());
        assert_eq!(selection, CurrentSelection::new());
    }
}
