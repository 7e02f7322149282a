//! Root of the in-memory object model.
//!
//! # Responsibility
//! - Own every course and, through them, all nested collections.
//! - Resolve identity keys held by the page selection into entities.
//! - Apply nested edits copy-on-write so a failed edit changes nothing.

use crate::model::course::{Course, Group, Session};
use crate::model::fields::{CourseCode, GroupName, SessionName};
use crate::model::unique_list::{ListError, UniqueList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    courses: UniqueList<Course>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn courses(&self) -> &UniqueList<Course> {
        &self.courses
    }

    pub fn courses_mut(&mut self) -> &mut UniqueList<Course> {
        &mut self.courses
    }

    pub fn has_course(&self, course: &Course) -> bool {
        self.courses.contains(course)
    }

    pub fn course(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.iter().find(|course| &course.code == code)
    }

    pub fn group(&self, code: &CourseCode, name: &GroupName) -> Option<&Group> {
        self.course(code)?.group(name)
    }

    pub fn session(
        &self,
        code: &CourseCode,
        group: &GroupName,
        session: &SessionName,
    ) -> Option<&Session> {
        self.group(code, group)?.session(session)
    }

    /// Edits the course identified by `code`.
    pub fn update_course<R, E>(
        &mut self,
        code: &CourseCode,
        edit: impl FnOnce(&mut Course) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<ListError>,
    {
        self.courses.update_where(|course| &course.code == code, edit)
    }

    /// Edits one group of the course identified by `code`.
    pub fn update_group<R, E>(
        &mut self,
        code: &CourseCode,
        group: &GroupName,
        edit: impl FnOnce(&mut Group) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<ListError>,
    {
        self.update_course(code, |course| {
            course
                .groups
                .update_where(|candidate| &candidate.name == group, edit)
        })
    }

    /// Edits one session of a group.
    pub fn update_session<R, E>(
        &mut self,
        code: &CourseCode,
        group: &GroupName,
        session: &SessionName,
        edit: impl FnOnce(&mut Session) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<ListError>,
    {
        self.update_group(code, group, |candidate| {
            candidate
                .sessions
                .update_where(|item| &item.name == session, edit)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use crate::model::course::{Course, Group};
    use crate::model::fields::{CourseCode, GroupName};
    use crate::model::unique_list::ListError;

    fn code(value: &str) -> CourseCode {
        CourseCode::parse(value).unwrap()
    }

    fn group_name(value: &str) -> GroupName {
        GroupName::parse(value).unwrap()
    }

    #[test]
    fn failed_nested_edit_leaves_roster_unchanged() {
        let mut roster = Roster::new();
        let mut course = Course::new(code("CS2103T"));
        course.groups.add(Group::new(group_name("T01"))).unwrap();
        course.groups.add(Group::new(group_name("T02"))).unwrap();
        roster.courses_mut().add(course).unwrap();
        let before = roster.clone();

        let err = roster
            .update_group(&code("CS2103T"), &group_name("T02"), |group| {
                group.name = group_name("T01");
                Ok::<_, ListError>(())
            })
            .expect_err("rename onto sibling must fail");

        assert_eq!(err, ListError::DuplicateEntity { kind: "group" });
        assert_eq!(roster, before);
    }

    #[test]
    fn update_on_missing_course_reports_not_found() {
        let mut roster = Roster::new();
        let err = roster
            .update_course(&code("CS1010"), |_| Ok::<_, ListError>(()))
            .expect_err("missing course");
        assert_eq!(err, ListError::EntityNotFound { kind: "course" });
    }
}
