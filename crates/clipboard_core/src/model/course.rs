//! Course hierarchy: courses own groups, groups own students, sessions and
//! tasks.
//!
//! # Invariants
//! - Identity keys: course code, group name, session name.
//! - Full equality includes every owned child collection.
//! - Session attendance refers to students by `StudentId` and follows the
//!   group's students through ID edits and deletions.

use crate::model::fields::{CourseCode, GroupName, SessionName, StudentId};
use crate::model::student::Student;
use crate::model::task::Task;
use crate::model::unique_list::{Entity, ListError, UniqueList};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    #[serde(default)]
    pub groups: UniqueList<Group>,
}

impl Course {
    pub fn new(code: CourseCode) -> Self {
        Self {
            code,
            groups: UniqueList::new(),
        }
    }

    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.contains(group)
    }

    pub fn group(&self, name: &GroupName) -> Option<&Group> {
        self.groups.iter().find(|group| &group.name == name)
    }
}

impl Entity for Course {
    const KIND: &'static str = "course";

    fn is_same(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: GroupName,
    #[serde(default)]
    pub students: UniqueList<Student>,
    #[serde(default)]
    pub sessions: UniqueList<Session>,
    #[serde(default)]
    pub tasks: UniqueList<Task>,
}

impl Group {
    pub fn new(name: GroupName) -> Self {
        Self {
            name,
            students: UniqueList::new(),
            sessions: UniqueList::new(),
            tasks: UniqueList::new(),
        }
    }

    /// Copies every child collection of `previous` onto this group.
    ///
    /// Used when a group is renamed: the replacement keeps the roster,
    /// sessions and tasks of the group it replaces.
    pub fn adopt_children(&mut self, previous: &Group) {
        self.students.set_all(&previous.students);
        self.sessions.set_all(&previous.sessions);
        self.tasks.set_all(&previous.tasks);
    }

    pub fn session(&self, name: &SessionName) -> Option<&Session> {
        self.sessions.iter().find(|session| &session.name == name)
    }

    /// Moves attendance recorded under `from` to `to` in every session, or
    /// drops it when `to` is `None`.
    pub fn reassign_attendance(
        &mut self,
        from: &StudentId,
        to: Option<&StudentId>,
    ) -> Result<(), ListError> {
        let sessions: Vec<Session> = self
            .sessions
            .iter()
            .cloned()
            .map(|mut session| {
                if session.mark_absent(from) {
                    if let Some(to) = to {
                        session.mark_present(to);
                    }
                }
                session
            })
            .collect();
        self.sessions.replace_all(sessions)
    }
}

impl Entity for Group {
    const KIND: &'static str = "group";

    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One lesson occurrence with its attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: SessionName,
    #[serde(default)]
    pub present: BTreeSet<StudentId>,
}

impl Session {
    pub fn new(name: SessionName) -> Self {
        Self {
            name,
            present: BTreeSet::new(),
        }
    }

    /// Returns false when the student was already marked present.
    pub fn mark_present(&mut self, student_id: &StudentId) -> bool {
        self.present.insert(student_id.clone())
    }

    /// Returns false when the student was not marked present.
    pub fn mark_absent(&mut self, student_id: &StudentId) -> bool {
        self.present.remove(student_id)
    }

    pub fn is_present(&self, student_id: &StudentId) -> bool {
        self.present.contains(student_id)
    }
}

impl Entity for Session {
    const KIND: &'static str = "session";

    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Group, Session};
    use crate::model::fields::{GroupName, SessionName, StudentId};

    #[test]
    fn adopt_children_copies_sessions_onto_renamed_group() {
        let mut original = Group::new(GroupName::parse("T01").unwrap());
        original
            .sessions
            .add(Session::new(SessionName::parse("Lab1").unwrap()))
            .unwrap();

        let mut renamed = Group::new(GroupName::parse("T02").unwrap());
        renamed.adopt_children(&original);

        assert_eq!(renamed.sessions, original.sessions);
        assert_eq!(renamed.name.as_str(), "T02");
    }

    #[test]
    fn reassign_attendance_follows_student_id_changes() {
        let old_id = StudentId::parse("A0000001X").unwrap();
        let new_id = StudentId::parse("A0000009X").unwrap();
        let mut group = Group::new(GroupName::parse("T01").unwrap());
        let mut week1 = Session::new(SessionName::parse("Week1").unwrap());
        week1.mark_present(&old_id);
        group.sessions.add(week1).unwrap();
        group
            .sessions
            .add(Session::new(SessionName::parse("Week2").unwrap()))
            .unwrap();

        group.reassign_attendance(&old_id, Some(&new_id)).unwrap();
        let week1 = group.session(&SessionName::parse("Week1").unwrap()).unwrap();
        assert!(week1.is_present(&new_id));
        assert!(!week1.is_present(&old_id));
        let week2 = group.session(&SessionName::parse("Week2").unwrap()).unwrap();
        assert!(!week2.is_present(&new_id));

        group.reassign_attendance(&new_id, None).unwrap();
        assert!(group.sessions.iter().all(|session| session.present.is_empty()));
    }

    #[test]
    fn marking_attendance_twice_reports_no_change() {
        let mut session = Session::new(SessionName::parse("Tutorial1").unwrap());
        let id = StudentId::parse("A0123456J").unwrap();

        assert!(session.mark_present(&id));
        assert!(!session.mark_present(&id));
        assert!(session.is_present(&id));
        assert!(session.mark_absent(&id));
        assert!(!session.is_present(&id));
    }
}
