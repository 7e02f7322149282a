//! Student record.

use crate::model::fields::{Email, Name, Phone, StudentId};
use crate::model::unique_list::Entity;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One student enrolled in a group.
///
/// Identity is the student ID alone; two records with the same ID but a
/// different phone number describe the same student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub student_id: StudentId,
}

impl Student {
    pub fn new(name: Name, phone: Phone, email: Email, student_id: StudentId) -> Self {
        Self {
            name,
            phone,
            email,
            student_id,
        }
    }

    /// Case-insensitive keyword match against name words and student ID.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name
            .as_str()
            .split_whitespace()
            .any(|word| word.eq_ignore_ascii_case(keyword))
            || self.student_id.as_str().eq_ignore_ascii_case(keyword)
    }
}

impl Entity for Student {
    const KIND: &'static str = "student";

    fn is_same(&self, other: &Self) -> bool {
        self.student_id == other.student_id
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Student ID: {}; Phone: {}; Email: {}",
            self.name, self.student_id, self.phone, self.email
        )
    }
}
