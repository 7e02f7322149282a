//! Validated value types for roster entity fields.
//!
//! # Invariants
//! - Every value is trimmed and satisfies its field pattern.
//! - Deserialization goes through the same validation as construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").expect("valid token regex"));

const NAME_CONSTRAINT: &str =
    "should only contain alphanumeric characters and spaces, and it should not be blank";
const PHONE_CONSTRAINT: &str = "should only contain numbers, and it should be at least 3 digits long";
const EMAIL_CONSTRAINT: &str =
    "should be of the format local-part@domain, where the domain ends with a label of at least 2 characters";
const TOKEN_CONSTRAINT: &str = "should not be blank or contain whitespace";

/// Field value rejected by its validation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub constraint: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid {} `{}`: {}", self.field, self.value, self.constraint)
    }
}

impl Error for FieldError {}

macro_rules! validated_field {
    ($(#[$meta:meta])* $ty:ident, $field:literal, $re:ident, $constraint:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            /// Trims and validates `value`.
            pub fn parse(value: impl AsRef<str>) -> Result<Self, FieldError> {
                let trimmed = value.as_ref().trim();
                if !$re.is_match(trimmed) {
                    return Err(FieldError {
                        field: $field,
                        value: trimmed.to_string(),
                        constraint: $constraint,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

validated_field!(
    /// Student full name.
    Name, "name", NAME_RE, NAME_CONSTRAINT
);
validated_field!(Phone, "phone", PHONE_RE, PHONE_CONSTRAINT);
validated_field!(Email, "email", EMAIL_RE, EMAIL_CONSTRAINT);
validated_field!(
    /// Matriculation number, e.g. `A0123456J`. Identity key of a student.
    StudentId, "student id", TOKEN_RE, TOKEN_CONSTRAINT
);
validated_field!(
    /// Course code, e.g. `CS2103T`. Identity key of a course.
    CourseCode, "course code", TOKEN_RE, TOKEN_CONSTRAINT
);
validated_field!(
    /// Tutorial or lab group name, e.g. `T01`. Identity key of a group.
    GroupName, "group name", TOKEN_RE, TOKEN_CONSTRAINT
);
validated_field!(
    /// Lesson name within a group, e.g. `Week1`. Identity key of a session.
    SessionName, "session name", TOKEN_RE, TOKEN_CONSTRAINT
);
validated_field!(
    /// Task name within a group, e.g. `Lab-1`. Identity key of a task.
    TaskName, "task name", TOKEN_RE, TOKEN_CONSTRAINT
);
