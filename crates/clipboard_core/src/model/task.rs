//! Group task (assignment, lab, quiz).

use crate::model::fields::TaskName;
use crate::model::unique_list::Entity;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: TaskName,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Creates an open task.
    pub fn new(name: TaskName) -> Self {
        Self { name, done: false }
    }
}

impl Entity for Task {
    const KIND: &'static str = "task";

    fn is_same(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = if self.done { "x" } else { " " };
        write!(f, "[{marker}] {}", self.name)
    }
}
