//! Budget domain models.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::tasks::Task;

/// Domain model representing a budget.
///
/// `register` stays `None` until the budget's tasks are first written, then
/// keeps that first timestamp forever.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub uuid: String,
    pub project_uuid: String,
    pub register: Option<NaiveDateTime>,
}

impl Budget {
    pub fn is_registered(&self) -> bool {
        self.register.is_some()
    }
}

/// A budget with its planning tasks.
#[derive(Debug, Clone)]
pub struct BudgetWithTasks {
    pub budget: Budget,
    pub tasks: Vec<Task>,
}
