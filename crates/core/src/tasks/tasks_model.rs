//! Task domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::utils::deserialize_datetime;

/// Fields shared by planning and live rows. A mirror copies them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Fixed revenue for expense tasks, revenue per hour for activity tasks.
    pub revenue: Decimal,
    pub status_uuid: String,
    pub project_uuid: String,
    pub user_uuid: Option<String>,
}

/// The sub-record a task owns: exactly one of expense or activity.
///
/// An empty `uuid` marks a sub-record that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    Expense { uuid: String, amount: Decimal },
    Activity { uuid: String, hourly_rate: Decimal },
}

impl TaskKind {
    pub fn sub_uuid(&self) -> &str {
        match self {
            TaskKind::Expense { uuid, .. } | TaskKind::Activity { uuid, .. } => uuid,
        }
    }

    pub fn is_new(&self) -> bool {
        self.sub_uuid().is_empty()
    }

    pub fn same_type(&self, other: &TaskKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Same values, different sub-record identity.
    pub fn with_uuid(&self, uuid: &str) -> TaskKind {
        match self {
            TaskKind::Expense { amount, .. } => TaskKind::Expense {
                uuid: uuid.to_string(),
                amount: *amount,
            },
            TaskKind::Activity { hourly_rate, .. } => TaskKind::Activity {
                uuid: uuid.to_string(),
                hourly_rate: *hourly_rate,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Expense { .. } => "expense",
            TaskKind::Activity { .. } => "activity",
        }
    }
}

/// Where a task lives.
///
/// Planned rows belong to a budget; live rows are the trackable work of a
/// project. `origin` is a weak back-link to the planned row a live task was
/// mirrored from.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskStage {
    Planned { budget_uuid: String },
    Live { origin: Option<i32> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i32,
    pub uuid: String,
    pub stage: TaskStage,
    pub fields: TaskFields,
    pub kind: TaskKind,
}

impl Task {
    pub fn is_live(&self) -> bool {
        matches!(self.stage, TaskStage::Live { .. })
    }

    pub fn budget_uuid(&self) -> Option<&str> {
        match &self.stage {
            TaskStage::Planned { budget_uuid } => Some(budget_uuid),
            TaskStage::Live { .. } => None,
        }
    }

    pub fn origin(&self) -> Option<i32> {
        match self.stage {
            TaskStage::Live { origin } => origin,
            TaskStage::Planned { .. } => None,
        }
    }
}

/// Expense sub-record as submitted by clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskExpenseInput {
    #[serde(default)]
    pub uuid: String,
    pub amount: Decimal,
}

/// Activity sub-record as submitted by clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskActivityInput {
    #[serde(default)]
    pub uuid: String,
    pub hourly_rate: Decimal,
}

/// One entry of a submitted task list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub finished: bool,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub begin_date: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_date: NaiveDateTime,
    pub revenue: Decimal,
    pub status_uuid: String,
    pub project_uuid: String,
    #[serde(default)]
    pub user_uuid: Option<String>,
    #[serde(default)]
    pub budget_uuid: Option<String>,
    #[serde(default)]
    pub task_expense: Option<TaskExpenseInput>,
    #[serde(default)]
    pub task_activity: Option<TaskActivityInput>,
}

/// A validated task from a submitted list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub fields: TaskFields,
    pub budget_uuid: Option<String>,
    pub kind: TaskKind,
}

/// A task row to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub stage: TaskStage,
    pub fields: TaskFields,
    pub kind: TaskKind,
}

/// Insert of one task, optionally paired with its live mirror.
///
/// The mirror is inserted right after `task` and its origin is set to the id
/// `task` receives.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCreate {
    pub task: NewTask,
    pub mirror: Option<NewTask>,
}

/// In-place update of an existing task row and its sub-record.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub task_id: i32,
    pub fields: TaskFields,
    pub kind: TaskKind,
}

/// Sets `Budget.register` when it is still unset.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStamp {
    pub budget_uuid: String,
    pub at: NaiveDateTime,
}

/// Unit of work produced by the reconciliation planner.
///
/// Applied as a whole: creates, then updates, then deletes, all or nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPlan {
    pub stamp_budget: Option<BudgetStamp>,
    pub creates: Vec<TaskCreate>,
    pub updates: Vec<TaskUpdate>,
    /// Task ids to remove together with their sub-records.
    pub deletes: Vec<i32>,
    pub mirrors_skipped: usize,
}

impl TaskPlan {
    pub fn is_empty(&self) -> bool {
        self.stamp_budget.is_none()
            && self.creates.is_empty()
            && self.updates.is_empty()
            && self.deletes.is_empty()
    }

    pub fn report(&self) -> ReconcileReport {
        ReconcileReport {
            created: self
                .creates
                .iter()
                .map(|c| 1 + usize::from(c.mirror.is_some()))
                .sum(),
            updated: self.updates.len(),
            deleted: self.deletes.len(),
            mirrors_skipped: self.mirrors_skipped,
        }
    }
}

/// Row counts of an applied plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub mirrors_skipped: usize,
}

/// What to do when a planned task's live mirror is missing on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorPolicy {
    /// Skip the mirror and keep going; the live side drifts from the plan.
    #[default]
    Lenient,
    /// Fail the whole call without writing anything.
    Strict,
}

impl fmt::Display for MirrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorPolicy::Lenient => f.write_str("lenient"),
            MirrorPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for MirrorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(MirrorPolicy::Lenient),
            "strict" => Ok(MirrorPolicy::Strict),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown mirror policy '{}', expected 'lenient' or 'strict'",
                other
            ))
            .into()),
        }
    }
}
