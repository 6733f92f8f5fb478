//! Realization domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::deserialize_datetime;

/// What was actually spent or worked.
#[derive(Debug, Clone, PartialEq)]
pub enum DoneKind {
    Expense {
        uuid: String,
        amount: Decimal,
        date: NaiveDateTime,
        supplier_uuid: Option<String>,
    },
    Activity {
        uuid: String,
        begin_date: NaiveDateTime,
        end_date: NaiveDateTime,
        hourly_rate: Decimal,
    },
}

impl DoneKind {
    pub fn sub_uuid(&self) -> &str {
        match self {
            DoneKind::Expense { uuid, .. } | DoneKind::Activity { uuid, .. } => uuid,
        }
    }
}

/// A realization event recorded against one live task.
#[derive(Debug, Clone, PartialEq)]
pub struct Done {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub user_uuid: String,
    pub task_id: i32,
    pub register: NaiveDateTime,
    pub kind: DoneKind,
}

/// A realization row to insert, already resolved to its task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDone {
    pub name: String,
    pub description: String,
    pub user_uuid: String,
    pub task_id: i32,
    pub kind: DoneKind,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoneExpenseInput {
    /// Uuid of the task's expense sub-record.
    pub task_uuid: String,
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub supplier_uuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoneActivityInput {
    /// Uuid of the task's activity sub-record.
    pub task_uuid: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub begin_date: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end_date: NaiveDateTime,
    pub hourly_rate: Decimal,
}

/// Request to record a realization.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DoneInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_uuid: String,
    #[serde(default)]
    pub done_expense: Option<DoneExpenseInput>,
    #[serde(default)]
    pub done_activity: Option<DoneActivityInput>,
}
