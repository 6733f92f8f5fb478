//! Database models for tasks.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetflow_core::tasks::{NewTask, Task, TaskFields, TaskKind, TaskStage};

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskDB {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub revenue: String,
    pub status_uuid: String,
    pub project_uuid: String,
    pub user_uuid: Option<String>,
    pub budget_uuid: Option<String>,
    pub original_task_id: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTaskDB {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub revenue: String,
    pub status_uuid: String,
    pub project_uuid: String,
    pub user_uuid: Option<String>,
    pub budget_uuid: Option<String>,
    pub original_task_id: Option<i32>,
}

/// Columns a reconciliation update rewrites. Stage and origin never change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesDB {
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub revenue: String,
    pub status_uuid: String,
    pub user_uuid: Option<String>,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::task_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskExpenseDB {
    pub uuid: String,
    pub task_id: i32,
    pub amount: String,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::task_activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskActivityDB {
    pub uuid: String,
    pub task_id: i32,
    pub hourly_rate: String,
}

impl NewTaskDB {
    /// `origin` overrides the live origin carried by `task`; mirrors only
    /// learn their planned task's id at insert time.
    pub fn new(task: &NewTask, origin: Option<i32>) -> Self {
        let (budget_uuid, original_task_id) = match &task.stage {
            TaskStage::Planned { budget_uuid } => (Some(budget_uuid.clone()), None),
            TaskStage::Live { origin: carried } => (None, origin.or(*carried)),
        };
        let fields = &task.fields;
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            finished: fields.finished,
            begin_date: fields.begin_date,
            end_date: fields.end_date,
            revenue: fields.revenue.to_string(),
            status_uuid: fields.status_uuid.clone(),
            project_uuid: fields.project_uuid.clone(),
            user_uuid: fields.user_uuid.clone(),
            budget_uuid,
            original_task_id,
        }
    }
}

impl From<&TaskFields> for TaskChangesDB {
    fn from(fields: &TaskFields) -> Self {
        Self {
            name: fields.name.clone(),
            description: fields.description.clone(),
            finished: fields.finished,
            begin_date: fields.begin_date,
            end_date: fields.end_date,
            revenue: fields.revenue.to_string(),
            status_uuid: fields.status_uuid.clone(),
            user_uuid: fields.user_uuid.clone(),
        }
    }
}

impl TaskExpenseDB {
    pub fn into_kind(self) -> TaskKind {
        TaskKind::Expense {
            amount: parse_decimal(&self.amount, "task_expenses.amount"),
            uuid: self.uuid,
        }
    }
}

impl TaskActivityDB {
    pub fn into_kind(self) -> TaskKind {
        TaskKind::Activity {
            hourly_rate: parse_decimal(&self.hourly_rate, "task_activities.hourly_rate"),
            uuid: self.uuid,
        }
    }
}

impl TaskDB {
    pub fn into_task(self, kind: TaskKind) -> Task {
        let stage = match self.budget_uuid {
            Some(budget_uuid) => TaskStage::Planned { budget_uuid },
            None => TaskStage::Live {
                origin: self.original_task_id,
            },
        };
        Task {
            id: self.id,
            uuid: self.uuid,
            stage,
            fields: TaskFields {
                name: self.name,
                description: self.description,
                finished: self.finished,
                begin_date: self.begin_date,
                end_date: self.end_date,
                revenue: parse_decimal(&self.revenue, "tasks.revenue"),
                status_uuid: self.status_uuid,
                project_uuid: self.project_uuid,
                user_uuid: self.user_uuid,
            },
            kind,
        }
    }
}
