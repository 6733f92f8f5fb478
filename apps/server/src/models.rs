//! Wire models. Read views keep raw numbers and ISO dates except where a
//! listing is meant for display (`BudgetView`, `ProjectView`), which carries
//! BRL strings and `dd/MM/yy HH:mm` dates.

use budgetflow_core::{
    auth::Capability,
    budgets::{Budget, BudgetWithTasks},
    dones::{Done, DoneKind},
    errors::ValidationError,
    projects::{Project, ProjectSummary},
    reporting::{DateRange, Totals, TxTotals},
    tasks::{Task, TaskInput, TaskKind},
    users::NewUser,
    utils::{format_brl, format_datetime},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct MessageResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub project_uuid: Option<String>,
}

impl ProjectQuery {
    pub fn require(&self) -> budgetflow_core::Result<&str> {
        self.project_uuid
            .as_deref()
            .map(str::trim)
            .filter(|uuid| !uuid.is_empty())
            .ok_or_else(|| ValidationError::MissingField("projectUuid".to_string()).into())
    }
}

#[derive(Deserialize, Debug)]
pub struct BudgetTasksRequest {
    pub uuid: String,
    pub tasks: Vec<TaskInput>,
}

#[derive(Deserialize, Debug)]
pub struct ProjectTasksRequest {
    pub tasks: Vec<TaskInput>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    #[serde(default)]
    pub auth: Capability,
}

impl NewUserRequest {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name,
            username: self.username,
            email: self.email,
            password_hash,
            auth: self.auth,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    pub project: Project,
    pub budget: Budget,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskExpenseView {
    pub uuid: String,
    pub amount: Decimal,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskActivityView {
    pub uuid: String,
    pub hourly_rate: Decimal,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub revenue: Decimal,
    pub status_uuid: String,
    pub project_uuid: String,
    pub user_uuid: Option<String>,
    pub budget_uuid: Option<String>,
    pub original_task_id: Option<i32>,
    pub task_expense: Option<TaskExpenseView>,
    pub task_activity: Option<TaskActivityView>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let budget_uuid = task.budget_uuid().map(str::to_string);
        let original_task_id = task.origin();
        let (task_expense, task_activity) = match task.kind {
            TaskKind::Expense { uuid, amount } => (Some(TaskExpenseView { uuid, amount }), None),
            TaskKind::Activity { uuid, hourly_rate } => {
                (None, Some(TaskActivityView { uuid, hourly_rate }))
            }
        };
        let fields = task.fields;
        Self {
            id: task.id,
            uuid: task.uuid,
            name: fields.name,
            description: fields.description,
            finished: fields.finished,
            begin_date: fields.begin_date,
            end_date: fields.end_date,
            revenue: fields.revenue,
            status_uuid: fields.status_uuid,
            project_uuid: fields.project_uuid,
            user_uuid: fields.user_uuid,
            budget_uuid,
            original_task_id,
            task_expense,
            task_activity,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetExpenseView {
    pub uuid: String,
    pub amount: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetActivityView {
    pub uuid: String,
    pub hourly_rate: String,
}

/// A planning task formatted for display.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTaskView {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub begin_date: String,
    pub end_date: String,
    pub revenue: String,
    pub status_uuid: String,
    pub project_uuid: String,
    pub user_uuid: Option<String>,
    pub budget_uuid: Option<String>,
    pub task_expense: Option<BudgetExpenseView>,
    pub task_activity: Option<BudgetActivityView>,
}

impl From<Task> for BudgetTaskView {
    fn from(task: Task) -> Self {
        let budget_uuid = task.budget_uuid().map(str::to_string);
        let (task_expense, task_activity) = match task.kind {
            TaskKind::Expense { uuid, amount } => (
                Some(BudgetExpenseView {
                    uuid,
                    amount: format_brl(amount),
                }),
                None,
            ),
            TaskKind::Activity { uuid, hourly_rate } => (
                None,
                Some(BudgetActivityView {
                    uuid,
                    hourly_rate: format_brl(hourly_rate),
                }),
            ),
        };
        let fields = task.fields;
        Self {
            id: task.id,
            uuid: task.uuid,
            name: fields.name,
            description: fields.description,
            finished: fields.finished,
            begin_date: format_datetime(fields.begin_date),
            end_date: format_datetime(fields.end_date),
            revenue: format_brl(fields.revenue),
            status_uuid: fields.status_uuid,
            project_uuid: fields.project_uuid,
            user_uuid: fields.user_uuid,
            budget_uuid,
            task_expense,
            task_activity,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    pub uuid: String,
    pub project_uuid: String,
    pub register: Option<String>,
    pub tasks: Vec<BudgetTaskView>,
}

impl From<BudgetWithTasks> for BudgetView {
    fn from(value: BudgetWithTasks) -> Self {
        Self {
            uuid: value.budget.uuid,
            project_uuid: value.budget.project_uuid,
            register: value.budget.register.map(format_datetime),
            tasks: value.tasks.into_iter().map(BudgetTaskView::from).collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TotalsView {
    pub total: String,
    pub cost: String,
    pub revenue: String,
}

impl From<Totals> for TotalsView {
    fn from(t: Totals) -> Self {
        Self {
            total: format_brl(t.total),
            cost: format_brl(t.cost),
            revenue: format_brl(t.revenue),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TxTotalsView {
    pub income: String,
    pub expense: String,
    pub revenue: String,
}

impl From<TxTotals> for TxTotalsView {
    fn from(t: TxTotals) -> Self {
        Self {
            income: format_brl(t.income),
            expense: format_brl(t.expense),
            revenue: format_brl(t.revenue),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct DateRangeView {
    pub first: Option<String>,
    pub last: Option<String>,
}

impl From<DateRange> for DateRangeView {
    fn from(d: DateRange) -> Self {
        Self {
            first: d.first.map(format_datetime),
            last: d.last.map(format_datetime),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
    pub user_uuid: Option<String>,
    pub register: String,
    pub dates: DateRangeView,
    pub budget: TotalsView,
    pub tx: TxTotalsView,
    pub proj: TotalsView,
}

impl From<ProjectSummary> for ProjectView {
    fn from(summary: ProjectSummary) -> Self {
        let ProjectSummary { project, report } = summary;
        Self {
            uuid: project.uuid,
            name: project.name,
            description: project.description,
            client_uuid: project.client_uuid,
            user_uuid: project.user_uuid,
            register: format_datetime(project.register),
            dates: report.dates.into(),
            budget: report.budget.into(),
            tx: report.tx.into(),
            proj: report.proj.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DoneExpenseView {
    pub uuid: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub supplier_uuid: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DoneActivityView {
    pub uuid: String,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub hourly_rate: Decimal,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DoneView {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub user_uuid: String,
    pub task_id: i32,
    pub register: NaiveDateTime,
    pub done_expense: Option<DoneExpenseView>,
    pub done_activity: Option<DoneActivityView>,
}

impl From<Done> for DoneView {
    fn from(done: Done) -> Self {
        let (done_expense, done_activity) = match done.kind {
            DoneKind::Expense {
                uuid,
                amount,
                date,
                supplier_uuid,
            } => (
                Some(DoneExpenseView {
                    uuid,
                    amount,
                    date,
                    supplier_uuid,
                }),
                None,
            ),
            DoneKind::Activity {
                uuid,
                begin_date,
                end_date,
                hourly_rate,
            } => (
                None,
                Some(DoneActivityView {
                    uuid,
                    begin_date,
                    end_date,
                    hourly_rate,
                }),
            ),
        };
        Self {
            id: done.id,
            uuid: done.uuid,
            name: done.name,
            description: done.description,
            user_uuid: done.user_uuid,
            task_id: done.task_id,
            register: done.register,
            done_expense,
            done_activity,
        }
    }
}
