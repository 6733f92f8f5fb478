use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::Arc;

use budgetflow_core::errors::Error;
use budgetflow_core::tasks::{
    BudgetStamp, NewTask, Task, TaskKind, TaskPlan, TaskRepositoryTrait, TaskUpdate,
};
use budgetflow_core::Result;

use super::model::{NewTaskDB, TaskActivityDB, TaskChangesDB, TaskDB, TaskExpenseDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{budgets, dones, task_activities, task_expenses, tasks};
use crate::utils::chunk_for_sqlite;

pub struct TaskRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Attaches each task row's expense or activity.
fn with_kinds(conn: &mut SqliteConnection, rows: Vec<TaskDB>) -> Result<Vec<Task>> {
    let ids: Vec<i32> = rows.iter().map(|t| t.id).collect();
    let mut kinds: HashMap<i32, TaskKind> = HashMap::with_capacity(ids.len());

    for chunk in chunk_for_sqlite(&ids) {
        let expenses = task_expenses::table
            .filter(task_expenses::task_id.eq_any(chunk))
            .select(TaskExpenseDB::as_select())
            .load::<TaskExpenseDB>(conn)
            .into_core()?;
        for expense in expenses {
            kinds.insert(expense.task_id, expense.into_kind());
        }

        let activities = task_activities::table
            .filter(task_activities::task_id.eq_any(chunk))
            .select(TaskActivityDB::as_select())
            .load::<TaskActivityDB>(conn)
            .into_core()?;
        for activity in activities {
            kinds.insert(activity.task_id, activity.into_kind());
        }
    }

    Ok(rows
        .into_iter()
        .filter_map(|row| match kinds.remove(&row.id) {
            Some(kind) => Some(row.into_task(kind)),
            None => {
                error!("Task {} has neither an expense nor an activity; skipping", row.uuid);
                None
            }
        })
        .collect())
}

fn stamp_budget(conn: &mut SqliteConnection, stamp: &BudgetStamp) -> Result<()> {
    diesel::update(
        budgets::table
            .find(&stamp.budget_uuid)
            .filter(budgets::register.is_null()),
    )
    .set(budgets::register.eq(Some(stamp.at)))
    .execute(conn)
    .into_core()?;
    Ok(())
}

fn insert_task(conn: &mut SqliteConnection, task: &NewTask, origin: Option<i32>) -> Result<i32> {
    let row = NewTaskDB::new(task, origin);
    let task_id: i32 = diesel::insert_into(tasks::table)
        .values(&row)
        .returning(tasks::id)
        .get_result(conn)
        .into_core()?;

    let sub_uuid = uuid::Uuid::new_v4().to_string();
    match &task.kind {
        TaskKind::Expense { amount, .. } => {
            diesel::insert_into(task_expenses::table)
                .values(&TaskExpenseDB {
                    uuid: sub_uuid,
                    task_id,
                    amount: amount.to_string(),
                })
                .execute(conn)
                .into_core()?;
        }
        TaskKind::Activity { hourly_rate, .. } => {
            diesel::insert_into(task_activities::table)
                .values(&TaskActivityDB {
                    uuid: sub_uuid,
                    task_id,
                    hourly_rate: hourly_rate.to_string(),
                })
                .execute(conn)
                .into_core()?;
        }
    }
    Ok(task_id)
}

fn update_task(conn: &mut SqliteConnection, update: &TaskUpdate) -> Result<()> {
    let affected = diesel::update(tasks::table.find(update.task_id))
        .set(&TaskChangesDB::from(&update.fields))
        .execute(conn)
        .into_core()?;
    if affected == 0 {
        return Err(Error::NotFound(format!("task {}", update.task_id)));
    }

    // The sub-record must still belong to the task being updated.
    let affected = match &update.kind {
        TaskKind::Expense { uuid, amount } => diesel::update(
            task_expenses::table
                .find(uuid)
                .filter(task_expenses::task_id.eq(update.task_id)),
        )
        .set(task_expenses::amount.eq(amount.to_string()))
        .execute(conn),
        TaskKind::Activity { uuid, hourly_rate } => diesel::update(
            task_activities::table
                .find(uuid)
                .filter(task_activities::task_id.eq(update.task_id)),
        )
        .set(task_activities::hourly_rate.eq(hourly_rate.to_string()))
        .execute(conn),
    }
    .into_core()?;
    if affected == 0 {
        return Err(Error::NotFound(format!(
            "task {} {} of task {}",
            update.kind.label(),
            update.kind.sub_uuid(),
            update.task_id
        )));
    }
    Ok(())
}

fn delete_tasks(conn: &mut SqliteConnection, ids: &[i32]) -> Result<()> {
    for chunk in chunk_for_sqlite(ids) {
        diesel::delete(task_expenses::table.filter(task_expenses::task_id.eq_any(chunk)))
            .execute(conn)
            .into_core()?;
        diesel::delete(task_activities::table.filter(task_activities::task_id.eq_any(chunk)))
            .execute(conn)
            .into_core()?;
        diesel::delete(tasks::table.filter(tasks::id.eq_any(chunk)))
            .execute(conn)
            .into_core()?;
    }
    Ok(())
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn list_live_tasks(&self, project_uuid: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::project_uuid.eq(project_uuid))
            .filter(tasks::budget_uuid.is_null())
            .select(TaskDB::as_select())
            .order(tasks::id.asc())
            .load::<TaskDB>(&mut conn)
            .into_core()?;
        with_kinds(&mut conn, rows)
    }

    fn list_budget_tasks(&self, budget_uuid: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tasks::table
            .filter(tasks::budget_uuid.eq(budget_uuid))
            .select(TaskDB::as_select())
            .order(tasks::id.asc())
            .load::<TaskDB>(&mut conn)
            .into_core()?;
        with_kinds(&mut conn, rows)
    }

    fn find_task_by_sub_uuid(&self, sub_uuid: &str) -> Result<Option<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let expense_owner = task_expenses::table
            .find(sub_uuid)
            .select(task_expenses::task_id)
            .first::<i32>(&mut conn)
            .optional()
            .into_core()?;
        let owner = match expense_owner {
            Some(id) => Some(id),
            None => task_activities::table
                .find(sub_uuid)
                .select(task_activities::task_id)
                .first::<i32>(&mut conn)
                .optional()
                .into_core()?,
        };
        let Some(task_id) = owner else {
            return Ok(None);
        };

        let row = tasks::table
            .find(task_id)
            .select(TaskDB::as_select())
            .first::<TaskDB>(&mut conn)
            .into_core()?;
        Ok(with_kinds(&mut conn, vec![row])?.pop())
    }

    fn count_dones(&self, task_ids: &[i32]) -> Result<HashMap<i32, i64>> {
        let mut conn = get_connection(&self.pool)?;
        let mut counts = HashMap::new();
        for chunk in chunk_for_sqlite(task_ids) {
            let rows = dones::table
                .filter(dones::task_id.eq_any(chunk))
                .group_by(dones::task_id)
                .select((dones::task_id, count_star()))
                .load::<(i32, i64)>(&mut conn)
                .into_core()?;
            counts.extend(rows);
        }
        Ok(counts)
    }

    async fn apply_plan(&self, plan: TaskPlan) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                if let Some(stamp) = &plan.stamp_budget {
                    stamp_budget(conn, stamp)?;
                }
                for create in &plan.creates {
                    let task_id = insert_task(conn, &create.task, None)?;
                    if let Some(mirror) = &create.mirror {
                        insert_task(conn, mirror, Some(task_id))?;
                    }
                }
                for update in &plan.updates {
                    update_task(conn, update)?;
                }
                delete_tasks(conn, &plan.deletes)?;
                debug!(
                    "Applied task plan: {} creates, {} updates, {} deletes",
                    plan.creates.len(),
                    plan.updates.len(),
                    plan.deletes.len()
                );
                Ok(())
            })
            .await
    }
}
