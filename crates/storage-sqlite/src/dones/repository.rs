use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::error;
use std::collections::HashMap;
use std::sync::Arc;

use budgetflow_core::dones::{Done, DoneKind, DoneRepositoryTrait, NewDone};
use budgetflow_core::Result;

use super::model::{DoneActivityDB, DoneDB, DoneExpenseDB, NewDoneDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{done_activities, done_expenses, dones, tasks};
use crate::utils::chunk_for_sqlite;

pub struct DoneRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DoneRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn with_kinds(conn: &mut SqliteConnection, rows: Vec<DoneDB>) -> Result<Vec<Done>> {
    let ids: Vec<i32> = rows.iter().map(|d| d.id).collect();
    let mut kinds: HashMap<i32, DoneKind> = HashMap::with_capacity(ids.len());

    for chunk in chunk_for_sqlite(&ids) {
        let expenses = done_expenses::table
            .filter(done_expenses::done_id.eq_any(chunk))
            .select(DoneExpenseDB::as_select())
            .load::<DoneExpenseDB>(conn)
            .into_core()?;
        for expense in expenses {
            kinds.insert(expense.done_id, expense.into_kind());
        }

        let activities = done_activities::table
            .filter(done_activities::done_id.eq_any(chunk))
            .select(DoneActivityDB::as_select())
            .load::<DoneActivityDB>(conn)
            .into_core()?;
        for activity in activities {
            kinds.insert(activity.done_id, activity.into_kind());
        }
    }

    Ok(rows
        .into_iter()
        .filter_map(|row| match kinds.remove(&row.id) {
            Some(kind) => Some(row.into_done(kind)),
            None => {
                error!("Done {} has neither an expense nor an activity; skipping", row.uuid);
                None
            }
        })
        .collect())
}

#[async_trait]
impl DoneRepositoryTrait for DoneRepository {
    fn list_dones_for_tasks(&self, task_ids: &[i32]) -> Result<Vec<Done>> {
        let mut conn = get_connection(&self.pool)?;
        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(task_ids) {
            rows.extend(
                dones::table
                    .filter(dones::task_id.eq_any(chunk))
                    .select(DoneDB::as_select())
                    .load::<DoneDB>(&mut conn)
                    .into_core()?,
            );
        }
        rows.sort_by_key(|d| d.id);
        with_kinds(&mut conn, rows)
    }

    fn list_project_dones(&self, project_uuid: &str) -> Result<Vec<Done>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = dones::table
            .inner_join(tasks::table)
            .filter(tasks::project_uuid.eq(project_uuid))
            .select(DoneDB::as_select())
            .order(dones::id.asc())
            .load::<DoneDB>(&mut conn)
            .into_core()?;
        with_kinds(&mut conn, rows)
    }

    async fn insert_done(&self, new_done: NewDone) -> Result<Done> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Done> {
                let row = NewDoneDB {
                    uuid: uuid::Uuid::new_v4().to_string(),
                    name: new_done.name.trim().to_string(),
                    description: new_done.description,
                    user_uuid: new_done.user_uuid,
                    task_id: new_done.task_id,
                    register: chrono::Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(dones::table)
                    .values(&row)
                    .returning(DoneDB::as_returning())
                    .get_result::<DoneDB>(conn)
                    .into_core()?;

                let sub_uuid = uuid::Uuid::new_v4().to_string();
                let kind = match new_done.kind {
                    DoneKind::Expense {
                        amount,
                        date,
                        supplier_uuid,
                        ..
                    } => {
                        let sub = DoneExpenseDB {
                            uuid: sub_uuid,
                            done_id: inserted.id,
                            amount: amount.to_string(),
                            expense_date: date,
                            supplier_uuid,
                        };
                        diesel::insert_into(done_expenses::table)
                            .values(&sub)
                            .execute(conn)
                            .into_core()?;
                        sub.into_kind()
                    }
                    DoneKind::Activity {
                        begin_date,
                        end_date,
                        hourly_rate,
                        ..
                    } => {
                        let sub = DoneActivityDB {
                            uuid: sub_uuid,
                            done_id: inserted.id,
                            begin_date,
                            end_date,
                            hourly_rate: hourly_rate.to_string(),
                        };
                        diesel::insert_into(done_activities::table)
                            .values(&sub)
                            .execute(conn)
                            .into_core()?;
                        sub.into_kind()
                    }
                };
                Ok(inserted.into_done(kind))
            })
            .await
    }
}
