//! Database models for dones and their expense/activity rows.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetflow_core::dones::{Done, DoneKind};

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::dones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DoneDB {
    pub id: i32,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub user_uuid: String,
    pub task_id: i32,
    pub register: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::dones)]
pub struct NewDoneDB {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub user_uuid: String,
    pub task_id: i32,
    pub register: NaiveDateTime,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::done_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DoneExpenseDB {
    pub uuid: String,
    pub done_id: i32,
    pub amount: String,
    pub expense_date: NaiveDateTime,
    pub supplier_uuid: Option<String>,
}

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::done_activities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DoneActivityDB {
    pub uuid: String,
    pub done_id: i32,
    pub begin_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub hourly_rate: String,
}

impl DoneExpenseDB {
    pub fn into_kind(self) -> DoneKind {
        DoneKind::Expense {
            amount: parse_decimal(&self.amount, "done_expenses.amount"),
            uuid: self.uuid,
            date: self.expense_date,
            supplier_uuid: self.supplier_uuid,
        }
    }
}

impl DoneActivityDB {
    pub fn into_kind(self) -> DoneKind {
        DoneKind::Activity {
            hourly_rate: parse_decimal(&self.hourly_rate, "done_activities.hourly_rate"),
            uuid: self.uuid,
            begin_date: self.begin_date,
            end_date: self.end_date,
        }
    }
}

impl DoneDB {
    pub fn into_done(self, kind: DoneKind) -> Done {
        Done {
            id: self.id,
            uuid: self.uuid,
            name: self.name,
            description: self.description,
            user_uuid: self.user_uuid,
            task_id: self.task_id,
            register: self.register,
            kind,
        }
    }
}
