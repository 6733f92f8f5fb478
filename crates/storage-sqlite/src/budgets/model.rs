//! Database model for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetflow_core::budgets::Budget;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(primary_key(uuid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub uuid: String,
    pub project_uuid: String,
    pub register: Option<NaiveDateTime>,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            uuid: db.uuid,
            project_uuid: db.project_uuid,
            register: db.register,
        }
    }
}
