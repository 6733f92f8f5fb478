use diesel::prelude::*;
use std::sync::Arc;

use budgetflow_core::budgets::{Budget, BudgetRepositoryTrait};
use budgetflow_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool};
use crate::errors::OrNotFound;
use crate::schema::budgets;

/// Budgets are only read here; they are written together with their project
/// and stamped by task reconciliation.
pub struct BudgetRepository {
    pool: Arc<DbPool>,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, uuid: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .find(uuid)
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .or_not_found(|| format!("budget {}", uuid))
            .map(Budget::from)
    }

    fn get_budget_for_project(&self, project_uuid: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::project_uuid.eq(project_uuid))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .or_not_found(|| format!("budget of project {}", project_uuid))
            .map(Budget::from)
    }
}
