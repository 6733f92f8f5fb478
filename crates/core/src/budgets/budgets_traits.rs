use crate::auth::Capability;
use crate::budgets::budgets_model::{Budget, BudgetWithTasks};
use crate::errors::Result;
use crate::tasks::{ReconcileReport, TaskInput};
use async_trait::async_trait;

/// Trait for budget repository operations
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget(&self, uuid: &str) -> Result<Budget>;
    fn get_budget_for_project(&self, project_uuid: &str) -> Result<Budget>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn select_budgets(
        &self,
        caps: &Capability,
        key: &str,
        project_uuid: Option<&str>,
    ) -> Result<Vec<BudgetWithTasks>>;
    async fn update_budget_tasks(
        &self,
        caps: &Capability,
        budget_uuid: &str,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport>;
}
