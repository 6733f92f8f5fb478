use std::collections::HashMap;

use crate::auth::Capability;
use crate::errors::Result;
use crate::tasks::tasks_model::{ReconcileReport, Task, TaskInput, TaskPlan};
use async_trait::async_trait;

/// Trait for task repository operations
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    /// Live rows (`budget_uuid IS NULL`) of a project.
    fn list_live_tasks(&self, project_uuid: &str) -> Result<Vec<Task>>;
    /// Planning rows of a budget.
    fn list_budget_tasks(&self, budget_uuid: &str) -> Result<Vec<Task>>;
    /// The task owning the expense or activity sub-record `sub_uuid`.
    fn find_task_by_sub_uuid(&self, sub_uuid: &str) -> Result<Option<Task>>;
    /// Number of realizations per task id; ids without any are absent.
    fn count_dones(&self, task_ids: &[i32]) -> Result<HashMap<i32, i64>>;
    /// Applies a reconciliation plan in a single transaction.
    async fn apply_plan(&self, plan: TaskPlan) -> Result<()>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    fn select_live_tasks(&self, caps: &Capability, project_uuid: &str) -> Result<Vec<Task>>;
    /// Reconciles a project's live tasks against `tasks`.
    async fn update_project_tasks(
        &self,
        caps: &Capability,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport>;
    /// Reconciles a budget's planning tasks against `tasks`, mirroring them
    /// into live tasks.
    async fn update_budget_tasks(
        &self,
        caps: &Capability,
        budget_uuid: &str,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport>;
}
