use std::sync::Arc;

use async_trait::async_trait;

use super::budgets_model::BudgetWithTasks;
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::auth::{Capability, Gate};
use crate::errors::Result;
use crate::projects::{name_filter, ProjectRepositoryTrait};
use crate::tasks::{ReconcileReport, TaskInput, TaskRepositoryTrait, TaskServiceTrait};

pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    task_repository: Arc<dyn TaskRepositoryTrait>,
    task_service: Arc<dyn TaskServiceTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        task_repository: Arc<dyn TaskRepositoryTrait>,
        task_service: Arc<dyn TaskServiceTrait>,
    ) -> Self {
        BudgetService {
            budget_repository,
            project_repository,
            task_repository,
            task_service,
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn select_budgets(
        &self,
        caps: &Capability,
        key: &str,
        project_uuid: Option<&str>,
    ) -> Result<Vec<BudgetWithTasks>> {
        caps.require(Gate::Project)?;
        let projects = self.project_repository.search_projects(name_filter(key))?;

        projects
            .iter()
            .filter(|p| project_uuid.map_or(true, |wanted| p.uuid == wanted))
            .map(|project| {
                let budget = self
                    .budget_repository
                    .get_budget_for_project(&project.uuid)?;
                let tasks = self.task_repository.list_budget_tasks(&budget.uuid)?;
                Ok(BudgetWithTasks { budget, tasks })
            })
            .collect()
    }

    async fn update_budget_tasks(
        &self,
        caps: &Capability,
        budget_uuid: &str,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport> {
        self.task_service
            .update_budget_tasks(caps, budget_uuid, tasks)
            .await
    }
}
