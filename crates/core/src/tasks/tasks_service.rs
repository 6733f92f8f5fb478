use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use super::reconciliation::{plan_budget, plan_live, to_drafts};
use super::tasks_model::{MirrorPolicy, ReconcileReport, Task, TaskInput, TaskPlan};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::auth::{Capability, Gate};
use crate::budgets::BudgetRepositoryTrait;
use crate::errors::Result;

pub struct TaskService {
    task_repository: Arc<dyn TaskRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    mirror_policy: MirrorPolicy,
}

impl TaskService {
    pub fn new(
        task_repository: Arc<dyn TaskRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
    ) -> Self {
        TaskService {
            task_repository,
            budget_repository,
            mirror_policy: MirrorPolicy::default(),
        }
    }

    pub fn with_mirror_policy(mut self, policy: MirrorPolicy) -> Self {
        self.mirror_policy = policy;
        self
    }

    async fn apply(&self, plan: TaskPlan) -> Result<ReconcileReport> {
        let report = plan.report();
        if plan.is_empty() {
            debug!("Task reconciliation produced an empty plan");
            return Ok(report);
        }
        self.task_repository.apply_plan(plan).await?;
        info!(
            "Reconciled tasks: {} created, {} updated, {} deleted, {} mirrors skipped",
            report.created, report.updated, report.deleted, report.mirrors_skipped
        );
        Ok(report)
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    fn select_live_tasks(&self, caps: &Capability, project_uuid: &str) -> Result<Vec<Task>> {
        caps.require(Gate::Project)?;
        self.task_repository.list_live_tasks(project_uuid)
    }

    async fn update_project_tasks(
        &self,
        caps: &Capability,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport> {
        caps.require(Gate::Project)?;
        let drafts = to_drafts(tasks)?;
        let Some(first) = drafts.first() else {
            return Ok(ReconcileReport::default());
        };

        let persisted = self
            .task_repository
            .list_live_tasks(&first.fields.project_uuid)?;
        let ids: Vec<i32> = persisted.iter().map(|t| t.id).collect();
        let done_counts = self.task_repository.count_dones(&ids)?;

        let plan = plan_live(&drafts, &persisted, &done_counts)?;
        self.apply(plan).await
    }

    async fn update_budget_tasks(
        &self,
        caps: &Capability,
        budget_uuid: &str,
        tasks: Vec<TaskInput>,
    ) -> Result<ReconcileReport> {
        caps.require(Gate::Project)?;
        let drafts = to_drafts(tasks)?;
        let budget = self.budget_repository.get_budget(budget_uuid)?;

        let planned = self.task_repository.list_budget_tasks(&budget.uuid)?;
        let live = self.task_repository.list_live_tasks(&budget.project_uuid)?;
        let live_ids: Vec<i32> = live.iter().map(|t| t.id).collect();
        let live_done_counts = self.task_repository.count_dones(&live_ids)?;

        let plan = plan_budget(
            &budget,
            &drafts,
            &planned,
            &live,
            &live_done_counts,
            self.mirror_policy,
            Utc::now().naive_utc(),
        )?;
        self.apply(plan).await
    }
}
