use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::projects_model::{NewProject, Project, ProjectSummary, ProjectUpdate};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::auth::{Capability, Gate};
use crate::budgets::{Budget, BudgetRepositoryTrait};
use crate::constants::SELECT_ALL_KEYS;
use crate::dones::DoneRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::reporting::build_report;
use crate::tasks::TaskRepositoryTrait;
use crate::transactions::TransactionRepositoryTrait;

/// Turns a select key into a project name filter.
///
/// Empty keys and the wildcard keys select every project.
pub fn name_filter(key: &str) -> Option<&str> {
    let key = key.trim();
    if key.is_empty()
        || SELECT_ALL_KEYS
            .iter()
            .any(|all| all.eq_ignore_ascii_case(key))
    {
        None
    } else {
        Some(key)
    }
}

/// Service for managing projects and their reports
pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    task_repository: Arc<dyn TaskRepositoryTrait>,
    done_repository: Arc<dyn DoneRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl ProjectService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        task_repository: Arc<dyn TaskRepositoryTrait>,
        done_repository: Arc<dyn DoneRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            project_repository,
            budget_repository,
            task_repository,
            done_repository,
            transaction_repository,
        }
    }

    fn summarize(&self, project: Project) -> Result<ProjectSummary> {
        let budget = self.budget_repository.get_budget_for_project(&project.uuid)?;
        let planned = self.task_repository.list_budget_tasks(&budget.uuid)?;
        let live = self.task_repository.list_live_tasks(&project.uuid)?;
        let live_ids: Vec<i32> = live.iter().map(|t| t.id).collect();
        let dones = self.done_repository.list_dones_for_tasks(&live_ids)?;
        let transactions = self
            .transaction_repository
            .list_transactions(Some(&project.uuid))?;

        let report = build_report(
            &project,
            Some(&budget),
            &planned,
            &live,
            &dones,
            &transactions,
        )?;
        Ok(ProjectSummary { project, report })
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    Ok(())
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_project(&self, caps: &Capability, uuid: &str) -> Result<Project> {
        caps.require(Gate::Project)?;
        self.project_repository.get_project(uuid)
    }

    fn select_projects(&self, caps: &Capability, key: &str) -> Result<Vec<ProjectSummary>> {
        caps.require(Gate::Project)?;
        let projects = self.project_repository.search_projects(name_filter(key))?;
        debug!("Summarizing {} projects for key '{}'", projects.len(), key);
        projects
            .into_iter()
            .map(|project| self.summarize(project))
            .collect()
    }

    async fn create_project(
        &self,
        caps: &Capability,
        new_project: NewProject,
    ) -> Result<(Project, Budget)> {
        caps.require(Gate::Project)?;
        require_name(&new_project.name)?;
        let (project, budget) = self.project_repository.insert_project(new_project).await?;
        info!("Created project {} with budget {}", project.uuid, budget.uuid);
        Ok((project, budget))
    }

    async fn update_project(&self, caps: &Capability, update: ProjectUpdate) -> Result<Project> {
        caps.require(Gate::Project)?;
        if update.uuid.trim().is_empty() {
            return Err(ValidationError::MissingField("uuid".to_string()).into());
        }
        require_name(&update.name)?;
        self.project_repository.update_project(update).await
    }
}
