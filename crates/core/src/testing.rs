//! In-memory repositories shared by service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::budgets::{Budget, BudgetRepositoryTrait};
use crate::dones::{Done, DoneRepositoryTrait, NewDone};
use crate::errors::{Error, Result};
use crate::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectUpdate};
use crate::tasks::{
    NewTask, Task, TaskActivityInput, TaskExpenseInput, TaskInput, TaskKind, TaskPlan,
    TaskRepositoryTrait, TaskStage,
};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn expense_input(name: &str, project_uuid: &str, sub_uuid: &str, amount: Decimal) -> TaskInput {
    TaskInput {
        name: name.to_string(),
        description: None,
        finished: false,
        begin_date: at(1, 8),
        end_date: at(1, 18),
        revenue: Decimal::ZERO,
        status_uuid: "todo".to_string(),
        project_uuid: project_uuid.to_string(),
        user_uuid: None,
        budget_uuid: None,
        task_expense: Some(TaskExpenseInput {
            uuid: sub_uuid.to_string(),
            amount,
        }),
        task_activity: None,
    }
}

pub fn activity_input(
    name: &str,
    project_uuid: &str,
    sub_uuid: &str,
    hourly_rate: Decimal,
) -> TaskInput {
    TaskInput {
        task_expense: None,
        task_activity: Some(TaskActivityInput {
            uuid: sub_uuid.to_string(),
            hourly_rate,
        }),
        ..expense_input(name, project_uuid, "", Decimal::ZERO)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub projects: RwLock<Vec<Project>>,
    pub budgets: RwLock<Vec<Budget>>,
    pub tasks: RwLock<Vec<Task>>,
    pub dones: RwLock<Vec<Done>>,
    pub transactions: RwLock<Vec<Transaction>>,
    pub applied_plans: RwLock<Vec<TaskPlan>>,
    next_id: AtomicI32,
}

impl MemoryStore {
    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Adds a project with an unregistered budget.
    pub fn seed_project(&self, project_uuid: &str, budget_uuid: &str) {
        self.projects.write().unwrap().push(Project {
            uuid: project_uuid.to_string(),
            name: format!("Project {}", project_uuid),
            description: None,
            client_uuid: None,
            user_uuid: None,
            register: at(1, 0),
        });
        self.budgets.write().unwrap().push(Budget {
            uuid: budget_uuid.to_string(),
            project_uuid: project_uuid.to_string(),
            register: None,
        });
    }

    pub fn seed_done(&self, task_id: i32, amount: Decimal) {
        let id = self.next_id();
        self.dones.write().unwrap().push(Done {
            id,
            uuid: format!("done-{}", id),
            name: "Done".to_string(),
            description: String::new(),
            user_uuid: "u1".to_string(),
            task_id,
            register: at(2, 9),
            kind: crate::dones::DoneKind::Expense {
                uuid: format!("done-expense-{}", id),
                amount,
                date: at(2, 9),
                supplier_uuid: None,
            },
        });
    }

    pub fn task_by_sub_uuid(&self, sub_uuid: &str) -> Option<Task> {
        self.tasks
            .read()
            .unwrap()
            .iter()
            .find(|t| t.kind.sub_uuid() == sub_uuid)
            .cloned()
    }

    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.read().unwrap().clone()
    }

    fn insert_task(&self, new_task: NewTask) -> i32 {
        let id = self.next_id();
        let sub_uuid = format!("{}-{}", new_task.kind.label(), id);
        self.tasks.write().unwrap().push(Task {
            id,
            uuid: format!("task-{}", id),
            stage: new_task.stage,
            fields: new_task.fields,
            kind: new_task.kind.with_uuid(&sub_uuid),
        });
        id
    }
}

impl BudgetRepositoryTrait for MemoryStore {
    fn get_budget(&self, uuid: &str) -> Result<Budget> {
        self.budgets
            .read()
            .unwrap()
            .iter()
            .find(|b| b.uuid == uuid)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("budget {}", uuid)))
    }

    fn get_budget_for_project(&self, project_uuid: &str) -> Result<Budget> {
        self.budgets
            .read()
            .unwrap()
            .iter()
            .find(|b| b.project_uuid == project_uuid)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("budget of project {}", project_uuid)))
    }
}

#[async_trait]
impl ProjectRepositoryTrait for MemoryStore {
    fn get_project(&self, uuid: &str) -> Result<Project> {
        self.projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.uuid == uuid)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("project {}", uuid)))
    }

    fn search_projects(&self, name_filter: Option<&str>) -> Result<Vec<Project>> {
        let needle = name_filter.map(str::to_lowercase);
        Ok(self
            .projects
            .read()
            .unwrap()
            .iter()
            .filter(|p| {
                needle
                    .as_deref()
                    .map_or(true, |n| p.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect())
    }

    async fn insert_project(&self, new_project: NewProject) -> Result<(Project, Budget)> {
        let id = self.next_id();
        let project = Project {
            uuid: format!("project-{}", id),
            name: new_project.name,
            description: new_project.description,
            client_uuid: new_project.client_uuid,
            user_uuid: new_project.user_uuid,
            register: at(1, 0),
        };
        let budget = Budget {
            uuid: format!("budget-{}", id),
            project_uuid: project.uuid.clone(),
            register: None,
        };
        self.projects.write().unwrap().push(project.clone());
        self.budgets.write().unwrap().push(budget.clone());
        Ok((project, budget))
    }

    async fn update_project(&self, update: ProjectUpdate) -> Result<Project> {
        let mut projects = self.projects.write().unwrap();
        let project = projects
            .iter_mut()
            .find(|p| p.uuid == update.uuid)
            .ok_or_else(|| Error::NotFound(format!("project {}", update.uuid)))?;
        project.name = update.name;
        project.description = update.description;
        project.client_uuid = update.client_uuid;
        Ok(project.clone())
    }
}

#[async_trait]
impl TaskRepositoryTrait for MemoryStore {
    fn list_live_tasks(&self, project_uuid: &str) -> Result<Vec<Task>> {
        Ok(self
            .all_tasks()
            .into_iter()
            .filter(|t| t.is_live() && t.fields.project_uuid == project_uuid)
            .collect())
    }

    fn list_budget_tasks(&self, budget_uuid: &str) -> Result<Vec<Task>> {
        Ok(self
            .all_tasks()
            .into_iter()
            .filter(|t| t.budget_uuid() == Some(budget_uuid))
            .collect())
    }

    fn find_task_by_sub_uuid(&self, sub_uuid: &str) -> Result<Option<Task>> {
        Ok(self.task_by_sub_uuid(sub_uuid))
    }

    fn count_dones(&self, task_ids: &[i32]) -> Result<HashMap<i32, i64>> {
        let mut counts = HashMap::new();
        for done in self.dones.read().unwrap().iter() {
            if task_ids.contains(&done.task_id) {
                *counts.entry(done.task_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn apply_plan(&self, plan: TaskPlan) -> Result<()> {
        self.applied_plans.write().unwrap().push(plan.clone());

        if let Some(stamp) = &plan.stamp_budget {
            let mut budgets = self.budgets.write().unwrap();
            if let Some(budget) = budgets.iter_mut().find(|b| b.uuid == stamp.budget_uuid) {
                budget.register.get_or_insert(stamp.at);
            }
        }
        for create in plan.creates {
            let id = self.insert_task(create.task);
            if let Some(mut mirror) = create.mirror {
                mirror.stage = TaskStage::Live { origin: Some(id) };
                self.insert_task(mirror);
            }
        }
        {
            let mut tasks = self.tasks.write().unwrap();
            for update in plan.updates {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id == update.task_id)
                    .ok_or_else(|| Error::NotFound(format!("task {}", update.task_id)))?;
                task.fields = update.fields;
                task.kind = update.kind;
            }
            tasks.retain(|t| !plan.deletes.contains(&t.id));
        }
        Ok(())
    }
}

#[async_trait]
impl DoneRepositoryTrait for MemoryStore {
    fn list_dones_for_tasks(&self, task_ids: &[i32]) -> Result<Vec<Done>> {
        Ok(self
            .dones
            .read()
            .unwrap()
            .iter()
            .filter(|d| task_ids.contains(&d.task_id))
            .cloned()
            .collect())
    }

    fn list_project_dones(&self, project_uuid: &str) -> Result<Vec<Done>> {
        let ids: Vec<i32> = self
            .all_tasks()
            .iter()
            .filter(|t| t.fields.project_uuid == project_uuid)
            .map(|t| t.id)
            .collect();
        self.list_dones_for_tasks(&ids)
    }

    async fn insert_done(&self, _new_done: NewDone) -> Result<Done> {
        unimplemented!()
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MemoryStore {
    fn list_transactions(&self, project_uuid: Option<&str>) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| project_uuid.map_or(true, |p| t.project_uuid == p))
            .cloned()
            .collect())
    }

    async fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let id = self.next_id();
        let transaction = Transaction {
            uuid: format!("tx-{}", id),
            project_uuid: new_transaction.project_uuid,
            description: new_transaction.description,
            date: new_transaction.date,
            register: at(1, 0),
            kind: new_transaction.kind,
        };
        self.transactions.write().unwrap().push(transaction.clone());
        Ok(transaction)
    }
}

/// Kind helper for assertions.
pub fn expense_amount(task: &Task) -> Option<Decimal> {
    match task.kind {
        TaskKind::Expense { amount, .. } => Some(amount),
        TaskKind::Activity { .. } => None,
    }
}
