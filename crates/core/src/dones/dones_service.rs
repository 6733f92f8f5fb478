use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::dones_model::{Done, DoneInput, DoneKind, NewDone};
use super::dones_traits::{DoneRepositoryTrait, DoneServiceTrait};
use crate::auth::{Capability, Gate};
use crate::errors::{Error, Result, ValidationError};
use crate::tasks::{Task, TaskKind, TaskRepositoryTrait};
use crate::utils::check_money;

pub struct DoneService {
    done_repository: Arc<dyn DoneRepositoryTrait>,
    task_repository: Arc<dyn TaskRepositoryTrait>,
}

impl DoneService {
    pub fn new(
        done_repository: Arc<dyn DoneRepositoryTrait>,
        task_repository: Arc<dyn TaskRepositoryTrait>,
    ) -> Self {
        DoneService {
            done_repository,
            task_repository,
        }
    }

    /// Resolves the task owning `sub_uuid` and checks it can be realized
    /// with `kind`.
    fn resolve_target(&self, sub_uuid: &str, kind: &DoneKind) -> Result<Task> {
        let not_found = || {
            let label = match kind {
                DoneKind::Expense { .. } => "task expense",
                DoneKind::Activity { .. } => "task activity",
            };
            Error::NotFound(format!("{} {}", label, sub_uuid))
        };

        let task = self
            .task_repository
            .find_task_by_sub_uuid(sub_uuid)?
            .ok_or_else(not_found)?;

        let kinds_match = matches!(
            (&task.kind, kind),
            (TaskKind::Expense { .. }, DoneKind::Expense { .. })
                | (TaskKind::Activity { .. }, DoneKind::Activity { .. })
        );
        if !kinds_match {
            return Err(not_found());
        }
        if !task.is_live() {
            return Err(ValidationError::InvalidInput(format!(
                "task '{}' belongs to a budget and cannot be realized",
                task.fields.name
            ))
            .into());
        }
        Ok(task)
    }
}

/// Validates a realization request and splits it into the target sub-record
/// uuid and the realization values.
fn to_new_done_kind(input: &DoneInput) -> Result<(String, DoneKind)> {
    match (&input.done_expense, &input.done_activity) {
        (Some(expense), None) => {
            check_money("expense amount", expense.amount)?;
            Ok((
                expense.task_uuid.clone(),
                DoneKind::Expense {
                    uuid: String::new(),
                    amount: expense.amount,
                    date: expense.date,
                    supplier_uuid: expense.supplier_uuid.clone().filter(|s| !s.is_empty()),
                },
            ))
        }
        (None, Some(activity)) => {
            if activity.end_date < activity.begin_date {
                return Err(ValidationError::InvalidInput(
                    "activity cannot end before it begins".to_string(),
                )
                .into());
            }
            check_money("hourly rate", activity.hourly_rate)?;
            Ok((
                activity.task_uuid.clone(),
                DoneKind::Activity {
                    uuid: String::new(),
                    begin_date: activity.begin_date,
                    end_date: activity.end_date,
                    hourly_rate: activity.hourly_rate,
                },
            ))
        }
        _ => Err(ValidationError::InvalidInput(
            "exactly one of doneExpense or doneActivity is required".to_string(),
        )
        .into()),
    }
}

#[async_trait]
impl DoneServiceTrait for DoneService {
    fn list_dones(&self, caps: &Capability, project_uuid: &str) -> Result<Vec<Done>> {
        caps.require(Gate::Personal)?;
        self.done_repository.list_project_dones(project_uuid)
    }

    async fn create_done(&self, caps: &Capability, input: DoneInput) -> Result<Done> {
        caps.require(Gate::Personal)?;
        if input.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if input.user_uuid.trim().is_empty() {
            return Err(ValidationError::MissingField("userUuid".to_string()).into());
        }

        let (sub_uuid, kind) = to_new_done_kind(&input)?;
        let task = self.resolve_target(&sub_uuid, &kind)?;

        let done = self
            .done_repository
            .insert_done(NewDone {
                name: input.name,
                description: input.description.unwrap_or_default(),
                user_uuid: input.user_uuid,
                task_id: task.id,
                kind,
            })
            .await?;
        info!("Recorded realization {} for task {}", done.uuid, task.uuid);
        Ok(done)
    }
}
