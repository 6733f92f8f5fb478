//! Task reconciliation planner.
//!
//! Turns a submitted task list plus a snapshot of persisted rows into a
//! [`TaskPlan`]. Everything here is pure; applying the plan is the
//! repository's job.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDateTime;
use log::warn;

use super::tasks_model::{
    BudgetStamp, MirrorPolicy, NewTask, Task, TaskCreate, TaskDraft, TaskFields, TaskInput,
    TaskKind, TaskPlan, TaskStage, TaskUpdate,
};
use crate::budgets::Budget;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::money_violation;

/// The rows a submitted list is reconciled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Live rows of a project.
    Project { project_uuid: &'a str },
    /// Planning rows of a budget.
    Budget {
        project_uuid: &'a str,
        budget_uuid: &'a str,
    },
}

impl<'a> Scope<'a> {
    pub fn project_uuid(&self) -> &'a str {
        match self {
            Scope::Project { project_uuid } | Scope::Budget { project_uuid, .. } => project_uuid,
        }
    }

    fn contains(&self, task: &Task) -> bool {
        if task.fields.project_uuid != self.project_uuid() {
            return false;
        }
        match self {
            Scope::Project { .. } => task.is_live(),
            Scope::Budget { budget_uuid, .. } => task.budget_uuid() == Some(*budget_uuid),
        }
    }
}

/// New vs. existing tasks of a submitted list.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub create: Vec<&'a TaskDraft>,
    pub update: Vec<&'a TaskDraft>,
}

impl Partition<'_> {
    pub fn update_uuids(&self) -> HashSet<&str> {
        self.update.iter().map(|d| d.kind.sub_uuid()).collect()
    }
}

/// Validates each submitted task and converts it into a draft.
pub fn to_drafts(inputs: Vec<TaskInput>) -> Result<Vec<TaskDraft>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| to_draft(index, input))
        .collect()
}

fn to_draft(index: usize, input: TaskInput) -> Result<TaskDraft> {
    let invalid = |msg: String| -> Error {
        ValidationError::InvalidInput(format!("task #{}: {}", index + 1, msg)).into()
    };

    if input.name.trim().is_empty() {
        return Err(invalid("name is required".to_string()));
    }
    if input.project_uuid.trim().is_empty() {
        return Err(invalid("projectUuid is required".to_string()));
    }
    if input.end_date < input.begin_date {
        return Err(invalid("endDate is before beginDate".to_string()));
    }
    if let Some(msg) = money_violation("revenue", input.revenue) {
        return Err(invalid(msg));
    }

    let kind = match (input.task_expense, input.task_activity) {
        (Some(expense), None) => TaskKind::Expense {
            uuid: expense.uuid.trim().to_string(),
            amount: expense.amount,
        },
        (None, Some(activity)) => TaskKind::Activity {
            uuid: activity.uuid.trim().to_string(),
            hourly_rate: activity.hourly_rate,
        },
        (Some(_), Some(_)) => {
            return Err(invalid(
                "a task is either an expense or an activity, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(invalid(
                "taskExpense or taskActivity is required".to_string(),
            ))
        }
    };
    let money = match &kind {
        TaskKind::Expense { amount, .. } => *amount,
        TaskKind::Activity { hourly_rate, .. } => *hourly_rate,
    };
    if let Some(msg) = money_violation(&format!("{} value", kind.label()), money) {
        return Err(invalid(msg));
    }

    Ok(TaskDraft {
        fields: TaskFields {
            name: input.name.trim().to_string(),
            description: input.description.unwrap_or_default(),
            finished: input.finished,
            begin_date: input.begin_date,
            end_date: input.end_date,
            revenue: input.revenue,
            status_uuid: input.status_uuid,
            project_uuid: input.project_uuid,
            user_uuid: input.user_uuid.filter(|u| !u.is_empty()),
        },
        budget_uuid: input.budget_uuid.filter(|b| !b.is_empty()),
        kind,
    })
}

/// The single project a batch belongs to, `None` for an empty batch.
pub fn single_project(drafts: &[TaskDraft]) -> Result<Option<&str>> {
    let projects: BTreeSet<&str> = drafts
        .iter()
        .map(|d| d.fields.project_uuid.as_str())
        .collect();
    if projects.len() > 1 {
        return Err(Error::Conflict(format!(
            "tasks of one call must belong to one project, got {}",
            projects.len()
        )));
    }
    Ok(projects.into_iter().next())
}

/// The single budget referenced by a batch, ignoring tasks without one.
pub fn single_budget(drafts: &[TaskDraft]) -> Result<Option<&str>> {
    let budgets: BTreeSet<&str> = drafts
        .iter()
        .filter_map(|d| d.budget_uuid.as_deref())
        .collect();
    if budgets.len() > 1 {
        return Err(Error::Conflict(format!(
            "tasks of one call must belong to one budget, got {}",
            budgets.len()
        )));
    }
    Ok(budgets.into_iter().next())
}

/// Splits drafts by sub-record uuid: empty goes to create, anything else to update.
pub fn partition(drafts: &[TaskDraft]) -> Partition<'_> {
    let (create, update) = drafts.iter().partition(|d| d.kind.is_new());
    Partition { create, update }
}

/// Persisted rows in `scope` that the submitted list no longer mentions.
///
/// Live rows with realizations are never part of it.
pub fn deletion_set<'a>(
    persisted: &'a [Task],
    update_uuids: &HashSet<&str>,
    scope: &Scope<'_>,
    done_counts: &HashMap<i32, i64>,
) -> Vec<&'a Task> {
    persisted
        .iter()
        .filter(|task| scope.contains(task))
        .filter(|task| !update_uuids.contains(task.kind.sub_uuid()))
        .filter(|task| match scope {
            Scope::Project { .. } => done_counts.get(&task.id).copied().unwrap_or(0) == 0,
            Scope::Budget { .. } => true,
        })
        .collect()
}

/// Live clone of a planned task: identical fields and values, fresh
/// sub-record, no budget.
pub fn mirror(fields: &TaskFields, kind: &TaskKind) -> NewTask {
    NewTask {
        stage: TaskStage::Live { origin: None },
        fields: fields.clone(),
        kind: kind.with_uuid(""),
    }
}

fn ensure_unique_updates(partition: &Partition<'_>) -> Result<()> {
    let mut seen = HashSet::new();
    for draft in &partition.update {
        if !seen.insert(draft.kind.sub_uuid()) {
            return Err(ValidationError::InvalidInput(format!(
                "{} {} appears more than once",
                draft.kind.label(),
                draft.kind.sub_uuid()
            ))
            .into());
        }
    }
    Ok(())
}

fn resolve_update<'a>(draft: &TaskDraft, by_sub_uuid: &HashMap<&str, &'a Task>) -> Result<&'a Task> {
    let persisted = by_sub_uuid.get(draft.kind.sub_uuid()).copied().ok_or_else(|| {
        Error::NotFound(format!(
            "task {} {} does not belong to this {}",
            draft.kind.label(),
            draft.kind.sub_uuid(),
            if draft.budget_uuid.is_some() { "budget" } else { "project" }
        ))
    })?;
    if !persisted.kind.same_type(&draft.kind) {
        return Err(ValidationError::InvalidInput(format!(
            "task {} cannot change from {} to {}",
            persisted.uuid,
            persisted.kind.label(),
            draft.kind.label()
        ))
        .into());
    }
    Ok(persisted)
}

fn mirrors_of(live_tasks: &[Task], planned_id: i32) -> impl Iterator<Item = &Task> {
    live_tasks
        .iter()
        .filter(move |t| t.origin() == Some(planned_id))
}

fn index_by_sub_uuid<'a>(tasks: &'a [Task], scope: &Scope<'_>) -> HashMap<&'a str, &'a Task> {
    tasks
        .iter()
        .filter(|t| scope.contains(t))
        .map(|t| (t.kind.sub_uuid(), t))
        .collect()
}

/// Plans the reconciliation of a project's live tasks.
///
/// An empty list has no project to scope deletions to and plans nothing.
pub fn plan_live(
    drafts: &[TaskDraft],
    persisted_live: &[Task],
    done_counts: &HashMap<i32, i64>,
) -> Result<TaskPlan> {
    let Some(project_uuid) = single_project(drafts)? else {
        return Ok(TaskPlan::default());
    };
    let scope = Scope::Project { project_uuid };
    let partition = partition(drafts);
    ensure_unique_updates(&partition)?;
    let by_sub_uuid = index_by_sub_uuid(persisted_live, &scope);

    let mut plan = TaskPlan::default();
    for draft in &partition.create {
        plan.creates.push(TaskCreate {
            task: NewTask {
                stage: TaskStage::Live { origin: None },
                fields: draft.fields.clone(),
                kind: draft.kind.clone(),
            },
            mirror: None,
        });
    }
    for draft in &partition.update {
        let persisted = resolve_update(draft, &by_sub_uuid)?;
        plan.updates.push(TaskUpdate {
            task_id: persisted.id,
            fields: draft.fields.clone(),
            kind: draft.kind.clone(),
        });
    }
    let update_uuids = partition.update_uuids();
    plan.deletes = deletion_set(persisted_live, &update_uuids, &scope, done_counts)
        .into_iter()
        .map(|t| t.id)
        .collect();
    Ok(plan)
}

/// Plans the reconciliation of a budget's planning tasks and their mirrors.
///
/// `live_tasks` are the project's live rows (where mirrors are found) and
/// `live_done_counts` their realization counts.
pub fn plan_budget(
    budget: &Budget,
    drafts: &[TaskDraft],
    persisted_planned: &[Task],
    live_tasks: &[Task],
    live_done_counts: &HashMap<i32, i64>,
    policy: MirrorPolicy,
    now: NaiveDateTime,
) -> Result<TaskPlan> {
    if let Some(project_uuid) = single_project(drafts)? {
        if project_uuid != budget.project_uuid {
            return Err(Error::Conflict(format!(
                "tasks belong to project {} but budget {} belongs to project {}",
                project_uuid, budget.uuid, budget.project_uuid
            )));
        }
    }
    if let Some(budget_uuid) = single_budget(drafts)? {
        if budget_uuid != budget.uuid {
            return Err(Error::Conflict(format!(
                "tasks belong to budget {} but budget {} was targeted",
                budget_uuid, budget.uuid
            )));
        }
    }

    let scope = Scope::Budget {
        project_uuid: &budget.project_uuid,
        budget_uuid: &budget.uuid,
    };
    let partition = partition(drafts);
    ensure_unique_updates(&partition)?;
    let by_sub_uuid = index_by_sub_uuid(persisted_planned, &scope);

    let mut plan = TaskPlan {
        stamp_budget: (!budget.is_registered()).then(|| BudgetStamp {
            budget_uuid: budget.uuid.clone(),
            at: now,
        }),
        ..TaskPlan::default()
    };

    for draft in &partition.create {
        plan.creates.push(TaskCreate {
            task: NewTask {
                stage: TaskStage::Planned {
                    budget_uuid: budget.uuid.clone(),
                },
                fields: draft.fields.clone(),
                kind: draft.kind.clone(),
            },
            mirror: Some(mirror(&draft.fields, &draft.kind)),
        });
    }

    for draft in &partition.update {
        let planned = resolve_update(draft, &by_sub_uuid)?;
        plan.updates.push(TaskUpdate {
            task_id: planned.id,
            fields: draft.fields.clone(),
            kind: draft.kind.clone(),
        });

        match mirrors_of(live_tasks, planned.id).next() {
            Some(live) => {
                if !live.kind.same_type(&draft.kind) {
                    return Err(Error::Conflict(format!(
                        "live task {} is an {} but its planned task {} is an {}",
                        live.uuid,
                        live.kind.label(),
                        planned.uuid,
                        draft.kind.label()
                    )));
                }
                plan.updates.push(TaskUpdate {
                    task_id: live.id,
                    fields: draft.fields.clone(),
                    kind: draft.kind.with_uuid(live.kind.sub_uuid()),
                });
            }
            None => match policy {
                MirrorPolicy::Strict => {
                    return Err(Error::NotFound(format!(
                        "live task mirrored from planned task {}",
                        planned.uuid
                    )));
                }
                MirrorPolicy::Lenient => {
                    warn!(
                        "Planned task {} has no live mirror; leaving the live side unchanged",
                        planned.uuid
                    );
                    plan.mirrors_skipped += 1;
                }
            },
        }
    }

    let update_uuids = partition.update_uuids();
    for planned in deletion_set(persisted_planned, &update_uuids, &scope, &HashMap::new()) {
        plan.deletes.push(planned.id);
        plan.deletes.extend(
            mirrors_of(live_tasks, planned.id)
                .filter(|live| live_done_counts.get(&live.id).copied().unwrap_or(0) == 0)
                .map(|live| live.id),
        );
    }
    Ok(plan)
}
