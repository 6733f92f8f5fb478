//! Pure aggregation over loaded rows.
//!
//! Nothing here touches storage: callers load the project's tasks, dones and
//! transactions and pass them in.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::report_model::{DateRange, ProjectReport, Totals, TxTotals};
use crate::budgets::Budget;
use crate::dones::{Done, DoneKind};
use crate::errors::{Error, Result};
use crate::projects::Project;
use crate::tasks::{Task, TaskKind};
use crate::transactions::{Transaction, TransactionKind};
use crate::utils::hours_between;

fn overflow(what: &str) -> Error {
    Error::Unexpected(format!("{} is out of the representable range", what))
}

fn add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(what))
}

fn sub(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(what))
}

fn mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(what))
}

fn totals(cost: Decimal, revenue: Decimal, what: &str) -> Result<Totals> {
    Totals::from_parts(cost, revenue).ok_or_else(|| overflow(what))
}

/// Whole hours worked between the task's dates.
fn task_hours(task: &Task) -> Decimal {
    Decimal::from(hours_between(task.fields.begin_date, task.fields.end_date))
}

pub fn planned_cost(task: &Task) -> Result<Decimal> {
    match &task.kind {
        TaskKind::Expense { amount, .. } => Ok(*amount),
        TaskKind::Activity { hourly_rate, .. } => {
            mul(task_hours(task), *hourly_rate, "planned activity cost")
        }
    }
}

/// Expense tasks carry a fixed revenue; activity tasks earn `revenue` per hour.
pub fn planned_revenue(task: &Task) -> Result<Decimal> {
    match &task.kind {
        TaskKind::Expense { .. } => Ok(task.fields.revenue),
        TaskKind::Activity { .. } => {
            mul(task_hours(task), task.fields.revenue, "planned activity revenue")
        }
    }
}

pub fn realized_cost(done: &Done) -> Result<Decimal> {
    match &done.kind {
        DoneKind::Expense { amount, .. } => Ok(*amount),
        DoneKind::Activity {
            begin_date,
            end_date,
            hourly_rate,
            ..
        } => mul(
            Decimal::from(hours_between(*begin_date, *end_date)),
            *hourly_rate,
            "realized activity cost",
        ),
    }
}

pub fn budget_totals(planned: &[Task]) -> Result<Totals> {
    let mut cost = Decimal::ZERO;
    let mut revenue = Decimal::ZERO;
    for task in planned {
        cost = add(cost, planned_cost(task)?, "budget cost")?;
        revenue = add(revenue, planned_revenue(task)?, "budget revenue")?;
    }
    totals(cost, revenue, "budget total")
}

/// Realized totals over live tasks. Tasks without dones do not contribute.
///
/// Revenue of a task mirrored from the budget is earned in proportion to the
/// share of planned cost already realized, or as the remaining margin once
/// the task is finished or over budget. Ad-hoc tasks only subtract the
/// unforeseen cost they caused.
pub fn project_totals(live: &[Task], dones: &[Done]) -> Result<Totals> {
    let mut realized: HashMap<i32, Decimal> = HashMap::new();
    for done in dones {
        let entry = realized.entry(done.task_id).or_default();
        *entry = add(*entry, realized_cost(done)?, "realized task cost")?;
    }

    let mut cost = Decimal::ZERO;
    let mut revenue = Decimal::ZERO;
    for task in live.iter().filter(|t| t.is_live()) {
        let Some(task_cost) = realized.get(&task.id).copied() else {
            continue;
        };
        let prev = planned_cost(task)?;
        let revn = planned_revenue(task)?;
        let ratio = if prev.is_zero() {
            task_cost
        } else {
            task_cost
                .checked_div(prev)
                .ok_or_else(|| overflow("realized cost ratio"))?
        };
        let settled = task.fields.finished || ratio >= Decimal::ONE;

        let earned = match task.origin() {
            None if settled => -task_cost,
            None => -mul(task_cost, ratio, "unforeseen cost")?,
            Some(_) if settled => sub(prev, task_cost, "remaining margin")?,
            Some(_) => mul(revn, ratio, "earned revenue")?,
        };
        revenue = add(revenue, earned, "project revenue")?;
        cost = add(cost, task_cost, "project cost")?;
    }
    totals(cost, revenue, "project total")
}

/// Loans count as income up front and as expense over their installments.
pub fn transaction_totals(transactions: &[Transaction]) -> Result<TxTotals> {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in transactions {
        match &tx.kind {
            TransactionKind::Income { amount } => income = add(income, *amount, "income")?,
            TransactionKind::Expense { amount } => expense = add(expense, *amount, "expense")?,
            TransactionKind::Refund { amount } => {
                income = sub(income, *amount, "income")?;
                expense = add(expense, *amount, "expense")?;
            }
            TransactionKind::Loan {
                amount,
                installment,
                months,
            } => {
                income = add(income, *amount, "income")?;
                let repaid = mul(Decimal::from(*months), *installment, "loan repayment")?;
                expense = add(expense, repaid, "expense")?;
            }
        }
    }
    Ok(TxTotals {
        income,
        expense,
        revenue: sub(income, expense, "cash-flow revenue")?,
    })
}

pub fn date_range<'a>(
    project: &Project,
    budget: Option<&Budget>,
    tasks: impl IntoIterator<Item = &'a Task>,
    dones: &[Done],
    transactions: &[Transaction],
) -> DateRange {
    let mut range = DateRange::default();
    range.include(project.register);
    if let Some(at) = budget.and_then(|b| b.register) {
        range.include(at);
    }
    for task in tasks {
        range.include(task.fields.begin_date);
        range.include(task.fields.end_date);
    }
    for done in dones {
        range.include(done.register);
    }
    for tx in transactions {
        range.include(tx.date);
    }
    range
}

/// Builds the full report of one project from its loaded rows.
///
/// Fails with [`Error::Unexpected`] when a sum leaves the decimal range.
pub fn build_report(
    project: &Project,
    budget: Option<&Budget>,
    planned: &[Task],
    live: &[Task],
    dones: &[Done],
    transactions: &[Transaction],
) -> Result<ProjectReport> {
    Ok(ProjectReport {
        dates: date_range(project, budget, planned.iter().chain(live), dones, transactions),
        budget: budget_totals(planned)?,
        tx: transaction_totals(transactions)?,
        proj: project_totals(live, dones)?,
    })
}
