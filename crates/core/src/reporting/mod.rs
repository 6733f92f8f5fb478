//! Reporting module - budget, live and cash-flow totals per project.

pub mod aggregation;
mod report_model;

#[cfg(test)]
mod aggregation_tests;

pub use aggregation::{
    budget_totals, build_report, date_range, planned_cost, planned_revenue, project_totals,
    realized_cost, transaction_totals,
};
pub use report_model::{DateRange, ProjectReport, Totals, TxTotals};
