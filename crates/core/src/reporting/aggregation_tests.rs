//! Tests for budget, realized and cash-flow aggregation.

#[cfg(test)]
mod tests {
    use crate::budgets::Budget;
    use crate::dones::{Done, DoneKind};
    use crate::errors::Error;
    use crate::projects::Project;
    use crate::reporting::*;
    use crate::tasks::{Task, TaskFields, TaskKind, TaskStage};
    use crate::transactions::{Transaction, TransactionKind};
    use crate::utils::format_brl;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn fields(begin: NaiveDateTime, end: NaiveDateTime, revenue: Decimal) -> TaskFields {
        TaskFields {
            name: "Task".to_string(),
            description: String::new(),
            finished: false,
            begin_date: begin,
            end_date: end,
            revenue,
            status_uuid: "open".to_string(),
            project_uuid: "p1".to_string(),
            user_uuid: None,
        }
    }

    fn expense_task(id: i32, origin: Option<i32>, amount: Decimal, revenue: Decimal) -> Task {
        Task {
            id,
            uuid: format!("t{}", id),
            stage: TaskStage::Live { origin },
            fields: fields(at(1, 8, 0), at(2, 8, 0), revenue),
            kind: TaskKind::Expense {
                uuid: format!("te{}", id),
                amount,
            },
        }
    }

    fn planned_activity(id: i32, hours: u32, rate: Decimal, revenue: Decimal) -> Task {
        Task {
            id,
            uuid: format!("t{}", id),
            stage: TaskStage::Planned {
                budget_uuid: "b1".to_string(),
            },
            fields: fields(at(1, 8, 0), at(1, 8 + hours, 0), revenue),
            kind: TaskKind::Activity {
                uuid: format!("ta{}", id),
                hourly_rate: rate,
            },
        }
    }

    fn expense_done(id: i32, task_id: i32, amount: Decimal) -> Done {
        Done {
            id,
            uuid: format!("d{}", id),
            name: "Done".to_string(),
            description: String::new(),
            user_uuid: "u1".to_string(),
            task_id,
            register: at(3, 9, 0),
            kind: DoneKind::Expense {
                uuid: format!("de{}", id),
                amount,
                date: at(3, 9, 0),
                supplier_uuid: None,
            },
        }
    }

    fn transaction(day: u32, kind: TransactionKind) -> Transaction {
        Transaction {
            uuid: format!("tx{}", day),
            project_uuid: "p1".to_string(),
            description: None,
            date: at(day, 12, 0),
            register: at(day, 12, 0),
            kind,
        }
    }

    // ==================== Planned figures ====================

    #[test]
    fn activity_cost_uses_whole_hours() {
        let mut task = planned_activity(1, 2, dec!(50), dec!(80));
        assert_eq!(planned_cost(&task).unwrap(), dec!(100));
        assert_eq!(planned_revenue(&task).unwrap(), dec!(160));

        task.fields.end_date = at(1, 8, 59);
        assert_eq!(planned_cost(&task).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn budget_totals_sum_cost_and_revenue() {
        let mut expense = expense_task(1, None, dec!(1000), dec!(200));
        expense.stage = TaskStage::Planned {
            budget_uuid: "b1".to_string(),
        };
        let activity = planned_activity(2, 3, dec!(10), dec!(20));

        let totals = budget_totals(&[expense, activity]).unwrap();
        assert_eq!(totals.cost, dec!(1030));
        assert_eq!(totals.revenue, dec!(260));
        assert_eq!(totals.total, dec!(1290));
    }

    #[test]
    fn budget_total_formats_as_brl() {
        let mut task = expense_task(1, None, dec!(1000), dec!(200));
        task.stage = TaskStage::Planned {
            budget_uuid: "b1".to_string(),
        };
        let totals = budget_totals(&[task]).unwrap();
        assert_eq!(format_brl(totals.total), "R$ 1.200,00");
    }

    #[test]
    fn empty_budget_is_zero() {
        assert_eq!(budget_totals(&[]).unwrap(), Totals::default());
    }

    // ==================== Realized figures ====================

    #[test]
    fn mirrored_task_earns_revenue_by_ratio() {
        let task = expense_task(10, Some(1), dec!(100), dec!(40));
        let totals = project_totals(&[task], &[expense_done(1, 10, dec!(50))]).unwrap();
        assert_eq!(totals.cost, dec!(50));
        assert_eq!(totals.revenue, dec!(20));
        assert_eq!(totals.total, dec!(70));
    }

    #[test]
    fn mirrored_task_over_budget_earns_remaining_margin() {
        let task = expense_task(10, Some(1), dec!(100), dec!(40));
        let totals = project_totals(&[task], &[expense_done(1, 10, dec!(150))]).unwrap();
        assert_eq!(totals.revenue, dec!(-50));
        assert_eq!(totals.cost, dec!(150));
    }

    #[test]
    fn finished_mirrored_task_settles_margin() {
        let mut task = expense_task(10, Some(1), dec!(100), dec!(40));
        task.fields.finished = true;
        let totals = project_totals(&[task], &[expense_done(1, 10, dec!(30))]).unwrap();
        assert_eq!(totals.revenue, dec!(70));
    }

    #[test]
    fn ad_hoc_task_subtracts_unforeseen_cost() {
        let task = expense_task(20, None, dec!(100), dec!(0));
        let totals = project_totals(&[task], &[expense_done(1, 20, dec!(80))]).unwrap();
        assert_eq!(totals.revenue, dec!(-64));
        assert_eq!(totals.cost, dec!(80));
    }

    #[test]
    fn finished_ad_hoc_task_subtracts_full_cost() {
        let mut task = expense_task(20, None, dec!(100), dec!(0));
        task.fields.finished = true;
        let totals = project_totals(&[task], &[expense_done(1, 20, dec!(80))]).unwrap();
        assert_eq!(totals.revenue, dec!(-80));
    }

    #[test]
    fn tasks_without_dones_are_ignored() {
        let tasks = [
            expense_task(10, Some(1), dec!(100), dec!(40)),
            expense_task(11, Some(2), dec!(500), dec!(900)),
        ];
        let totals = project_totals(&tasks, &[expense_done(1, 10, dec!(100))]).unwrap();
        assert_eq!(totals.cost, dec!(100));
        assert_eq!(totals.revenue, dec!(0));
    }

    #[test]
    fn zero_planned_cost_uses_cost_as_ratio() {
        let task = expense_task(20, None, Decimal::ZERO, Decimal::ZERO);
        let totals = project_totals(&[task], &[expense_done(1, 20, dec!(0.5))]).unwrap();
        assert_eq!(totals.revenue, dec!(-0.25));
    }

    #[test]
    fn activity_done_cost_uses_hours() {
        let done = Done {
            kind: DoneKind::Activity {
                uuid: "da".to_string(),
                begin_date: at(3, 10, 0),
                end_date: at(3, 13, 30),
                hourly_rate: dec!(20),
            },
            ..expense_done(1, 10, Decimal::ZERO)
        };
        assert_eq!(realized_cost(&done).unwrap(), dec!(60));
    }

    // ==================== Transactions ====================

    #[test]
    fn loans_count_as_income_then_installments() {
        let txs = [
            transaction(1, TransactionKind::Income { amount: dec!(500) }),
            transaction(2, TransactionKind::Expense { amount: dec!(100) }),
            transaction(3, TransactionKind::Refund { amount: dec!(20) }),
            transaction(
                4,
                TransactionKind::Loan {
                    amount: dec!(1000),
                    installment: dec!(110),
                    months: 10,
                },
            ),
        ];
        let totals = transaction_totals(&txs).unwrap();
        assert_eq!(totals.income, dec!(1480));
        assert_eq!(totals.expense, dec!(1220));
        assert_eq!(totals.revenue, dec!(260));
    }

    // ==================== Dates ====================

    #[test]
    fn date_range_spans_every_dated_row() {
        let project = Project {
            uuid: "p1".to_string(),
            name: "House".to_string(),
            description: None,
            client_uuid: None,
            user_uuid: None,
            register: at(2, 0, 0),
        };
        let budget = Budget {
            uuid: "b1".to_string(),
            project_uuid: "p1".to_string(),
            register: Some(at(4, 0, 0)),
        };
        let tasks = [expense_task(1, None, dec!(1), dec!(1))];
        let txs = [transaction(20, TransactionKind::Income { amount: dec!(1) })];

        let range = date_range(&project, Some(&budget), &tasks, &[], &txs);
        assert_eq!(range.first, Some(at(1, 8, 0)));
        assert_eq!(range.last, Some(at(20, 12, 0)));
    }

    #[test]
    fn report_combines_all_sections() {
        let project = Project {
            uuid: "p1".to_string(),
            name: "House".to_string(),
            description: None,
            client_uuid: None,
            user_uuid: None,
            register: at(1, 0, 0),
        };
        let planned = [planned_activity(1, 2, dec!(50), dec!(80))];
        let live = [expense_task(10, Some(1), dec!(100), dec!(40))];
        let dones = [expense_done(1, 10, dec!(50))];

        let report = build_report(&project, None, &planned, &live, &dones, &[]).unwrap();
        assert_eq!(report.budget.total, dec!(260));
        assert_eq!(report.proj.revenue, dec!(20));
        assert_eq!(report.tx, TxTotals::default());
        assert_eq!(report.dates.first, Some(at(1, 0, 0)));
    }

    // ==================== Out of range ====================

    #[test]
    fn oversized_activity_cost_is_an_error() {
        let task = planned_activity(1, 4, Decimal::MAX, dec!(0));
        assert!(matches!(planned_cost(&task), Err(Error::Unexpected(_))));
        assert!(matches!(budget_totals(&[task]), Err(Error::Unexpected(_))));
    }

    #[test]
    fn budget_sum_past_the_decimal_range_is_an_error() {
        let mut first = expense_task(1, None, Decimal::MAX, dec!(0));
        first.stage = TaskStage::Planned {
            budget_uuid: "b1".to_string(),
        };
        let second = Task {
            id: 2,
            ..first.clone()
        };
        assert!(matches!(
            budget_totals(&[first, second]),
            Err(Error::Unexpected(_))
        ));
    }

    #[test]
    fn oversized_loan_repayment_is_an_error() {
        let txs = [transaction(
            1,
            TransactionKind::Loan {
                amount: dec!(1),
                installment: Decimal::MAX,
                months: i32::MAX,
            },
        )];
        assert!(matches!(transaction_totals(&txs), Err(Error::Unexpected(_))));
    }

    #[test]
    fn report_fails_instead_of_panicking_on_oversized_rows() {
        let project = Project {
            uuid: "p1".to_string(),
            name: "House".to_string(),
            description: None,
            client_uuid: None,
            user_uuid: None,
            register: at(1, 0, 0),
        };
        let live = [expense_task(10, Some(1), dec!(1), dec!(0))];
        let dones = [
            expense_done(1, 10, Decimal::MAX),
            expense_done(2, 10, Decimal::MAX),
        ];
        let result = build_report(&project, None, &[], &live, &dones, &[]);
        assert!(matches!(result, Err(Error::Unexpected(_))));
    }
}
