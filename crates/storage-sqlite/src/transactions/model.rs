//! Database model for transactions.
//!
//! The kind is flattened into `transaction_type` plus nullable loan columns.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use budgetflow_core::transactions::{NewTransaction, Transaction, TransactionKind};

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(primary_key(uuid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub uuid: String,
    pub project_uuid: String,
    pub description: Option<String>,
    pub transaction_type: String,
    pub amount: String,
    pub installment: Option<String>,
    pub months: Option<i32>,
    pub transaction_date: NaiveDateTime,
    pub register: NaiveDateTime,
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let (installment, months) = match &domain.kind {
            TransactionKind::Loan {
                installment,
                months,
                ..
            } => (Some(installment.to_string()), Some(*months)),
            _ => (None, None),
        };
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            project_uuid: domain.project_uuid,
            description: domain.description.filter(|d| !d.trim().is_empty()),
            transaction_type: domain.kind.as_str().to_string(),
            amount: domain.kind.amount().to_string(),
            installment,
            months,
            transaction_date: domain.date,
            register: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let amount = parse_decimal(&db.amount, "transactions.amount");
        let kind = match db.transaction_type.as_str() {
            "INCOME" => TransactionKind::Income { amount },
            "REFUND" => TransactionKind::Refund { amount },
            "LOAN" => TransactionKind::Loan {
                amount,
                installment: db
                    .installment
                    .as_deref()
                    .map(|v| parse_decimal(v, "transactions.installment"))
                    .unwrap_or(Decimal::ZERO),
                months: db.months.unwrap_or(0),
            },
            "EXPENSE" => TransactionKind::Expense { amount },
            other => {
                log::error!(
                    "Transaction {} has unknown type '{}'; reading it as an expense",
                    db.uuid,
                    other
                );
                TransactionKind::Expense { amount }
            }
        };
        Self {
            uuid: db.uuid,
            project_uuid: db.project_uuid,
            description: db.description,
            date: db.transaction_date,
            register: db.register,
            kind,
        }
    }
}
