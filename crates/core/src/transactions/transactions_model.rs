//! Transaction domain models.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::deserialize_datetime;

/// The kind of cash movement and its amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Expense {
        amount: Decimal,
    },
    Income {
        amount: Decimal,
    },
    Refund {
        amount: Decimal,
    },
    /// Money borrowed up front and paid back in `months` installments.
    Loan {
        amount: Decimal,
        installment: Decimal,
        months: i32,
    },
}

impl TransactionKind {
    pub fn amount(&self) -> Decimal {
        match self {
            TransactionKind::Expense { amount }
            | TransactionKind::Income { amount }
            | TransactionKind::Refund { amount }
            | TransactionKind::Loan { amount, .. } => *amount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense { .. } => "EXPENSE",
            TransactionKind::Income { .. } => "INCOME",
            TransactionKind::Refund { .. } => "REFUND",
            TransactionKind::Loan { .. } => "LOAN",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub uuid: String,
    pub project_uuid: String,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub register: NaiveDateTime,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub project_uuid: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: NaiveDateTime,
    pub kind: TransactionKind,
}
