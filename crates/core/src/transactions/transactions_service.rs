use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction, TransactionKind};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::auth::{Capability, Gate};
use crate::constants::MAX_LOAN_MONTHS;
use crate::errors::{Result, ValidationError};
use crate::projects::ProjectRepositoryTrait;
use crate::utils::check_money;

pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
    ) -> Self {
        TransactionService {
            transaction_repository,
            project_repository,
        }
    }
}

fn validate_kind(kind: &TransactionKind) -> Result<()> {
    if kind.amount() <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} amount must be positive",
            kind.as_str().to_lowercase()
        ))
        .into());
    }
    check_money("transaction amount", kind.amount())?;
    if let TransactionKind::Loan {
        installment,
        months,
        ..
    } = kind
    {
        if !(1..=MAX_LOAN_MONTHS).contains(months) {
            return Err(ValidationError::InvalidInput(format!(
                "loan must be paid in 1 to {} months",
                MAX_LOAN_MONTHS
            ))
            .into());
        }
        check_money("loan installment", *installment)?;
    }
    Ok(())
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(
        &self,
        caps: &Capability,
        project_uuid: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        caps.require(Gate::Financial)?;
        self.transaction_repository.list_transactions(project_uuid)
    }

    async fn create_transaction(
        &self,
        caps: &Capability,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        caps.require(Gate::Financial)?;
        if new_transaction.project_uuid.trim().is_empty() {
            return Err(ValidationError::MissingField("projectUuid".to_string()).into());
        }
        validate_kind(&new_transaction.kind)?;
        self.project_repository
            .get_project(&new_transaction.project_uuid)?;

        let transaction = self
            .transaction_repository
            .insert_transaction(new_transaction)
            .await?;
        info!(
            "Recorded {} transaction {} on project {}",
            transaction.kind, transaction.uuid, transaction.project_uuid
        );
        Ok(transaction)
    }
}
