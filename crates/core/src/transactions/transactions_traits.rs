use crate::auth::Capability;
use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction};
use async_trait::async_trait;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn list_transactions(&self, project_uuid: Option<&str>) -> Result<Vec<Transaction>>;
    async fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(
        &self,
        caps: &Capability,
        project_uuid: Option<&str>,
    ) -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        caps: &Capability,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
}
