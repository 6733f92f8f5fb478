use crate::auth::Capability;
use crate::dones::dones_model::{Done, DoneInput, NewDone};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for realization repository operations
#[async_trait]
pub trait DoneRepositoryTrait: Send + Sync {
    fn list_dones_for_tasks(&self, task_ids: &[i32]) -> Result<Vec<Done>>;
    fn list_project_dones(&self, project_uuid: &str) -> Result<Vec<Done>>;
    async fn insert_done(&self, new_done: NewDone) -> Result<Done>;
}

/// Trait for realization service operations.
///
/// Realizations are append-only: there is no update or delete.
#[async_trait]
pub trait DoneServiceTrait: Send + Sync {
    fn list_dones(&self, caps: &Capability, project_uuid: &str) -> Result<Vec<Done>>;
    async fn create_done(&self, caps: &Capability, input: DoneInput) -> Result<Done>;
}
