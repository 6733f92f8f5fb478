use crate::auth::Capability;
use crate::errors::Result;
use crate::parties::parties_model::{NewParty, Party, PartyRole};
use async_trait::async_trait;

/// Trait for client/supplier repository operations
#[async_trait]
pub trait PartyRepositoryTrait: Send + Sync {
    fn list_parties(&self, role: PartyRole) -> Result<Vec<Party>>;
    async fn insert_party(&self, role: PartyRole, new_party: NewParty) -> Result<Party>;
}

/// Trait for client/supplier service operations
#[async_trait]
pub trait PartyServiceTrait: Send + Sync {
    fn list_clients(&self, caps: &Capability) -> Result<Vec<Party>>;
    fn list_suppliers(&self, caps: &Capability) -> Result<Vec<Party>>;
    async fn create_client(&self, caps: &Capability, new_party: NewParty) -> Result<Party>;
    async fn create_supplier(&self, caps: &Capability, new_party: NewParty) -> Result<Party>;
}
