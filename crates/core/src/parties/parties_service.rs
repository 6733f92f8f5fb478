use std::sync::Arc;

use async_trait::async_trait;

use super::parties_model::{NewParty, Party, PartyRole};
use super::parties_traits::{PartyRepositoryTrait, PartyServiceTrait};
use crate::auth::{Capability, Gate};
use crate::errors::{Result, ValidationError};

pub struct PartyService {
    repository: Arc<dyn PartyRepositoryTrait>,
}

impl PartyService {
    pub fn new(repository: Arc<dyn PartyRepositoryTrait>) -> Self {
        PartyService { repository }
    }

    async fn create(&self, caps: &Capability, role: PartyRole, new_party: NewParty) -> Result<Party> {
        caps.require(Gate::Admin)?;
        if new_party.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.repository.insert_party(role, new_party).await
    }
}

#[async_trait]
impl PartyServiceTrait for PartyService {
    fn list_clients(&self, caps: &Capability) -> Result<Vec<Party>> {
        caps.require(Gate::Admin)?;
        self.repository.list_parties(PartyRole::Client)
    }

    fn list_suppliers(&self, caps: &Capability) -> Result<Vec<Party>> {
        caps.require(Gate::Admin)?;
        self.repository.list_parties(PartyRole::Supplier)
    }

    async fn create_client(&self, caps: &Capability, new_party: NewParty) -> Result<Party> {
        self.create(caps, PartyRole::Client, new_party).await
    }

    async fn create_supplier(&self, caps: &Capability, new_party: NewParty) -> Result<Party> {
        self.create(caps, PartyRole::Supplier, new_party).await
    }
}
