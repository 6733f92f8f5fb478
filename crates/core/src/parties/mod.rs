//! Parties module - the clients projects are delivered to and the suppliers
//! expenses are paid to.

mod parties_model;
mod parties_service;
mod parties_traits;

pub use parties_model::{NewParty, Party, PartyKind, PartyRole};
pub use parties_service::PartyService;
pub use parties_traits::{PartyRepositoryTrait, PartyServiceTrait};
