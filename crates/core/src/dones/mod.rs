//! Dones module - append-only realization records against live tasks.

mod dones_model;
mod dones_service;
mod dones_traits;

pub use dones_model::{Done, DoneActivityInput, DoneExpenseInput, DoneInput, DoneKind, NewDone};
pub use dones_service::DoneService;
pub use dones_traits::{DoneRepositoryTrait, DoneServiceTrait};
