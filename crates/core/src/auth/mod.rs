//! Authorization - the four capability flags carried by every user.

mod capability;

pub use capability::{Capability, Gate};
