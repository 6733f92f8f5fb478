//! User domain models.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::auth::Capability;

/// Domain model representing a user.
///
/// `password_hash` holds a PHC string produced at the server boundary and is
/// never serialized.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uuid: String,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub auth: Capability,
    pub register: NaiveDateTime,
}

/// Input model for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub auth: Capability,
}
