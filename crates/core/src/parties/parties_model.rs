//! Client and supplier domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

/// Whether a party is a client or a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyRole {
    Client,
    Supplier,
}

/// Legal nature of a party: an individual or a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyKind {
    #[default]
    Person,
    Enterprise,
}

impl PartyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyRole::Client => "CLIENT",
            PartyRole::Supplier => "SUPPLIER",
        }
    }
}

impl PartyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyKind::Person => "PERSON",
            PartyKind::Enterprise => "ENTERPRISE",
        }
    }
}

impl fmt::Display for PartyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(PartyRole::Client),
            "SUPPLIER" => Ok(PartyRole::Supplier),
            other => Err(ValidationError::InvalidInput(format!("unknown party role '{}'", other)).into()),
        }
    }
}

impl FromStr for PartyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERSON" => Ok(PartyKind::Person),
            "ENTERPRISE" => Ok(PartyKind::Enterprise),
            other => Err(ValidationError::InvalidInput(format!("unknown party kind '{}'", other)).into()),
        }
    }
}

/// A client or supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub uuid: String,
    pub role: PartyRole,
    pub kind: PartyKind,
    pub name: String,
    /// CPF for people, CNPJ for enterprises.
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub register: NaiveDateTime,
}

/// Input model for creating a client or supplier
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParty {
    pub name: String,
    #[serde(default)]
    pub kind: PartyKind,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
