use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result};

/// Capability gates checked on entry to every service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    Admin,
    Project,
    Personal,
    Financial,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::Admin => "admin",
            Gate::Project => "project",
            Gate::Personal => "personal",
            Gate::Financial => "financial",
        };
        f.write_str(name)
    }
}

/// The `Auth` record of a user.
///
/// The flags are independent: `admin` does not imply any of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub project: bool,
    #[serde(default)]
    pub personal: bool,
    #[serde(default)]
    pub financial: bool,
}

impl Capability {
    pub const fn none() -> Self {
        Self {
            admin: false,
            project: false,
            personal: false,
            financial: false,
        }
    }

    pub const fn all() -> Self {
        Self {
            admin: true,
            project: true,
            personal: true,
            financial: true,
        }
    }

    pub fn only(gate: Gate) -> Self {
        let mut caps = Self::none();
        match gate {
            Gate::Admin => caps.admin = true,
            Gate::Project => caps.project = true,
            Gate::Personal => caps.personal = true,
            Gate::Financial => caps.financial = true,
        }
        caps
    }

    pub fn allows(&self, gate: Gate) -> bool {
        match gate {
            Gate::Admin => self.admin,
            Gate::Project => self.project,
            Gate::Personal => self.personal,
            Gate::Financial => self.financial,
        }
    }

    pub fn require(&self, gate: Gate) -> Result<()> {
        if self.allows(gate) {
            Ok(())
        } else {
            Err(Error::Authorization(format!(
                "the '{}' capability is required",
                gate
            )))
        }
    }
}
