//! Database model for clients and suppliers.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use budgetflow_core::parties::{NewParty, Party, PartyKind, PartyRole};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::parties)]
#[diesel(primary_key(uuid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartyDB {
    pub uuid: String,
    pub role: String,
    pub kind: String,
    pub name: String,
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub register: NaiveDateTime,
}

impl PartyDB {
    pub fn new(role: PartyRole, domain: NewParty) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            role: role.as_str().to_string(),
            kind: domain.kind.as_str().to_string(),
            name: domain.name.trim().to_string(),
            document: non_blank(domain.document),
            email: non_blank(domain.email),
            phone: non_blank(domain.phone),
            register: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<PartyDB> for Party {
    fn from(db: PartyDB) -> Self {
        // The CHECK constraints keep both columns in range.
        let role = PartyRole::from_str(&db.role).unwrap_or_else(|_| {
            log::error!("Party {} has unknown role '{}'", db.uuid, db.role);
            PartyRole::Client
        });
        let kind = PartyKind::from_str(&db.kind).unwrap_or_default();
        Self {
            uuid: db.uuid,
            role,
            kind,
            name: db.name,
            document: db.document,
            email: db.email,
            phone: db.phone,
            register: db.register,
        }
    }
}
