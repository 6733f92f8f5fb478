//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetflow_core::auth::Capability;
use budgetflow_core::users::{NewUser, User};

/// Database model for users. The capability is stored as four flag columns.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(primary_key(uuid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub uuid: String,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub auth_admin: bool,
    pub auth_project: bool,
    pub auth_personal: bool,
    pub auth_financial: bool,
    pub register: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            uuid: db.uuid,
            name: db.name,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            auth: Capability {
                admin: db.auth_admin,
                project: db.auth_project,
                personal: db.auth_personal,
                financial: db.auth_financial,
            },
            register: db.register,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: domain.name.trim().to_string(),
            username: domain.username.trim().to_string(),
            email: domain.email.filter(|e| !e.trim().is_empty()),
            password_hash: domain.password_hash,
            auth_admin: domain.auth.admin,
            auth_project: domain.auth.project,
            auth_personal: domain.auth.personal,
            auth_financial: domain.auth.financial,
            register: chrono::Utc::now().naive_utc(),
        }
    }
}
