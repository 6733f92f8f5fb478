//! Database model for projects.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetflow_core::projects::{NewProject, Project};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(primary_key(uuid))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectDB {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
    pub user_uuid: Option<String>,
    pub register: NaiveDateTime,
}

/// Columns a project update may change.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangesDB {
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
}

impl From<ProjectDB> for Project {
    fn from(db: ProjectDB) -> Self {
        Self {
            uuid: db.uuid,
            name: db.name,
            description: db.description,
            client_uuid: db.client_uuid,
            user_uuid: db.user_uuid,
            register: db.register,
        }
    }
}

impl From<NewProject> for ProjectDB {
    fn from(domain: NewProject) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4().to_string(),
            name: domain.name.trim().to_string(),
            description: domain.description,
            client_uuid: domain.client_uuid.filter(|c| !c.is_empty()),
            user_uuid: domain.user_uuid.filter(|u| !u.is_empty()),
            register: chrono::Utc::now().naive_utc(),
        }
    }
}
