use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use budgetflow_core::budgets::Budget;
use budgetflow_core::errors::Error;
use budgetflow_core::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectUpdate};
use budgetflow_core::Result;

use super::model::{ProjectChangesDB, ProjectDB};
use crate::budgets::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::{budgets, projects};

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_project(&self, uuid: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        projects::table
            .find(uuid)
            .select(ProjectDB::as_select())
            .first::<ProjectDB>(&mut conn)
            .or_not_found(|| format!("project {}", uuid))
            .map(Project::from)
    }

    fn search_projects(&self, name_filter: Option<&str>) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = projects::table.into_boxed();
        if let Some(needle) = name_filter {
            // LIKE is case-insensitive for ASCII in SQLite.
            query = query.filter(projects::name.like(format!("%{}%", needle)));
        }
        let rows = query
            .select(ProjectDB::as_select())
            .order((projects::register.desc(), projects::name.asc()))
            .load::<ProjectDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn insert_project(&self, new_project: NewProject) -> Result<(Project, Budget)> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<(Project, Budget)> {
                let project_row: ProjectDB = new_project.into();
                diesel::insert_into(projects::table)
                    .values(&project_row)
                    .execute(conn)
                    .into_core()?;

                let budget_row = BudgetDB {
                    uuid: uuid::Uuid::new_v4().to_string(),
                    project_uuid: project_row.uuid.clone(),
                    register: None,
                };
                diesel::insert_into(budgets::table)
                    .values(&budget_row)
                    .execute(conn)
                    .into_core()?;

                Ok((project_row.into(), budget_row.into()))
            })
            .await
    }

    async fn update_project(&self, update: ProjectUpdate) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let changes = ProjectChangesDB {
                    name: update.name.trim().to_string(),
                    description: update.description,
                    client_uuid: update.client_uuid.filter(|c| !c.is_empty()),
                };
                let affected = diesel::update(projects::table.find(&update.uuid))
                    .set(&changes)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("project {}", update.uuid)));
                }
                projects::table
                    .find(&update.uuid)
                    .select(ProjectDB::as_select())
                    .first::<ProjectDB>(conn)
                    .into_core()
                    .map(Project::from)
            })
            .await
    }
}
