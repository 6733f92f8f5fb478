use crate::auth::Capability;
use crate::budgets::Budget;
use crate::errors::Result;
use crate::projects::projects_model::{NewProject, Project, ProjectSummary, ProjectUpdate};
use async_trait::async_trait;

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_project(&self, uuid: &str) -> Result<Project>;
    /// Projects whose name contains `name_filter` (case-insensitive); all when `None`.
    fn search_projects(&self, name_filter: Option<&str>) -> Result<Vec<Project>>;
    /// Inserts the project and its empty budget in one write.
    async fn insert_project(&self, new_project: NewProject) -> Result<(Project, Budget)>;
    async fn update_project(&self, update: ProjectUpdate) -> Result<Project>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_project(&self, caps: &Capability, uuid: &str) -> Result<Project>;
    fn select_projects(&self, caps: &Capability, key: &str) -> Result<Vec<ProjectSummary>>;
    async fn create_project(&self, caps: &Capability, new_project: NewProject) -> Result<(Project, Budget)>;
    async fn update_project(&self, caps: &Capability, update: ProjectUpdate) -> Result<Project>;
}
