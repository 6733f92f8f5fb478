//! Projects module - projects, their 1:1 budget and the per-project report.

mod projects_model;
mod projects_service;
mod projects_traits;


pub use projects_model::{NewProject, Project, ProjectSummary, ProjectUpdate};
pub use projects_service::{name_filter, ProjectService};
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
