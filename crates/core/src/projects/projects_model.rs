//! Project domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::reporting::ProjectReport;

/// Domain model representing a project
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
    pub user_uuid: Option<String>,
    pub register: NaiveDateTime,
}

/// Input model for creating a new project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
    pub user_uuid: Option<String>,
}

/// Input model for updating a project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub client_uuid: Option<String>,
}

/// A project together with its aggregated report.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub project: Project,
    pub report: ProjectReport,
}
