//! Project API endpoints

use labellerr_core::domain::project::Project;
use labellerr_core::dto::project::CreateProjectParams;
use labellerr_core::registry::ProjectKind;
use serde::Deserialize;
use tracing::info;

use crate::LabellerrClient;
use crate::error::Result;
use crate::transport::ApiRequest;

#[derive(Deserialize)]
struct ProjectCreated {
    project_id: String,
}

impl LabellerrClient {
    // =============================================================================
    // Project Management
    // =============================================================================

    /// Create a project over existing datasets and an annotation template
    ///
    /// # Arguments
    /// * `params` - Project name, datasets, template, and rotation settings
    ///
    /// # Returns
    /// The id of the new project
    pub async fn create_project(&self, params: &CreateProjectParams) -> Result<String> {
        params.validate()?;

        let request = ApiRequest::post("/projects/create").json(params)?;
        let created: ProjectCreated = self.call_response(request).await?;

        info!(
            "Created project {} ({})",
            created.project_id, params.project_name
        );
        Ok(created.project_id)
    }

    /// Get a project by ID
    ///
    /// # Arguments
    /// * `project_id` - The project ID
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let request = ApiRequest::get(format!("/projects/{}", project_id));
        self.call_response(request).await
    }

    /// Get a project wrapped in the variant for its data type
    pub async fn get_project_kind(&self, project_id: &str) -> Result<ProjectKind> {
        let project = self.get_project(project_id).await?;
        Ok(project.kind()?)
    }
}
