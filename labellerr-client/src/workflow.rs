//! Project creation workflow
//!
//! Creates a dataset from local files, waits for the platform to finish
//! processing it, obtains an annotation template, and creates a project
//! over both. Every step depends on the previous one; the first failure
//! stops the run.

use std::fmt;
use std::time::Duration;

use labellerr_core::ValidationError;
use labellerr_core::dto::project::{CreateProjectParams, ProjectPayload, TemplateChoice};
use thiserror::Error;
use tracing::{info, warn};

use crate::poll::{PollConfig, PollError};
use crate::uploads::collect_files;
use crate::{ClientError, LabellerrClient};

/// A stage of [`LabellerrClient::create_project_with_dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    CreateDataset,
    UploadFiles,
    WaitForDataset,
    CreateTemplate,
    CreateProject,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::CreateDataset => "create dataset",
            WorkflowStep::UploadFiles => "upload files",
            WorkflowStep::WaitForDataset => "wait for dataset",
            WorkflowStep::CreateTemplate => "create annotation template",
            WorkflowStep::CreateProject => "create project",
        };
        f.write_str(name)
    }
}

/// Why the workflow stopped
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The payload was rejected before any request was sent
    #[error("Invalid project payload: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to {step}: {source}")]
    Step {
        step: WorkflowStep,
        #[source]
        source: ClientError,
    },

    /// The dataset was created but did not become ready
    #[error("Dataset {dataset_id} did not become ready: {source}")]
    DatasetNotReady {
        dataset_id: String,
        #[source]
        source: PollError<ClientError>,
    },
}

impl WorkflowError {
    /// The step that failed, if the payload got past validation
    pub fn step(&self) -> Option<WorkflowStep> {
        match self {
            WorkflowError::Validation(_) => None,
            WorkflowError::Step { step, .. } => Some(*step),
            WorkflowError::DatasetNotReady { .. } => Some(WorkflowStep::WaitForDataset),
        }
    }
}

trait StepContext<T> {
    fn step(self, step: WorkflowStep) -> Result<T, WorkflowError>;
}

impl<T> StepContext<T> for Result<T, ClientError> {
    fn step(self, step: WorkflowStep) -> Result<T, WorkflowError> {
        self.map_err(|source| WorkflowError::Step { step, source })
    }
}

/// Tuning for [`LabellerrClient::create_project_with_dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// How the dataset readiness check polls
    pub dataset_poll: PollConfig,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            dataset_poll: PollConfig::new(Duration::from_secs(5))
                .with_timeout(Duration::from_secs(60)),
        }
    }
}

/// Ids of everything the workflow created or reused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub dataset_id: String,
    pub template_id: String,
    pub project_id: String,
    /// Number of files uploaded into the dataset
    pub files_uploaded: usize,
}

impl LabellerrClient {
    // =============================================================================
    // Workflows
    // =============================================================================

    /// Create a dataset from local files and a project over it
    ///
    /// The payload is validated first; nothing is sent if it is rejected.
    /// Then, in order: collect and upload the files into a new dataset,
    /// wait for the dataset to be ready, create the annotation template
    /// (unless an existing template id was given), and create the project.
    /// Resources created before a failing step are left in place.
    ///
    /// # Arguments
    /// * `payload` - The project description
    /// * `options` - Polling settings for the dataset readiness check
    pub async fn create_project_with_dataset(
        &self,
        payload: &ProjectPayload,
        options: WorkflowOptions,
    ) -> Result<CreatedProject, WorkflowError> {
        let plan = payload.validate()?;
        let client = self.for_client(&plan.client_id);
        let data_type = plan.dataset.data_type;

        info!(
            "Creating project {} with dataset {}",
            plan.project_name, plan.dataset.dataset_name
        );

        let files = collect_files(&plan.source, data_type)
            .await
            .step(WorkflowStep::UploadFiles)?;

        let dataset_id = client
            .create_dataset(&plan.dataset, Some(&plan.created_by))
            .await
            .step(WorkflowStep::CreateDataset)?;

        let uploaded = client
            .upload_collected(&dataset_id, data_type, &files)
            .await
            .step(WorkflowStep::UploadFiles)?;

        if let Err(source) = client.wait_for_dataset(&dataset_id, options.dataset_poll).await {
            warn!("Dataset {} did not become ready: {}", dataset_id, source);
            return Err(WorkflowError::DatasetNotReady { dataset_id, source });
        }

        let template_id = match plan.template {
            TemplateChoice::Existing(template_id) => template_id,
            TemplateChoice::Create(params) => client
                .create_template(params)
                .await
                .step(WorkflowStep::CreateTemplate)?,
        };

        let params = CreateProjectParams {
            project_name: plan.project_name,
            data_type,
            attached_datasets: vec![dataset_id.clone()],
            annotation_template_id: template_id.clone(),
            rotations: plan.rotations,
            use_ai: plan.use_ai,
            autolabel: plan.autolabel,
            created_by: Some(plan.created_by),
        };
        let project_id = client
            .create_project(&params)
            .await
            .step(WorkflowStep::CreateProject)?;

        info!(
            "Project {} ready (dataset {}, template {})",
            project_id, dataset_id, template_id
        );

        Ok(CreatedProject {
            dataset_id,
            template_id,
            project_id,
            files_uploaded: uploaded.files,
        })
    }
}
