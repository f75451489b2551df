//! Pre-annotation import endpoints

use std::path::{Path, PathBuf};

use labellerr_core::Progress;
use labellerr_core::domain::preannotation::{
    AnnotationFormat, PreannotationJob, PreannotationStatus,
};
use labellerr_core::validation::require_non_blank;
use serde::Deserialize;
use tracing::info;

use crate::error::{ClientError, Result};
use crate::poll::{FetchFuture, JobHandle, PollConfig, PollError, Poller};
use crate::transport::{ApiRequest, FilePart};
use crate::{LabellerrClient, PollResult};

#[derive(Deserialize)]
struct UploadAccepted {
    job_id: String,
}

impl LabellerrClient {
    // =============================================================================
    // Pre-annotations
    // =============================================================================

    /// Upload a file of existing annotations into a project
    ///
    /// # Arguments
    /// * `project_id` - The project receiving the annotations
    /// * `format` - Format of the annotation file
    /// * `annotation_file` - Path of the file to upload
    ///
    /// # Returns
    /// The import job, which the platform processes asynchronously
    pub async fn upload_preannotation(
        &self,
        project_id: &str,
        format: AnnotationFormat,
        annotation_file: &Path,
    ) -> Result<PreannotationJob> {
        require_non_blank("project_id", project_id)?;

        let bytes = tokio::fs::read(annotation_file)
            .await
            .map_err(|e| ClientError::io(annotation_file, e))?;
        let file_name = annotation_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let request = ApiRequest::post("/actions/upload_answers")
            .query("project_id", project_id)
            .query("answer_format", format)
            .files(vec![FilePart { file_name, bytes }]);
        let accepted: UploadAccepted = self.call_response(request).await?;

        info!(
            "Pre-annotation upload accepted for project {} (job {})",
            project_id, accepted.job_id
        );
        Ok(PreannotationJob {
            job_id: accepted.job_id,
            project_id: project_id.to_string(),
        })
    }

    /// Fetch the status of an import job once
    pub async fn preannotation_status(
        &self,
        job: &PreannotationJob,
    ) -> Result<PreannotationStatus> {
        let request = ApiRequest::get("/actions/upload_answers_status")
            .query("project_id", &job.project_id)
            .query("job_id", &job.job_id);
        self.call_response(request).await
    }

    /// Poll an import job until it completes
    pub async fn wait_for_preannotation(
        &self,
        job: &PreannotationJob,
        config: PollConfig,
    ) -> PollResult<PreannotationStatus> {
        preannotation_poller(self.clone(), job.clone(), config)
            .run()
            .await
    }

    /// Poll an import job on a background task
    pub fn wait_for_preannotation_async(
        &self,
        job: &PreannotationJob,
        config: PollConfig,
    ) -> JobHandle<PreannotationStatus, ClientError> {
        preannotation_poller(self.clone(), job.clone(), config).spawn()
    }

    /// Upload a pre-annotation file and poll the resulting job to completion
    ///
    /// An upload failure is reported as a fetch error on attempt 0.
    pub async fn upload_preannotation_and_wait(
        &self,
        project_id: &str,
        format: AnnotationFormat,
        annotation_file: &Path,
        config: PollConfig,
    ) -> PollResult<PreannotationStatus> {
        let job = self
            .upload_preannotation(project_id, format, annotation_file)
            .await
            .map_err(|source| PollError::Fetch { attempt: 0, source })?;
        self.wait_for_preannotation(&job, config).await
    }

    /// Upload and poll on a background task
    pub fn upload_preannotation_async(
        &self,
        project_id: &str,
        format: AnnotationFormat,
        annotation_file: PathBuf,
        config: PollConfig,
    ) -> JobHandle<PreannotationStatus, ClientError> {
        let client = self.clone();
        let project_id = project_id.to_string();
        JobHandle::spawn(async move {
            client
                .upload_preannotation_and_wait(&project_id, format, &annotation_file, config)
                .await
        })
    }
}

fn preannotation_poller(
    client: LabellerrClient,
    job: PreannotationJob,
    config: PollConfig,
) -> Poller<
    impl FnMut() -> FetchFuture<PreannotationStatus, ClientError> + Send + 'static,
    impl Fn(&PreannotationStatus) -> Progress + Send + 'static,
    PreannotationStatus,
    ClientError,
> {
    let job_id = job.job_id.clone();
    let fetch = move || -> FetchFuture<PreannotationStatus, ClientError> {
        let client = client.clone();
        let job = job.clone();
        Box::pin(async move { client.preannotation_status(&job).await })
    };

    Poller::new(fetch, PreannotationStatus::progress)
        .with_config(config)
        .on_success(move |_| info!("Pre-annotation job {} completed", job_id))
}
