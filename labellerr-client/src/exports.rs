//! Export API endpoints

use labellerr_core::Progress;
use labellerr_core::domain::export::{ExportDestination, ExportStatus, ExportStatusReport};
use labellerr_core::dto::export::{CreateExportRequest, ExportConfig};
use labellerr_core::validation::require_non_blank;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::Result;
use crate::poll::{FetchFuture, JobHandle, PollConfig, Poller};
use crate::transport::ApiRequest;
use crate::{ClientError, LabellerrClient, PollResult};

#[derive(Deserialize)]
struct ExportCreated {
    report_id: String,
}

/// An export report being generated for a project
#[derive(Debug, Clone)]
pub struct Export {
    client: LabellerrClient,
    project_id: String,
    report_id: String,
}

impl Export {
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Fetch the current status once
    ///
    /// A report the platform does not list yet comes back as a pending status.
    pub async fn status(&self) -> Result<ExportStatus> {
        let report = self
            .client
            .check_export_status(&self.project_id, std::slice::from_ref(&self.report_id))
            .await?;
        Ok(status_of(report, &self.report_id))
    }

    /// Poll until the export is generated
    ///
    /// # Arguments
    /// * `config` - Interval and limits of the poll loop
    pub async fn wait(&self, config: PollConfig) -> PollResult<ExportStatus> {
        self.poller(config).run().await
    }

    /// Poll on a background task
    pub fn wait_async(&self, config: PollConfig) -> JobHandle<ExportStatus, ClientError> {
        self.poller(config).spawn()
    }

    fn poller(
        &self,
        config: PollConfig,
    ) -> Poller<
        impl FnMut() -> FetchFuture<ExportStatus, ClientError> + Send + 'static + use<>,
        impl Fn(&ExportStatus) -> Progress + Send + 'static + use<>,
        ExportStatus,
        ClientError,
    > {
        let export = self.clone();
        let fetch = move || -> FetchFuture<ExportStatus, ClientError> {
            let export = export.clone();
            Box::pin(async move { export.status().await })
        };

        let report_id = self.report_id.clone();
        Poller::new(fetch, ExportStatus::progress)
            .with_config(config)
            .on_success(move |_| info!("Export {} completed", report_id))
            .on_failure(|status: &ExportStatus| {
                warn!("Export {} failed: {:?}", status.report_id, status.extra)
            })
    }
}

fn status_of(report: ExportStatusReport, report_id: &str) -> ExportStatus {
    report
        .status
        .into_iter()
        .find(|item| item.report_id == report_id)
        .unwrap_or_else(|| ExportStatus::pending(report_id))
}

impl LabellerrClient {
    // =============================================================================
    // Exports
    // =============================================================================

    /// Start generating an export of a project's annotations
    ///
    /// # Arguments
    /// * `project_id` - The project to export
    /// * `config` - Name, format, statuses, and destination of the export
    ///
    /// # Returns
    /// A handle on the export report
    pub async fn create_export(&self, project_id: &str, config: &ExportConfig) -> Result<Export> {
        require_non_blank("project_id", project_id)?;
        config.validate()?;

        let request = ApiRequest::post("/sdk/export/files")
            .query("project_id", project_id)
            .json(&CreateExportRequest::all_questions(config))?;
        let created: ExportCreated = self.call_response(request).await?;

        info!(
            "Started export {} of project {}",
            created.report_id, project_id
        );
        Ok(self.export(project_id, created.report_id))
    }

    /// Start an export delivered as a local download
    pub async fn create_local_export(
        &self,
        project_id: &str,
        config: &ExportConfig,
    ) -> Result<Export> {
        let config = ExportConfig {
            export_destination: ExportDestination::Local,
            ..config.clone()
        };
        self.create_export(project_id, &config).await
    }

    /// Re-attach to an export started earlier
    pub fn export(&self, project_id: impl Into<String>, report_id: impl Into<String>) -> Export {
        Export {
            client: self.clone(),
            project_id: project_id.into(),
            report_id: report_id.into(),
        }
    }

    /// Fetch the status of one or more export reports of a project
    pub async fn check_export_status(
        &self,
        project_id: &str,
        report_ids: &[String],
    ) -> Result<ExportStatusReport> {
        let request = ApiRequest::post("/exports/status")
            .query("project_id", project_id)
            .json(&json!({ "report_ids": report_ids }))?;
        self.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_report_is_pending() {
        let report: ExportStatusReport = serde_json::from_value(json!({
            "status": [{ "report_id": "other", "export_status": "created", "is_completed": true }]
        }))
        .unwrap();

        let status = status_of(report, "r-1");
        assert_eq!(status.report_id, "r-1");
        assert_eq!(status.progress(), Progress::Pending);
    }
}
