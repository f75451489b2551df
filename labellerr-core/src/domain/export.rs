//! Export domain types

use serde::{Deserialize, Serialize};

use super::status::Progress;

/// Where the generated export is delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDestination {
    #[default]
    Local,
    S3,
}

/// Status of a single export report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStatus {
    pub report_id: String,
    #[serde(default)]
    pub export_status: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExportStatus {
    /// Placeholder for a report the platform has not listed yet
    pub fn pending(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            export_status: String::new(),
            is_completed: false,
            extra: serde_json::Map::new(),
        }
    }

    /// An export is done once it is completed and its status reads "created";
    /// a "failed" status is terminal regardless of the completion flag.
    pub fn progress(&self) -> Progress {
        let status = self.export_status.to_lowercase();
        if status == "failed" {
            Progress::Failed(format!("export {} failed", self.report_id))
        } else if self.is_completed && status == "created" {
            Progress::Done
        } else {
            Progress::Pending
        }
    }
}

/// Response of the export status endpoint, covering one or more reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportStatusReport {
    #[serde(default)]
    pub status: Vec<ExportStatus>,
}

impl ExportStatusReport {
    pub fn find(&self, report_id: &str) -> Option<&ExportStatus> {
        self.status.iter().find(|item| item.report_id == report_id)
    }

    /// Progress of one report; a report missing from the response is still pending
    pub fn progress_of(&self, report_id: &str) -> Progress {
        self.find(report_id)
            .map(ExportStatus::progress)
            .unwrap_or(Progress::Pending)
    }
}
