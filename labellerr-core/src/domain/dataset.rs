//! Dataset domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Progress;

/// Dataset is still ingesting files
pub const STATUS_PROCESSING: u16 = 100;

/// Dataset finished ingesting and can be attached to a project
pub const STATUS_READY: u16 = 300;

/// Status codes at or above this value mean ingestion failed
pub const STATUS_ERROR_THRESHOLD: u16 = 400;

/// Dataset record as returned by the platform
///
/// `data_type` is kept as the raw string the platform sent; the typed view is
/// obtained through [`crate::registry::dataset_kind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub dataset_id: String,
    #[serde(default, alias = "dataset_name")]
    pub name: String,
    #[serde(default, alias = "dataset_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub files_count: Option<u64>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Ingestion status derived from the status code
    pub fn status(&self) -> DatasetStatus {
        DatasetStatus::from_code(self.status_code)
    }
}

/// Ingestion status of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetStatus {
    Processing,
    Ready,
    Failed(u16),
}

impl DatasetStatus {
    /// Classify a raw status code
    ///
    /// A missing code is treated as still processing.
    pub fn from_code(code: Option<u16>) -> Self {
        match code {
            Some(STATUS_READY) => DatasetStatus::Ready,
            Some(code) if code >= STATUS_ERROR_THRESHOLD => DatasetStatus::Failed(code),
            _ => DatasetStatus::Processing,
        }
    }

    pub fn progress(&self) -> Progress {
        match self {
            DatasetStatus::Ready => Progress::Done,
            DatasetStatus::Processing => Progress::Pending,
            DatasetStatus::Failed(code) => {
                Progress::Failed(format!("dataset processing failed with status {}", code))
            }
        }
    }
}

impl std::fmt::Display for DatasetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetStatus::Processing => write!(f, "Processing"),
            DatasetStatus::Ready => write!(f, "Ready"),
            DatasetStatus::Failed(code) => write!(f, "Failed ({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_trichotomy() {
        assert_eq!(DatasetStatus::from_code(Some(100)), DatasetStatus::Processing);
        assert_eq!(DatasetStatus::from_code(Some(300)), DatasetStatus::Ready);
        assert_eq!(DatasetStatus::from_code(Some(404)), DatasetStatus::Failed(404));
        assert_eq!(DatasetStatus::from_code(Some(500)), DatasetStatus::Failed(500));
        assert_eq!(DatasetStatus::from_code(Some(200)), DatasetStatus::Processing);
        assert_eq!(DatasetStatus::from_code(None), DatasetStatus::Processing);
    }

    #[test]
    fn test_progress_mapping() {
        assert_eq!(DatasetStatus::Ready.progress(), Progress::Done);
        assert_eq!(DatasetStatus::Processing.progress(), Progress::Pending);
        assert!(matches!(
            DatasetStatus::Failed(400).progress(),
            Progress::Failed(reason) if reason.contains("400")
        ));
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let dataset: Dataset = serde_json::from_value(serde_json::json!({
            "dataset_id": "dataset-image-1a2b3c4d",
            "dataset_name": "cats",
            "data_type": "image",
            "status_code": 300,
            "unknown_field": true
        }))
        .unwrap();

        assert_eq!(dataset.name, "cats");
        assert_eq!(dataset.status(), DatasetStatus::Ready);
        assert!(dataset.created_at.is_none());
    }
}
