//! Dataset DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::data_type::DataType;
use crate::validation::{ValidationError, require_non_blank};

/// Maximum number of files a single dataset may hold
pub const MAX_FILES_PER_DATASET: usize = 2500;

/// Maximum total size of the files of a single dataset (2.5 GiB)
pub const MAX_BYTES_PER_DATASET: u64 = 2_684_354_560;

/// Where the dataset's files come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    #[default]
    Local,
    Aws,
    Gcp,
}

/// Configuration for creating a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub dataset_name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub dataset_description: String,
    #[serde(default)]
    pub connector_type: ConnectorType,
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("dataset_name", &self.dataset_name)
    }
}

/// Local files to upload into a new dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// An explicit list of files
    Files(Vec<PathBuf>),
    /// Every matching file directly inside a folder
    Folder(PathBuf),
}

/// Body of the dataset creation request
#[derive(Debug, Clone, Serialize)]
pub struct CreateDatasetRequest {
    pub dataset_id: String,
    pub dataset_name: String,
    pub dataset_description: String,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub permission_level: &'static str,
    #[serde(rename = "type")]
    pub scope: &'static str,
    pub labelled: &'static str,
    pub data_copy: &'static str,
    #[serde(rename = "isGoldDataset")]
    pub is_gold_dataset: bool,
    pub files_count: u64,
    pub access: &'static str,
    pub created_at: DateTime<Utc>,
}

impl CreateDatasetRequest {
    /// Build the request for a validated config, generating a fresh dataset id
    pub fn new(config: &DatasetConfig, created_by: Option<String>) -> Self {
        Self {
            dataset_id: generate_dataset_id(config.data_type),
            dataset_name: config.dataset_name.clone(),
            dataset_description: config.dataset_description.clone(),
            data_type: config.data_type,
            created_by,
            permission_level: "project",
            scope: "client",
            labelled: "unlabelled",
            data_copy: "false",
            is_gold_dataset: false,
            files_count: 0,
            access: "write",
            created_at: Utc::now(),
        }
    }
}

/// Dataset ids have the form `dataset-<data type>-<8 hex chars>`
pub fn generate_dataset_id(data_type: DataType) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("dataset-{}-{}", data_type, &suffix[..8])
}
