//! Export DTOs

use serde::{Deserialize, Serialize};

use crate::domain::export::ExportDestination;
use crate::validation::{ValidationError, require_non_blank};

/// Parameters for creating an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub export_name: String,
    pub export_description: String,
    pub export_format: String,
    pub statuses: Vec<String>,
    #[serde(default)]
    pub export_destination: ExportDestination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_folder_path: Option<String>,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("export_name", &self.export_name)?;
        require_non_blank("export_description", &self.export_description)?;
        require_non_blank("export_format", &self.export_format)?;

        if self.statuses.is_empty() {
            return Err(ValidationError::new(
                "statuses",
                "At least one status is required",
            ));
        }

        if self.export_destination == ExportDestination::S3
            && self.connection_id.as_deref().is_none_or(|id| id.trim().is_empty())
        {
            return Err(ValidationError::new(
                "connection_id",
                "connection_id is required for s3 exports",
            ));
        }

        Ok(())
    }
}

/// Body of the export creation request
#[derive(Debug, Clone, Serialize)]
pub struct CreateExportRequest<'a> {
    #[serde(flatten)]
    pub config: &'a ExportConfig,
    pub question_ids: [&'static str; 1],
}

impl<'a> CreateExportRequest<'a> {
    /// Export every question of the project
    pub fn all_questions(config: &'a ExportConfig) -> Self {
        Self {
            config,
            question_ids: ["all"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExportConfig {
        ExportConfig {
            export_name: "weekly".to_string(),
            export_description: "weekly export".to_string(),
            export_format: "coco_json".to_string(),
            statuses: vec!["accepted".to_string()],
            export_destination: ExportDestination::Local,
            connection_id: None,
            export_folder_path: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_statuses_required() {
        let mut config = config();
        config.statuses.clear();
        assert_eq!(config.validate().unwrap_err().field, "statuses");
    }

    #[test]
    fn test_s3_requires_connection() {
        let mut config = config();
        config.export_destination = ExportDestination::S3;
        assert_eq!(config.validate().unwrap_err().field, "connection_id");

        config.connection_id = Some("conn-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_request_exports_all_questions() {
        let config = config();
        let value = serde_json::to_value(CreateExportRequest::all_questions(&config)).unwrap();
        assert_eq!(value["question_ids"][0], "all");
        assert_eq!(value["export_destination"], "local");
        assert_eq!(value["export_name"], "weekly");
    }
}
