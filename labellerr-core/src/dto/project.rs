//! Project DTOs
//!
//! [`ProjectPayload`] is the loosely-typed input of the "create dataset, wait,
//! create project" workflow, usually loaded from JSON. Validating it yields a
//! [`ProjectPlan`] in which every field the workflow needs is typed and
//! present.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::dataset::{ConnectorType, DatasetConfig, DatasetSource};
use super::template::CreateTemplateParams;
use crate::domain::data_type::DataType;
use crate::domain::project::RotationConfig;
use crate::domain::template::{AnnotationQuestion, QuestionType};
use crate::validation::{ValidationError, is_email, require_non_blank};

/// Input of the project creation workflow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPayload {
    pub client_id: String,
    pub dataset_name: String,
    pub dataset_description: String,
    pub data_type: String,
    pub created_by: String,
    pub project_name: String,
    pub autolabel: bool,
    pub annotation_guide: Vec<serde_json::Value>,
    pub annotation_template_id: Option<String>,
    pub files_to_upload: Option<Vec<PathBuf>>,
    pub folder_to_upload: Option<PathBuf>,
    pub rotation_config: Option<RotationConfig>,
    pub use_ai: bool,
}

/// How the workflow obtains the project's annotation template
#[derive(Debug, Clone)]
pub enum TemplateChoice {
    /// Reuse a template that already exists on the platform
    Existing(String),
    /// Create a new template from the annotation guide
    Create(CreateTemplateParams),
}

/// A validated [`ProjectPayload`]
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub client_id: String,
    pub dataset: DatasetConfig,
    pub source: DatasetSource,
    pub created_by: String,
    pub project_name: String,
    pub template: TemplateChoice,
    pub rotations: RotationConfig,
    pub use_ai: bool,
    pub autolabel: bool,
}

impl ProjectPayload {
    /// Run every pre-flight check and build the plan
    ///
    /// Checks run in this order: required fields, `created_by` e-mail shape,
    /// template source, annotation guide entries, upload source, rotation
    /// config, data type.
    pub fn validate(&self) -> Result<ProjectPlan, ValidationError> {
        for (field, value) in [
            ("client_id", &self.client_id),
            ("dataset_name", &self.dataset_name),
            ("data_type", &self.data_type),
            ("created_by", &self.created_by),
            ("project_name", &self.project_name),
        ] {
            require_non_blank(field, value)?;
        }

        if !is_email(&self.created_by) {
            return Err(ValidationError::new(
                "created_by",
                "Please enter email id in created_by",
            ));
        }

        let template_id = self
            .annotation_template_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if self.annotation_guide.is_empty() && template_id.is_none() {
            return Err(ValidationError::new(
                "annotation_guide",
                "Please provide either annotation guide or annotation template id",
            ));
        }

        let questions = self.parse_guide()?;
        let source = self.source()?;

        let rotations = self.rotation_config.unwrap_or_default();
        rotations.validate()?;

        let data_type: DataType = self.data_type.parse()?;

        let template = match template_id {
            Some(id) => TemplateChoice::Existing(id.to_string()),
            None => TemplateChoice::Create(CreateTemplateParams {
                template_name: self.project_name.clone(),
                data_type,
                questions,
            }),
        };

        Ok(ProjectPlan {
            client_id: self.client_id.clone(),
            dataset: DatasetConfig {
                dataset_name: self.dataset_name.clone(),
                data_type,
                dataset_description: self.dataset_description.clone(),
                connector_type: ConnectorType::Local,
            },
            source,
            created_by: self.created_by.clone(),
            project_name: self.project_name.clone(),
            template,
            rotations,
            use_ai: self.use_ai,
            autolabel: self.autolabel,
        })
    }

    fn parse_guide(&self) -> Result<Vec<AnnotationQuestion>, ValidationError> {
        self.annotation_guide
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let option_type = entry
                    .get("option_type")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        ValidationError::new(
                            "annotation_guide",
                            "option_type is required in annotation_guide",
                        )
                    })?;
                option_type.parse::<QuestionType>()?;

                serde_json::from_value(entry.clone()).map_err(|e| {
                    ValidationError::new(
                        "annotation_guide",
                        format!("annotation_guide entry {} is malformed: {}", index, e),
                    )
                })
            })
            .collect()
    }

    fn source(&self) -> Result<DatasetSource, ValidationError> {
        let files = self.files_to_upload.as_ref().filter(|files| !files.is_empty());

        match (files, &self.folder_to_upload) {
            (Some(_), Some(_)) => Err(ValidationError::new(
                "files_to_upload",
                "Cannot provide both files_to_upload and folder_to_upload",
            )),
            (None, None) => Err(ValidationError::new(
                "files_to_upload",
                "Either files_to_upload or folder_to_upload must be provided",
            )),
            (Some(files), None) => Ok(DatasetSource::Files(files.clone())),
            (None, Some(folder)) => Ok(DatasetSource::Folder(folder.clone())),
        }
    }
}

/// Parameters for creating a project around existing datasets and a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectParams {
    pub project_name: String,
    pub data_type: DataType,
    pub attached_datasets: Vec<String>,
    pub annotation_template_id: String,
    pub rotations: RotationConfig,
    #[serde(default)]
    pub use_ai: bool,
    /// Let the platform pre-label items with its models
    #[serde(default, rename = "auto_label")]
    pub autolabel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl CreateProjectParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("project_name", &self.project_name)?;
        require_non_blank("annotation_template_id", &self.annotation_template_id)?;

        if self.attached_datasets.is_empty() {
            return Err(ValidationError::new(
                "attached_datasets",
                "At least one dataset must be attached",
            ));
        }

        if let Some(created_by) = &self.created_by {
            if !is_email(created_by) {
                return Err(ValidationError::new(
                    "created_by",
                    "Please enter email id in created_by",
                ));
            }
        }

        self.rotations.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> ProjectPayload {
        serde_json::from_value(json!({
            "client_id": "12345",
            "dataset_name": "cats",
            "dataset_description": "pictures of cats",
            "data_type": "image",
            "created_by": "owner@example.com",
            "project_name": "cat detection",
            "annotation_guide": [{
                "question_number": 1,
                "question": "Where is the cat?",
                "question_id": "q-1",
                "option_type": "BoundingBox",
                "required": true,
                "color": "#00ff00"
            }],
            "files_to_upload": ["/data/cat1.jpg", "/data/cat2.png"]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_payload_builds_plan() {
        let plan = payload().validate().unwrap();
        assert_eq!(plan.dataset.data_type, DataType::Image);
        assert_eq!(plan.rotations, RotationConfig::default());
        assert!(matches!(plan.source, DatasetSource::Files(ref files) if files.len() == 2));
        match plan.template {
            TemplateChoice::Create(params) => {
                assert_eq!(params.template_name, "cat detection");
                assert_eq!(params.questions[0].question_type, QuestionType::BoundingBox);
            }
            TemplateChoice::Existing(_) => panic!("expected a new template"),
        }
    }

    #[test]
    fn test_missing_client_id() {
        let mut payload = payload();
        payload.client_id = String::new();
        let err = payload.validate().unwrap_err();
        assert_eq!(err.field, "client_id");
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_missing_field_from_json() {
        let payload: ProjectPayload = serde_json::from_value(json!({
            "dataset_name": "cats",
        }))
        .unwrap();
        assert_eq!(payload.validate().unwrap_err().field, "client_id");
    }

    #[test]
    fn test_created_by_must_be_email() {
        let mut payload = payload();
        payload.created_by = "owner".to_string();
        assert_eq!(
            payload.validate().unwrap_err().message,
            "Please enter email id in created_by"
        );
    }

    #[test]
    fn test_template_source_required() {
        let mut payload = payload();
        payload.annotation_guide.clear();
        assert_eq!(payload.validate().unwrap_err().field, "annotation_guide");

        payload.annotation_template_id = Some("tmpl-1".to_string());
        let plan = payload.validate().unwrap();
        assert!(matches!(plan.template, TemplateChoice::Existing(ref id) if id == "tmpl-1"));
    }

    #[test]
    fn test_guide_option_type_checked() {
        let mut payload = payload();
        payload.annotation_guide = vec![json!({ "question": "no type" })];
        assert!(payload.validate().unwrap_err().message.contains("option_type is required"));

        payload.annotation_guide = vec![json!({ "option_type": "lasso" })];
        assert!(payload.validate().unwrap_err().message.contains("must be one of"));
    }

    #[test]
    fn test_upload_sources_are_exclusive() {
        let mut payload = payload();
        payload.folder_to_upload = Some(PathBuf::from("/data"));
        assert!(payload.validate().unwrap_err().message.contains("Cannot provide both"));

        payload.files_to_upload = Some(vec![]);
        let plan = payload.validate().unwrap();
        assert_eq!(plan.source, DatasetSource::Folder(PathBuf::from("/data")));

        payload.folder_to_upload = None;
        assert!(payload.validate().unwrap_err().message.contains("Either files_to_upload"));
    }

    #[test]
    fn test_rotation_and_data_type_checked() {
        let mut payload = payload();
        payload.rotation_config = Some(RotationConfig {
            annotation_rotation_count: 1,
            review_rotation_count: 3,
            client_review_rotation_count: 0,
        });
        assert_eq!(payload.validate().unwrap_err().field, "review_rotation_count");

        payload.rotation_config = None;
        payload.data_type = "hologram".to_string();
        assert_eq!(payload.validate().unwrap_err().field, "data_type");
    }

    #[test]
    fn test_create_project_params() {
        let params = CreateProjectParams {
            project_name: "cats".to_string(),
            data_type: DataType::Image,
            attached_datasets: vec!["dataset-image-1".to_string()],
            annotation_template_id: "tmpl-1".to_string(),
            rotations: RotationConfig::default(),
            use_ai: false,
            autolabel: true,
            created_by: Some("not-an-email".to_string()),
        };
        assert_eq!(params.validate().unwrap_err().field, "created_by");

        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["auto_label"], true);
    }
}
