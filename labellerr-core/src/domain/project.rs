//! Project domain types

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Project record as returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub attached_datasets: Vec<String>,
    #[serde(default)]
    pub annotation_template_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// How many annotation and review passes each file goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub annotation_rotation_count: u32,
    pub review_rotation_count: u32,
    pub client_review_rotation_count: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            annotation_rotation_count: 1,
            review_rotation_count: 1,
            client_review_rotation_count: 1,
        }
    }
}

impl RotationConfig {
    /// Check the relationships the platform enforces between rotation counts
    pub fn validate(&self) -> Result<(), ValidationError> {
        let client_review = self.client_review_rotation_count;

        if self.review_rotation_count != 1 {
            return Err(ValidationError::new(
                "review_rotation_count",
                "review_rotation_count must be 1",
            ));
        }

        match self.annotation_rotation_count {
            0 if client_review != 0 => Err(ValidationError::new(
                "client_review_rotation_count",
                "client_review_rotation_count must be 0 when annotation_rotation_count is 0",
            )),
            1 if client_review > 1 => Err(ValidationError::new(
                "client_review_rotation_count",
                "client_review_rotation_count can only be 0 or 1 when annotation_rotation_count is 1",
            )),
            n if n > 1 && client_review != 0 => Err(ValidationError::new(
                "client_review_rotation_count",
                "client_review_rotation_count must be 0 when annotation_rotation_count is greater than 1",
            )),
            _ => Ok(()),
        }
    }
}
