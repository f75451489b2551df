//! Pre-annotation import jobs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::status::Progress;
use crate::validation::ValidationError;

/// File format of an uploaded pre-annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationFormat {
    Json,
    CocoJson,
    Csv,
    Png,
}

impl AnnotationFormat {
    pub const ALL: [AnnotationFormat; 4] = [
        AnnotationFormat::Json,
        AnnotationFormat::CocoJson,
        AnnotationFormat::Csv,
        AnnotationFormat::Png,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationFormat::Json => "json",
            AnnotationFormat::CocoJson => "coco_json",
            AnnotationFormat::Csv => "csv",
            AnnotationFormat::Png => "png",
        }
    }
}

impl fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                let names = Self::ALL
                    .iter()
                    .map(AnnotationFormat::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                ValidationError::new(
                    "annotation_format",
                    format!("Invalid annotation_format. Must be one of {}", names),
                )
            })
    }
}

/// A pre-annotation import running on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreannotationJob {
    pub job_id: String,
    pub project_id: String,
}

/// Status payload of a pre-annotation import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreannotationStatus {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PreannotationStatus {
    pub fn progress(&self) -> Progress {
        match self.status.to_lowercase().as_str() {
            "completed" => Progress::Done,
            "failed" => Progress::Failed(format!("pre-annotation job failed: {:?}", self.extra)),
            _ => Progress::Pending,
        }
    }
}
