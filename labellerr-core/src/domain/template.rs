//! Annotation template domain types
//!
//! Only the parts of the template model the SDK inspects are typed; question
//! bodies returned by the platform are kept as raw JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Kind of question an annotator answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "BoundingBox")]
    BoundingBox,
    #[serde(rename = "polygon")]
    Polygon,
    #[serde(rename = "polyline")]
    Polyline,
    #[serde(rename = "dot")]
    Dot,
    #[serde(rename = "input")]
    Input,
    #[serde(rename = "radio")]
    Radio,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "stt")]
    Stt,
    #[serde(rename = "imc")]
    Imc,
    #[serde(rename = "audio")]
    Audio,
}

impl QuestionType {
    pub const ALL: [QuestionType; 12] = [
        QuestionType::BoundingBox,
        QuestionType::Polygon,
        QuestionType::Polyline,
        QuestionType::Dot,
        QuestionType::Input,
        QuestionType::Radio,
        QuestionType::Boolean,
        QuestionType::Select,
        QuestionType::Dropdown,
        QuestionType::Stt,
        QuestionType::Imc,
        QuestionType::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::BoundingBox => "BoundingBox",
            QuestionType::Polygon => "polygon",
            QuestionType::Polyline => "polyline",
            QuestionType::Dot => "dot",
            QuestionType::Input => "input",
            QuestionType::Radio => "radio",
            QuestionType::Boolean => "boolean",
            QuestionType::Select => "select",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Stt => "stt",
            QuestionType::Imc => "imc",
            QuestionType::Audio => "audio",
        }
    }

    /// Object questions draw geometry on the media and are identified by a color
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            QuestionType::BoundingBox
                | QuestionType::Polygon
                | QuestionType::Polyline
                | QuestionType::Dot
        )
    }

    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(QuestionType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|question_type| question_type.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    "option_type",
                    format!("option_type must be one of {}", Self::names()),
                )
            })
    }
}

/// One selectable option of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub option_name: String,
}

/// A question inside an annotation template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationQuestion {
    pub question_number: u32,
    pub question: String,
    pub question_id: String,
    #[serde(rename = "option_type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Annotation template record as returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationTemplate {
    pub template_id: String,
    #[serde(default, alias = "templateName")]
    pub template_name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub questions: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_wire_names() {
        let json = serde_json::to_string(&QuestionType::BoundingBox).unwrap();
        assert_eq!(json, "\"BoundingBox\"");
        assert_eq!("imc".parse::<QuestionType>().unwrap(), QuestionType::Imc);
        assert!("bbox".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_object_questions() {
        assert!(QuestionType::Dot.is_object());
        assert!(!QuestionType::Radio.is_object());
    }

    #[test]
    fn test_question_serializes_type_as_option_type() {
        let question = AnnotationQuestion {
            question_number: 1,
            question: "Is there a cat?".to_string(),
            question_id: "q1".to_string(),
            question_type: QuestionType::Boolean,
            required: true,
            options: vec![],
            color: None,
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["option_type"], "boolean");
        assert!(value.get("color").is_none());
    }
}
