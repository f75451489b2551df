//! Annotation template DTOs

use serde::{Deserialize, Serialize};

use crate::domain::data_type::DataType;
use crate::domain::template::{AnnotationQuestion, QuestionOption, QuestionType};
use crate::validation::{ValidationError, require_non_blank};

/// Parameters for creating an annotation template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateParams {
    pub template_name: String,
    pub data_type: DataType,
    pub questions: Vec<AnnotationQuestion>,
}

/// Body of the template creation request
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePayload {
    #[serde(rename = "templateName")]
    pub template_name: String,
    pub questions: Vec<AnnotationQuestion>,
}

impl CreateTemplateParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("template_name", &self.template_name)?;

        if self.questions.is_empty() {
            return Err(ValidationError::new(
                "questions",
                "At least one question is required",
            ));
        }

        for question in &self.questions {
            if question.question_type.is_object() {
                if question.color.as_deref().is_none_or(|c| c.trim().is_empty()) {
                    return Err(ValidationError::new(
                        "color",
                        "Color is required for bounding box, polygon, polyline, and dot questions",
                    ));
                }
            } else if question.question_type != QuestionType::Input && question.options.is_empty()
            {
                return Err(ValidationError::new(
                    "options",
                    "Options are required for radio, boolean, select, dropdown, stt, imc questions",
                ));
            }
        }

        Ok(())
    }

    /// Validate and build the wire payload
    ///
    /// Object questions carry their color as their single option.
    pub fn into_payload(self) -> Result<TemplatePayload, ValidationError> {
        self.validate()?;

        let questions = self
            .questions
            .into_iter()
            .map(|mut question| {
                if question.question_type.is_object() {
                    if let Some(color) = &question.color {
                        question.options = vec![QuestionOption {
                            option_name: color.clone(),
                        }];
                    }
                }
                question
            })
            .collect();

        Ok(TemplatePayload {
            template_name: self.template_name,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(question_type: QuestionType) -> AnnotationQuestion {
        AnnotationQuestion {
            question_number: 1,
            question: "label".to_string(),
            question_id: "q1".to_string(),
            question_type,
            required: true,
            options: vec![],
            color: None,
        }
    }

    fn params(questions: Vec<AnnotationQuestion>) -> CreateTemplateParams {
        CreateTemplateParams {
            template_name: "animals".to_string(),
            data_type: DataType::Image,
            questions,
        }
    }

    #[test]
    fn test_object_question_requires_color() {
        let err = params(vec![question(QuestionType::BoundingBox)])
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "color");
    }

    #[test]
    fn test_choice_question_requires_options() {
        let err = params(vec![question(QuestionType::Radio)]).validate().unwrap_err();
        assert_eq!(err.field, "options");
        assert!(params(vec![question(QuestionType::Input)]).validate().is_ok());
    }

    #[test]
    fn test_color_becomes_single_option() {
        let mut bbox = question(QuestionType::Polygon);
        bbox.color = Some("#ff0000".to_string());

        let payload = params(vec![bbox]).into_payload().unwrap();
        assert_eq!(payload.questions[0].options[0].option_name, "#ff0000");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["templateName"], "animals");
    }

    #[test]
    fn test_empty_questions_rejected() {
        assert_eq!(params(vec![]).validate().unwrap_err().field, "questions");
    }
}
