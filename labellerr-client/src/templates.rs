//! Annotation template API endpoints

use labellerr_core::domain::template::AnnotationTemplate;
use labellerr_core::dto::template::CreateTemplateParams;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::LabellerrClient;
use crate::error::{ClientError, Result};
use crate::transport::ApiRequest;

#[derive(Deserialize)]
struct TemplateCreated {
    template_id: String,
}

impl LabellerrClient {
    // =============================================================================
    // Annotation Templates
    // =============================================================================

    /// Create an annotation template
    ///
    /// # Arguments
    /// * `params` - Template name, data type, and questions
    ///
    /// # Returns
    /// The id of the new template
    pub async fn create_template(&self, params: CreateTemplateParams) -> Result<String> {
        let data_type = params.data_type;
        let payload = params.into_payload()?;

        let request = ApiRequest::post("/annotations/create_template")
            .query("data_type", data_type)
            .json(&payload)?;
        let created: TemplateCreated = self.call_response(request).await?;

        info!(
            "Created annotation template {} ({})",
            created.template_id, payload.template_name
        );
        Ok(created.template_id)
    }

    /// Get an annotation template by ID
    ///
    /// # Arguments
    /// * `template_id` - The template ID
    ///
    /// # Returns
    /// The template, or [`ClientError::NotFound`] when the platform has none
    pub async fn get_template(&self, template_id: &str) -> Result<AnnotationTemplate> {
        let request =
            ApiRequest::get("/annotations/get_template").query("template_id", template_id);
        let mut body = self.send(request).await?;

        match body.get_mut("response").map(Value::take) {
            Some(Value::Null) | None => Err(ClientError::NotFound(format!(
                "annotation template {}",
                template_id
            ))),
            Some(template) => serde_json::from_value(template).map_err(|e| {
                ClientError::ParseError(format!("Unexpected template shape: {}", e))
            }),
        }
    }
}
