use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::models::{GeneratedContent, GeneratedImage, ReferenceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

/// Adapter for Gemini's native image output.
///
/// Builds one multimodal request per call and splits the mixed text/image
/// response parts into a [`GeneratedContent`]. Holds no state across calls.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<ReferenceImage>,
    ) -> Result<GeneratedContent> {
        use base64::Engine as _;

        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        if let Some(reference) = reference {
            tracing::debug!(
                "Attaching reference image ({} bytes, {})",
                reference.data.len(),
                reference.mime_type
            );
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: reference.mime_type.to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(&reference.data),
                },
            });
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                // Both modalities are always requested; which ones come back
                // is up to the service.
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| Error::AiProvider("No candidates in Gemini response".to_string()))?;

        let mut content = GeneratedContent::default();
        for part in &candidate.content.parts {
            match part {
                Part::Text { text } => content.texts.push(text.clone()),
                Part::InlineData { inline_data } => {
                    let bytes = base64::engine::general_purpose::STANDARD
                        .decode(&inline_data.data)
                        .map_err(|e| {
                            Error::AiProvider(format!(
                                "Failed to decode Gemini base64 image: {}",
                                e
                            ))
                        })?;
                    content.images.push(GeneratedImage {
                        mime_type: inline_data.mime_type.clone(),
                        bytes,
                    });
                }
            }
        }

        tracing::debug!(
            "Gemini returned {} text part(s) and {} image part(s)",
            content.texts.len(),
            content.images.len()
        );

        Ok(content)
    }
}
