//! AI service integration for native image generation
//!
//! Defines the service trait implemented by the Gemini client and the mock
//! used in tests.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageClient;

use crate::models::{GeneratedContent, ReferenceImage};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Submit one generate-content call and demultiplex its parts.
    ///
    /// When `reference` is given the request asks the service to edit that
    /// image according to the prompt.
    async fn generate(
        &self,
        prompt: &str,
        reference: Option<ReferenceImage>,
    ) -> Result<GeneratedContent>;
}
