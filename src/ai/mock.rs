use super::ImageGenerationService;
use crate::models::{GeneratedContent, GeneratedImage, ReferenceImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageClient {
    responses: Arc<Mutex<Vec<GeneratedContent>>>,
    fail_calls: Arc<Mutex<Vec<usize>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            fail_calls: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: GeneratedContent) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make the nth call (1-based) fail with a simulated provider error.
    pub fn with_failure_on_call(self, call: usize) -> Self {
        self.fail_calls.lock().unwrap().push(call);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// A tiny valid 1x1 PNG, usable as default mock output.
    pub fn tiny_png() -> Vec<u8> {
        vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
            0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
            0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
            0x44, 0x41, // IDAT chunk
            0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x9C,
            0xE3, 0xBF, 0x59, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
            0x44, 0xAE, 0x42, 0x60, 0x82,
        ]
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate(
        &self,
        prompt: &str,
        _reference: Option<ReferenceImage>,
    ) -> Result<GeneratedContent> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if self.fail_calls.lock().unwrap().contains(&*count) {
            return Err(Error::AiProvider("simulated provider failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GeneratedContent {
                texts: vec![format!("Mock rendering of: {}", prompt)],
                images: vec![GeneratedImage {
                    mime_type: "image/png".to_string(),
                    bytes: Self::tiny_png(),
                }],
            })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
