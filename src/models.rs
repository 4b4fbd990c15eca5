//! Data models and configuration
//!
//! Defines the caller-facing shapes for generation requests and results,
//! plus environment-based configuration.

use std::path::Path;

use crate::ai::mime;
use crate::Result;

/// A local image attached to a generation request for editing.
///
/// The MIME type is derived from the file contents and validated against
/// the extension before the request is built, never assumed.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl ReferenceImage {
    /// Read a reference image from disk and determine its MIME type.
    ///
    /// Fails if the file is unreadable, if the format cannot be identified,
    /// or if the extension contradicts the actual content.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let mime_type = mime::reference_mime(path, &data)?;
        Ok(Self { mime_type, data })
    }
}

/// One decoded image returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Demultiplexed output of a single generate-content call.
///
/// Parts are kept in the order the service returned them; nothing is
/// dropped. Callers pick their own selection policy via the accessors.
#[derive(Debug, Clone, Default)]
pub struct GeneratedContent {
    pub texts: Vec<String>,
    pub images: Vec<GeneratedImage>,
}

impl GeneratedContent {
    /// The last text part, if any. The demo treats this as the description.
    pub fn description(&self) -> Option<&str> {
        self.texts.last().map(String::as_str)
    }

    /// The last image part, if any. The demo persists this one.
    pub fn final_image(&self) -> Option<&GeneratedImage> {
        self.images.last()
    }
}

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
}

impl Config {
    /// Load configuration from the environment (and `.env` when present).
    ///
    /// A missing `GEMINI_API_KEY` falls back to a placeholder so the demo
    /// still runs; the remote call will then fail authentication.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("GEMINI_API_KEY not set, using placeholder (requests will fail auth)");
            PLACEHOLDER_API_KEY.to_string()
        });

        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            gemini_api_key,
            gemini_model,
        }
    }
}
