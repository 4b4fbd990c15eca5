//! Orchestration for the two-step generate-then-edit demo.

use crate::ai::{GeminiImageClient, ImageGenerationService};
use crate::models::{Config, GeneratedContent, ReferenceImage};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{error, info, warn};

/// Inputs for one full demo run.
#[derive(Debug, Clone)]
pub struct DemoArgs {
    pub prompt: String,
    pub edit_prompt: String,
    pub output: PathBuf,
    pub edit_output: PathBuf,
}

/// Result of one generate step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub description: Option<String>,
    pub image_written: bool,
}

/// Runs sequential generate steps against an [`ImageGenerationService`] and
/// persists the results. Holds no state between steps beyond the files it
/// writes; the edit step picks up the first step's output from disk.
pub struct App {
    image_gen: Box<dyn ImageGenerationService>,
}

impl App {
    /// Construct an app from environment configuration.
    pub fn new() -> Self {
        let config = Config::from_env();
        info!("Image provider: Gemini (model: {})", config.gemini_model);

        Self::with_service(Box::new(GeminiImageClient::new(
            config.gemini_api_key,
            config.gemini_model,
        )))
    }

    /// Build an app from a concrete service, for tests and harnesses.
    pub fn with_service(image_gen: Box<dyn ImageGenerationService>) -> Self {
        Self { image_gen }
    }

    /// Run the demo: generate an image, then edit it with a second prompt.
    ///
    /// The edit step is only attempted when the first step actually wrote
    /// an image, so it never reads a stale or missing reference.
    pub async fn run(&self, args: DemoArgs) -> Result<()> {
        let first = self.run_step(&args.prompt, None, &args.output).await?;
        if !first.image_written {
            return Err(Error::Generic(format!(
                "Aborting edit step: generation wrote no image to {}",
                args.output.display()
            )));
        }

        self.run_step(&args.edit_prompt, Some(&args.output), &args.edit_output)
            .await?;
        Ok(())
    }

    /// One demo step: submit a prompt (optionally with a reference image
    /// read from `reference_path`) and persist the resulting image.
    ///
    /// Remote failures are recovered here after retries are exhausted and
    /// yield an outcome with no description and no write. Local I/O and
    /// reference-validation failures propagate.
    pub async fn run_step(
        &self,
        prompt: &str,
        reference_path: Option<&Path>,
        output_path: &Path,
    ) -> Result<StepOutcome> {
        info!(
            "Generating image with prompt: \"{}\"{}",
            prompt,
            if reference_path.is_some() {
                " and reference image"
            } else {
                ""
            }
        );

        let reference = match reference_path {
            Some(path) => Some(ReferenceImage::from_file(path)?),
            None => None,
        };

        let content = match self.generate_with_retry(prompt, reference).await {
            Ok(content) => content,
            Err(e) => {
                error!("Image generation failed: {}", e);
                return Ok(StepOutcome {
                    description: None,
                    image_written: false,
                });
            }
        };

        let image_written = if let Some(image) = content.final_image() {
            if content.images.len() > 1 {
                warn!(
                    "Service returned {} image parts, persisting the last",
                    content.images.len()
                );
            }
            fs::write(output_path, &image.bytes)?;
            info!("Image saved as {}", output_path.display());
            log_image_details(&image.bytes);
            true
        } else {
            warn!("No image part in response, nothing written");
            false
        };

        let description = content.description().map(str::to_string);
        if let Some(text) = &description {
            info!("Description: {}", text);
        }

        Ok(StepOutcome {
            description,
            image_written,
        })
    }

    async fn generate_with_retry(
        &self,
        prompt: &str,
        reference: Option<ReferenceImage>,
    ) -> Result<GeneratedContent> {
        let retry_strategy = FixedInterval::from_millis(2000).take(2);

        Retry::spawn(retry_strategy, || {
            let reference = reference.clone();
            async move {
                match self.image_gen.generate(prompt, reference).await {
                    Ok(content) => Ok(content),
                    Err(e) => {
                        warn!("Generation attempt failed: {}. Retrying...", e);
                        Err(e)
                    }
                }
            }
        })
        .await
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn log_image_details(bytes: &[u8]) {
    match image::load_from_memory(bytes) {
        Ok(decoded) => {
            let format = image::guess_format(bytes)
                .map(|f| format!("{:?}", f))
                .unwrap_or_else(|_| "unknown".to_string());
            info!(
                "Generated image: {}x{} ({})",
                decoded.width(),
                decoded.height(),
                format
            );
        }
        Err(e) => warn!("Generated bytes do not decode as an image: {}", e),
    }
}
