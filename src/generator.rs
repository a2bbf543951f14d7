//! The soundscape pipeline: image fetch, text generation, cleaning and assembly.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    client::GenerativeModel,
    error::{Result, SoundscapeError},
    image::ImageClient,
    models::SoundscapeResponse,
    prompt::SoundscapeVariant,
};

/// A service that turns an instruction into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `instruction` and returns the model's raw text.
    async fn generate_text(&self, instruction: &str) -> Result<String>;
}

/// A service that renders an image for a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the raw bytes of an image for `prompt`.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}

#[async_trait]
impl TextGenerator for GenerativeModel {
    async fn generate_text(&self, instruction: &str) -> Result<String> {
        let response = self.send_message(instruction).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(SoundscapeError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        self.fetch(prompt).await
    }
}

/// Runs one soundscape request against injected generators.
#[derive(Clone)]
pub struct SoundscapeGenerator {
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
    variant: SoundscapeVariant,
}

impl SoundscapeGenerator {
    /// Creates a generator producing `variant` soundscapes.
    pub fn new(
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
        variant: SoundscapeVariant,
    ) -> Self {
        Self {
            text,
            image,
            variant,
        }
    }

    /// Generates a soundscape for an already validated prompt.
    ///
    /// The image is fetched first; a failed fetch returns before the text service is called.
    ///
    /// # Errors
    ///
    /// Propagates upstream failures and returns [`SoundscapeError::MalformedOutput`] when
    /// the model text does not match the variant's schema.
    pub async fn generate(&self, prompt: &str) -> Result<SoundscapeResponse> {
        let image_base64 = if self.variant.includes_image() {
            let bytes = self.image.generate_image(prompt).await?;
            tracing::info!(bytes = bytes.len(), "fetched and encoded background image");
            Some(STANDARD.encode(bytes))
        } else {
            None
        };

        tracing::info!(variant = %self.variant, "generating soundscape with the text model");
        let raw = self
            .text
            .generate_text(&self.variant.instruction(prompt))
            .await?;
        tracing::debug!(%raw, "raw model output");

        let envelope = self.variant.parse_output(&raw)?;
        for issue in envelope.audit() {
            tracing::warn!(%issue, "model output departs from the instruction");
        }
        tracing::info!(sounds = ?envelope.sounds(), "parsed model output");

        Ok(SoundscapeResponse {
            image_base64,
            envelope,
        })
    }
}
