//! Pollinations image client.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Result, SoundscapeError};
use crate::prompt::IMAGE_STYLE;

/// Default Pollinations endpoint root.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://pollinations.ai";

/// Characters `encodeURIComponent` leaves untouched besides ASCII alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fetches stylized background images for a prompt.
#[derive(Debug, Clone)]
pub struct ImageClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for ImageClient {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageClient {
    /// Creates a client for the given endpoint root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Builds the image URL for `prompt` with the fixed style suffix.
    ///
    /// Spaces become underscores before percent-encoding.
    pub fn image_url(&self, prompt: &str) -> String {
        format!(
            "{}/p/{}/?nologo=true",
            self.base_url,
            encode_image_prompt(prompt)
        )
    }

    /// Downloads the image for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`SoundscapeError::ImageStatus`] on a non-success status and
    /// [`SoundscapeError::Request`] on transport failure.
    pub async fn fetch(&self, prompt: &str) -> Result<Vec<u8>> {
        let url = self.image_url(prompt);
        tracing::info!(%url, "fetching background image");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SoundscapeError::ImageStatus { status });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Encodes `"<prompt>, <style>"` as a single URL path segment.
pub fn encode_image_prompt(prompt: &str) -> String {
    let full_prompt = format!("{prompt}, {IMAGE_STYLE}").replace(' ', "_");
    utf8_percent_encode(&full_prompt, URI_COMPONENT).to_string()
}
