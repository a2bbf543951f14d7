//! Client implementation for the Gemini API.

use crate::{
    error::{Result, SoundscapeError},
    models::{ModelParams, Request, RequestType, Response},
};

/// Default API endpoint for Google's Generative AI service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
const DEFAULT_API_VERSION: &str = "v1beta";
/// Header carrying the API key. The key is never put in the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A client for interacting with the Gemini API.
#[derive(Debug, Clone)]
pub struct GenerativeModel {
    api_key: String,
    params: ModelParams,
    base_url: String,
    client: reqwest::Client,
}

impl GenerativeModel {
    /// Creates a new GenerativeModel with the specified API key and model.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The API key for authentication
    /// * `params` - The model parameters
    pub fn new(api_key: impl Into<String>, params: impl Into<ModelParams>) -> Self {
        Self {
            api_key: api_key.into(),
            params: params.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Points the client at another endpoint root, e.g. a proxy or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.params.model
    }

    fn build_url(&self, request_type: RequestType) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url, DEFAULT_API_VERSION, self.params.model, request_type
        )
    }

    /// Generates a response for a full request.
    ///
    /// The model's default generation config is applied when the request has none.
    ///
    /// # Errors
    ///
    /// Returns [`SoundscapeError::Api`] on a non-success status, or a transport/JSON error
    /// if the call fails or the body cannot be parsed.
    pub async fn generate_response(&self, request: impl Into<Request>) -> Result<Response> {
        let mut request = request.into();
        request.generation_config = request
            .generation_config
            .or_else(|| self.params.generation_config.clone());

        let url = self.build_url(RequestType::GenerateContent);
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SoundscapeError::Api { status, body });
        }

        Ok(response.json().await?)
    }

    /// Sends a single text prompt and returns the raw response.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The text prompt to generate content from
    ///
    /// # Errors
    ///
    /// Same as [`GenerativeModel::generate_response`].
    pub async fn send_message(&self, prompt: impl Into<String>) -> Result<Response> {
        self.generate_response(Request::with_prompt(prompt)).await
    }
}
