//! Process configuration, read once at startup.
//!
//! Values come from the environment (optionally seeded from a `.env` file) and fall back
//! to the defaults below. The Gemini key is mandatory and is rejected when it still holds
//! a template placeholder.

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::{
    client::{GenerativeModel, DEFAULT_BASE_URL},
    error::{Result, SoundscapeError},
    image::{ImageClient, DEFAULT_IMAGE_BASE_URL},
    models::{GenerationConfig, ModelParams, DEFAULT_MODEL},
    prompt::SoundscapeVariant,
};

/// Environment variables the service reads.
const ENV_KEYS: [&str; 8] = [
    "gemini_api_key",
    "gemini_model",
    "gemini_base_url",
    "gemini_temperature",
    "image_base_url",
    "soundscape_variant",
    "host",
    "port",
];

/// Gemini is asked to answer with a bare JSON document.
const JSON_MIME_TYPE: &str = "application/json";

/// Key values shipped in `.env` templates.
const PLACEHOLDER_API_KEYS: [&str; 4] = [
    "YOUR_API_KEY",
    "YOUR_GEMINI_API_KEY",
    "your-api-key-here",
    "your_api_key_here",
];

/// Service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Credential for the Gemini API.
    #[serde(default)]
    pub gemini_api_key: String,
    /// Gemini model identifier.
    #[serde(default = "default_model")]
    pub gemini_model: String,
    /// Gemini endpoint root.
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    /// Optional sampling temperature.
    #[serde(default)]
    pub gemini_temperature: Option<f32>,
    /// Image service endpoint root.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Which soundscape shape to produce.
    #[serde(default)]
    pub soundscape_variant: SoundscapeVariant,
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// The figment reading the service's environment variables.
    pub fn figment() -> Figment {
        Figment::new().merge(Env::raw().only(&ENV_KEYS))
    }

    /// Loads `.env` if present, then reads and validates the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type or the API key is unusable.
    pub fn load() -> Result<Self> {
        if dotenv::dotenv().is_err() {
            tracing::debug!("no .env file found, using process environment");
        }
        Self::from_figment(&Self::figment())
    }

    /// Extracts and validates settings from any figment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let key = self.gemini_api_key.trim();
        if key.is_empty() {
            return Err(SoundscapeError::MissingApiKey);
        }
        if PLACEHOLDER_API_KEYS
            .iter()
            .any(|placeholder| placeholder.eq_ignore_ascii_case(key))
        {
            return Err(SoundscapeError::PlaceholderApiKey(key.to_string()));
        }
        Ok(())
    }

    /// The `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the Gemini client described by these settings.
    pub fn text_model(&self) -> GenerativeModel {
        let generation_config = GenerationConfig {
            temperature: self.gemini_temperature,
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        };
        let params = ModelParams::builder()
            .model(self.gemini_model.clone())
            .generation_config(generation_config)
            .build();
        GenerativeModel::new(self.gemini_api_key.trim(), params)
            .with_base_url(&self.gemini_base_url)
    }

    /// Builds the image client described by these settings.
    pub fn image_client(&self) -> ImageClient {
        ImageClient::new(&self.image_base_url)
    }
}
