//! Error types for the soundscape service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Message returned to callers whose prompt is missing or blank.
pub const INVALID_PROMPT_MESSAGE: &str = "A valid prompt is required.";

/// Message returned when the model output could not be parsed into a soundscape.
pub const MALFORMED_OUTPUT_MESSAGE: &str =
    "The AI returned an invalid response. Please try a different prompt.";

/// Message returned for every other failure.
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while generating the soundscape.";

/// Errors that can occur while generating a soundscape.
#[derive(Debug, Error)]
pub enum SoundscapeError {
    /// The request body did not carry a usable prompt.
    #[error("invalid prompt: a non-empty string is required")]
    InvalidPrompt,

    /// The request body was JSON `null`.
    #[error("request body is null")]
    NullBody,

    /// The image service answered with a non-success status.
    #[error("Pollinations.ai request failed with status: {status}")]
    ImageStatus {
        /// HTTP status returned by the image service
        status: reqwest::StatusCode,
    },

    /// The Gemini API answered with a non-success status.
    #[error("Gemini request failed with status {status}: {body}")]
    Api {
        /// HTTP status returned by the Gemini API
        status: reqwest::StatusCode,
        /// Raw error body
        body: String,
    },

    /// The Gemini API answered without any text.
    #[error("No valid response from the model")]
    EmptyResponse,

    /// The model text was not a soundscape envelope.
    #[error("malformed model output: {reason}")]
    MalformedOutput {
        /// Why the output was rejected
        reason: String,
    },

    /// Error occurred during an outbound HTTP request.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Error occurred when encoding or decoding JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be extracted.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// `GEMINI_API_KEY` is missing or empty.
    #[error("GEMINI_API_KEY is not defined. Please create a .env file and add your key.")]
    MissingApiKey,

    /// `GEMINI_API_KEY` still holds a placeholder value.
    #[error("GEMINI_API_KEY still holds the placeholder value {0:?}")]
    PlaceholderApiKey(String),

    /// I/O failure while binding or serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for SoundscapeError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl SoundscapeError {
    /// Creates a [`SoundscapeError::MalformedOutput`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
        }
    }

    /// The HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The caller-facing message for this error. Internal details never leak.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPrompt => INVALID_PROMPT_MESSAGE,
            Self::MalformedOutput { .. } => MALFORMED_OUTPUT_MESSAGE,
            _ => UNEXPECTED_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for SoundscapeError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SoundscapeError>;
