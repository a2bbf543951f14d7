//! Request models for the Gemini API.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::{GenerationConfig, Part};

/// The author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model
    Model,
}

/// A request to the Gemini API.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(doc)]
pub struct Request {
    /// The contents of the request, including the prompt text.
    pub contents: Vec<Content>,
    /// Optional generation parameters; the model defaults are used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub generation_config: Option<GenerationConfig>,
}

/// A content object containing parts of the request or response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Who produced this content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts that make up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Request {
    /// Creates a new request with a single user turn holding `text`.
    ///
    /// # Arguments
    ///
    /// * `text` - The text prompt to generate content from
    pub fn with_prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part::text(text)],
            }],
            generation_config: None,
        }
    }
}

impl From<&str> for Request {
    fn from(prompt: &str) -> Self {
        Self::with_prompt(prompt)
    }
}

impl From<String> for Request {
    fn from(prompt: String) -> Self {
        Self::with_prompt(prompt)
    }
}
