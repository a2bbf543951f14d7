use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::GenerationConfig;

/// Default model used for soundscape instructions.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Configuration parameters for the generative model
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct ModelParams {
    /// Model identifier (e.g., "gemini-1.5-flash-latest")
    #[builder(setter(into), default = String::from(DEFAULT_MODEL))]
    pub model: String,

    /// Generation config applied when a request carries none of its own
    #[builder(default, setter(strip_option))]
    pub generation_config: Option<GenerationConfig>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<&str> for ModelParams {
    fn from(model: &str) -> Self {
        Self::builder().model(model).build()
    }
}
