use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Sampling parameters sent alongside a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(doc)]
pub struct GenerationConfig {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f32>,

    /// MIME type of the generated candidate text (e.g. "application/json").
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub response_mime_type: Option<String>,
}
