//! Data structures for the Gemini API and the soundscape endpoint.

mod generation_config;
mod model_params;
mod part;
mod request;
mod request_type;
mod response;
mod soundscape;

pub use generation_config::GenerationConfig;
pub use model_params::{ModelParams, DEFAULT_MODEL};
pub use part::Part;
pub use request::{Content, Request, Role};
pub use request_type::RequestType;
pub use response::{Candidate, FinishReason, Response, UsageMetadata};
pub use soundscape::{
    Envelope, ErrorBody, GenerateRequest, OverlayEnvelope, PaletteEnvelope, SoundscapeResponse,
};
