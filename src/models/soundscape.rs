//! Payloads of the `/api/generate` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SoundscapeError};
use crate::prompt::AVAILABLE_SOUNDS;

/// Body of a soundscape request.
///
/// `prompt` is kept as a raw JSON value so that a missing, non-string and blank prompt
/// all land in the same validation branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    /// The caller's free-text prompt.
    pub prompt: Option<Value>,
}

impl GenerateRequest {
    /// Reads a request from a raw body.
    ///
    /// Only a JSON object carries a prompt. Arrays, strings and numbers parse to a request
    /// without one.
    ///
    /// # Errors
    ///
    /// Returns [`SoundscapeError::Json`] if the body is not JSON and
    /// [`SoundscapeError::NullBody`] if it is `null`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice(body)? {
            Value::Null => Err(SoundscapeError::NullBody),
            Value::Object(mut fields) => Ok(Self {
                prompt: fields.remove("prompt"),
            }),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the prompt if it is a string with non-whitespace content.
    ///
    /// # Errors
    ///
    /// Returns [`SoundscapeError::InvalidPrompt`] otherwise.
    pub fn prompt(&self) -> Result<&str> {
        match &self.prompt {
            Some(Value::String(prompt)) if !prompt.trim().is_empty() => Ok(prompt),
            _ => Err(SoundscapeError::InvalidPrompt),
        }
    }
}

/// Model output for the overlay variant: a p5.js animation drawn over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayEnvelope {
    /// Sound file names to play.
    pub sounds: Vec<String>,
    /// p5.js source defining `sketchSetup(p)` and `sketchDraw(p)`.
    pub p5_code: String,
}

/// Model output for the palette variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEnvelope {
    /// Sound file names to play.
    pub sounds: Vec<String>,
    /// Hex color strings.
    pub colors: Vec<String>,
}

/// A schema-checked model output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    /// Sounds plus a p5.js overlay.
    Overlay(OverlayEnvelope),
    /// Sounds plus a color palette.
    Palette(PaletteEnvelope),
}

impl Envelope {
    /// The sound names the model picked.
    pub fn sounds(&self) -> &[String] {
        match self {
            Self::Overlay(envelope) => &envelope.sounds,
            Self::Palette(envelope) => &envelope.sounds,
        }
    }

    /// Lists every place where the output departs from what the instruction asked for.
    ///
    /// These findings are advisory. The handler logs them and still returns the output.
    pub fn audit(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let sounds = self.sounds();
        if !(2..=4).contains(&sounds.len()) {
            issues.push(format!("expected 2-4 sounds, got {}", sounds.len()));
        }
        for sound in sounds {
            if !AVAILABLE_SOUNDS.contains(&sound.as_str()) {
                issues.push(format!("sound {sound:?} is not in the allow-list"));
            }
        }

        match self {
            Self::Overlay(overlay) => {
                for entry_point in ["sketchSetup", "sketchDraw"] {
                    if !overlay.p5_code.contains(entry_point) {
                        issues.push(format!("p5Code does not define {entry_point}"));
                    }
                }
                if overlay.p5_code.contains("background(") {
                    issues.push("p5Code paints an opaque background".to_string());
                }
            }
            Self::Palette(palette) => {
                if palette.colors.len() != 3 {
                    issues.push(format!("expected 3 colors, got {}", palette.colors.len()));
                }
                for color in &palette.colors {
                    if !is_hex_color(color) {
                        issues.push(format!("color {color:?} is not a hex color"));
                    }
                }
            }
        }

        issues
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Successful body of `/api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundscapeResponse {
    /// Base64 background image, only for variants that fetch one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    /// The parsed model output, inlined.
    #[serde(flatten)]
    pub envelope: Envelope,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}
