//! Instruction templates and model-output cleaning.
//!
//! A [`SoundscapeVariant`] decides what the model is asked for and how its answer is read
//! back. Both variants share the sound allow-list and the code-fence cleaning.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SoundscapeError};
use crate::models::{Envelope, OverlayEnvelope, PaletteEnvelope};

/// The sound files shipped with the frontend. The model may only pick from these.
pub const AVAILABLE_SOUNDS: [&str; 7] = [
    "heavy-rain.mp3",
    "distant-thunder.mp3",
    "crackling-fireplace.mp3",
    "keyboard-typing.mp3",
    "forest.mp3",
    "wind.mp3",
    "office-ambience.mp3",
];

/// Aesthetic suffix appended to every image prompt.
pub const IMAGE_STYLE: &str = "lofi anime style, beautiful, aesthetic, ghibli inspired, pov";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("code fence pattern is valid"));

/// Which soundscape shape the service produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundscapeVariant {
    /// Background image, sounds and a transparent p5.js overlay.
    #[default]
    Overlay,
    /// Sounds and a three-color palette, no image.
    Palette,
}

impl fmt::Display for SoundscapeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlay => write!(f, "overlay"),
            Self::Palette => write!(f, "palette"),
        }
    }
}

impl SoundscapeVariant {
    /// Whether this variant fetches a background image and returns it.
    pub fn includes_image(self) -> bool {
        matches!(self, Self::Overlay)
    }

    /// Builds the instruction sent to the text-generation service.
    pub fn instruction(self, prompt: &str) -> String {
        match self {
            Self::Overlay => overlay_instruction(prompt),
            Self::Palette => palette_instruction(prompt),
        }
    }

    /// Strips code fences from raw model text and parses it into this variant's envelope.
    ///
    /// # Errors
    ///
    /// Returns [`SoundscapeError::MalformedOutput`] when the cleaned text is not JSON or
    /// lacks the variant's fields.
    pub fn parse_output(self, raw: &str) -> Result<Envelope> {
        let cleaned = strip_code_fences(raw);
        let envelope = match self {
            Self::Overlay => {
                serde_json::from_str::<OverlayEnvelope>(&cleaned).map(Envelope::Overlay)
            }
            Self::Palette => {
                serde_json::from_str::<PaletteEnvelope>(&cleaned).map(Envelope::Palette)
            }
        };
        envelope.map_err(|e| SoundscapeError::malformed(e.to_string()))
    }
}

/// Removes every "```json" and "```" marker and trims the result.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

fn sound_list() -> String {
    AVAILABLE_SOUNDS.join(", ")
}

fn overlay_instruction(prompt: &str) -> String {
    format!(
        r#"
You are a creative p5.js developer specializing in beautiful, performant, atmospheric overlays.
Your task is to interpret a user's prompt and respond with a JSON object containing a list of sounds and a string of p5.js code for a TRANSPARENT overlay.

**CRITICAL CONSTRAINTS:**
1.  Your entire response MUST be a single, valid JSON object. Do not include any explanatory text or markdown formatting.
2.  The JSON object must have two keys: "sounds" (an array of 2-4 strings) and "p5Code" (a single string of JavaScript code).
3.  You MUST choose sounds ONLY from this list: {sounds}
4.  The "p5Code" string MUST contain two functions: `sketchSetup(p)` and `sketchDraw(p)`.
5.  The `sketchDraw(p)` function MUST start with `p.clear()` to ensure the background remains transparent. Do NOT use `p.background()`.
6.  The code should ONLY generate foreground, atmospheric elements (e.g., rain, snow, dust motes, fireflies).
7.  You MUST NOT call `createCanvas(p)`.

**User's Prompt:** "{prompt}"

**Example for "a quiet library on a snowy day":**
{{
    "sounds": ["crackling-fireplace.mp3", "heavy-rain.mp3"],
    "p5Code": "let snowflakes = []; function sketchSetup(p) {{ for (let i = 0; i < 200; i++) {{ snowflakes.push({{x: p.random(p.width), y: p.random(p.height), speed: p.random(1, 3), radius: p.random(1, 3)}}); }} }} function sketchDraw(p) {{ p.clear(); p.noStroke(); p.fill(255, 255, 255, 150); for (let flake of snowflakes) {{ p.ellipse(flake.x, flake.y, flake.radius, flake.radius); flake.y += flake.speed; if (flake.y > p.height) {{ flake.y = 0; flake.x = p.random(p.width); }} }} }}"
}}
"#,
        sounds = sound_list(),
    )
}

fn palette_instruction(prompt: &str) -> String {
    format!(
        r##"
You are an ambient sound designer with a keen eye for color.
Your task is to interpret a user's prompt and respond with a JSON object containing a list of sounds and a color palette that captures its mood.

**CRITICAL CONSTRAINTS:**
1.  Your entire response MUST be a single, valid JSON object. Do not include any explanatory text or markdown formatting.
2.  The JSON object must have two keys: "sounds" (an array of 2-4 strings) and "colors" (an array of exactly 3 strings).
3.  You MUST choose sounds ONLY from this list: {sounds}
4.  Every entry of "colors" MUST be a hex color string such as "#1a2b3c".

**User's Prompt:** "{prompt}"

**Example for "a quiet library on a snowy day":**
{{
    "sounds": ["crackling-fireplace.mp3", "wind.mp3"],
    "colors": ["#2e3a4f", "#c9d6df", "#f0e6d2"]
}}
"##,
        sounds = sound_list(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_json_and_bare_fences() {
        let raw = "```json\n{\"sounds\":[\"wind.mp3\"]}\n```\n";
        assert_eq!(strip_code_fences(raw), "{\"sounds\":[\"wind.mp3\"]}");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn fences_inside_text_are_removed_too() {
        assert_eq!(strip_code_fences("a```json b``` c"), "a b c");
    }

    #[test]
    fn overlay_instruction_carries_prompt_allow_list_and_entry_points() {
        let instruction = SoundscapeVariant::Overlay.instruction("rainy library");

        assert!(instruction.contains(r#"**User's Prompt:** "rainy library""#));
        assert!(instruction.contains(
            "heavy-rain.mp3, distant-thunder.mp3, crackling-fireplace.mp3, keyboard-typing.mp3, forest.mp3, wind.mp3, office-ambience.mp3"
        ));
        assert!(instruction.contains("`sketchSetup(p)` and `sketchDraw(p)`"));
        assert!(instruction.contains("MUST start with `p.clear()`"));
        assert!(instruction.contains("function sketchDraw(p) { p.clear();"));
    }

    #[test]
    fn palette_instruction_asks_for_three_hex_colors() {
        let instruction = SoundscapeVariant::Palette.instruction("neon alley");

        assert!(instruction.contains(r#""neon alley""#));
        assert!(instruction.contains("exactly 3 strings"));
        assert!(!instruction.contains("p5Code"));
        for sound in AVAILABLE_SOUNDS {
            assert!(instruction.contains(sound));
        }
    }

    #[test]
    fn parses_fenced_overlay_output() {
        let raw = "```json\n{\"sounds\":[\"forest.mp3\",\"wind.mp3\"],\"p5Code\":\"function sketchDraw(p) { p.clear(); }\"}\n```";
        let envelope = SoundscapeVariant::Overlay.parse_output(raw).unwrap();

        assert_eq!(
            envelope,
            Envelope::Overlay(OverlayEnvelope {
                sounds: vec!["forest.mp3".into(), "wind.mp3".into()],
                p5_code: "function sketchDraw(p) { p.clear(); }".into(),
            })
        );
    }

    #[test]
    fn prose_is_malformed_output() {
        let err = SoundscapeVariant::Overlay
            .parse_output("I cannot help with that")
            .unwrap_err();
        assert!(matches!(err, SoundscapeError::MalformedOutput { .. }));
    }

    #[test]
    fn wrong_shape_is_malformed_output() {
        let raw = r##"{"sounds":["wind.mp3"],"colors":["#000000","#ffffff","#888888"]}"##;

        assert!(SoundscapeVariant::Palette.parse_output(raw).is_ok());
        assert!(matches!(
            SoundscapeVariant::Overlay.parse_output(raw),
            Err(SoundscapeError::MalformedOutput { .. })
        ));
        assert!(matches!(
            SoundscapeVariant::Palette.parse_output(r#"{"sounds":"wind.mp3","colors":[]}"#),
            Err(SoundscapeError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn variant_reads_from_lowercase_names() {
        let variant: SoundscapeVariant = serde_json::from_str("\"palette\"").unwrap();
        assert_eq!(variant, SoundscapeVariant::Palette);
        assert!(!variant.includes_image());
        assert!(SoundscapeVariant::default().includes_image());
    }
}
