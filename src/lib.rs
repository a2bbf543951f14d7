#![deny(missing_docs)]

//! An HTTP service that turns a text prompt into an ambient soundscape.
//!
//! A request goes through two upstream services in order: Pollinations renders a
//! background image, then Gemini picks sounds and writes either a p5.js overlay or a
//! color palette. The model's answer is cleaned, checked against a typed schema and
//! returned together with the image.

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod image;
pub mod models;
pub mod prompt;
pub mod server;

pub use client::GenerativeModel;
pub use config::Config;
pub use error::SoundscapeError;
pub use generator::{ImageGenerator, SoundscapeGenerator, TextGenerator};
pub use image::ImageClient;
pub use prompt::SoundscapeVariant;
