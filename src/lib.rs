//! Two-step image generation demo against Gemini's native image output.
//!
//! Generates an image from a text prompt, then edits that image with a
//! follow-up prompt, persisting both results to disk.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;

pub use error::{Error, Result};
