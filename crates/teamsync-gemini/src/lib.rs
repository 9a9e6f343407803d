//! Gemini `generateContent` client used as the team advisory generator.
//!
//! Implements [`teamsync_core::advisory::TextGenerator`]. The reply text is
//! passed through exactly as the model produced it.

mod client;
mod error;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{Error, Result};
