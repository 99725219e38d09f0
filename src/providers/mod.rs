//! Completion providers.
//!
//! The HTTP surface depends on the [`CompletionProvider`] trait rather than
//! a concrete client so handlers can be exercised with a stub in tests and
//! so the external API shape stays isolated in one module.

pub mod gemini;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_MODEL};

/// A single-shot text completion source.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one prompt, receive one completion. No streaming, no retry.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
