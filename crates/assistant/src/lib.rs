//! AI copy assistant.
//!
//! Writes and polishes site copy through a generative model. The
//! [`CopyAssistant`] trait is the boundary; [`GeminiClient`] is the HTTP
//! implementation and [`session`] applies results to an editor.

pub mod client;
pub mod error;
pub mod image;
mod request;
pub mod session;
pub mod types;

use async_trait::async_trait;

pub use client::{AssistantConfig, GeminiClient};
pub use error::{AssistError, Result};
pub use image::ImageInput;
pub use session::{apply_suggestions, improve_field};
pub use types::ContentSuggestions;

#[async_trait]
pub trait CopyAssistant: Send + Sync {
    /// Polish a piece of copy; returns `text` unchanged if the model says nothing
    async fn improve_copy(&self, text: &str) -> Result<String>;

    /// Draft a headline, about text and product descriptions from a description
    async fn enhance_content(
        &self,
        description: &str,
        business_name: &str,
    ) -> Result<ContentSuggestions>;

    /// Extract site copy from a mockup or business photo
    async fn analyze_image(&self, image: &ImageInput) -> Result<ContentSuggestions>;

    /// Research an existing website and extract its copy
    async fn analyze_url(&self, url: &str) -> Result<ContentSuggestions>;
}
