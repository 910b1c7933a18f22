pub mod gemini;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ModelConfig, Provider};
use crate::error::ModelError;

pub use gemini::GeminiModel;
pub use openai::OpenAiCompatModel;

/// Sampling knobs passed with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// A hosted text model: prompt in, complete reply text out.
///
/// Streaming backends must assemble every fragment before returning.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// # Errors
    ///
    /// Returns `ModelError` for transport, auth, or configuration failures.
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
    -> Result<String, ModelError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Stand-in used when no credentials are configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledModel;

#[async_trait]
impl TextModel for DisabledModel {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, ModelError> {
        Err(ModelError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Pick the backend for `config`, or `DisabledModel` when there is none.
#[must_use]
pub fn model_from_config(config: Option<&ModelConfig>) -> Arc<dyn TextModel> {
    match config {
        Some(config) => match config.provider {
            Provider::Gemini => Arc::new(GeminiModel::new(&config.base_url, &config.api_key)),
            Provider::Groq => Arc::new(OpenAiCompatModel::new(&config.base_url, &config.api_key)),
        },
        None => Arc::new(DisabledModel),
    }
}
