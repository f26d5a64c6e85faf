pub mod groq;
pub mod ollama;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Free-form completion; the assistant text is used verbatim.
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String>;

    /// Completion constrained to a JSON object response, for the intent
    /// classification path.
    async fn chat_json(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String>;
}
