use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{ChatRequest, ChatResponse},
};

/// A service that can answer one chat completion request.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;
}
