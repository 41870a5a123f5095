//! Groq provider implementation.
//!
//! Groq serves an OpenAI-compatible `chat/completions` endpoint. Response
//! fields the crate does not consume are still decoded and marked
//! `#[allow(dead_code)]`, so the wire structs mirror the API contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    ChatProvider, ChatRequest, ChatResponse, ChatRole, Choice, Config, HttpClient,
    HttpClientConfig, LlmError, Message, Usage,
};
use crate::provider::{Provider, constants::groq};

/// Groq-specific configuration
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GroqConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: groq::API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            groq::CHAT_COMPLETIONS_ENDPOINT
        )
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}

impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TryFrom<&Config> for GroqConfig {
    type Error = LlmError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        match config.provider() {
            Provider::Groq => Ok(GroqConfig::new(config.api_key().to_string())),
        }
    }
}

pub struct GroqClient {
    config: GroqConfig,
    http: HttpClient,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(&HttpClientConfig::default())?;
        Ok(Self { config, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(GroqConfig::try_from(config)?)
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    #[tracing::instrument(
        name = "groq_chat_completion",
        skip(self, request),
        fields(model = %request.model, messages = request.messages.len())
    )]
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let body = CompletionsRequest::from(request);
        let headers = [self.config.auth_header()];

        let response: CompletionsResponse = self
            .http
            .post_json(&self.config.url(), &headers, &body)
            .await?;

        Ok(response.into())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletionsRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    pub stream: bool,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

impl<'a> From<&'a ChatRequest> for CompletionsRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            stream: request.stream,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionsResponse {
    #[serde(default)]
    pub id: String,

    #[allow(dead_code)]
    /// Always `chat.completion`
    #[serde(default)]
    pub object: Option<String>,

    #[allow(dead_code)]
    #[serde(default)]
    pub created: Option<u64>,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub choices: Vec<WireChoice>,

    #[serde(default)]
    pub usage: Option<WireUsage>,

    #[allow(dead_code)]
    #[serde(default)]
    pub system_fingerprint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoice {
    #[serde(default)]
    pub index: u32,
    pub message: WireResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,

    #[allow(dead_code)]
    #[serde(default)]
    pub total_time: Option<f64>,
}

impl From<CompletionsResponse> for ChatResponse {
    fn from(response: CompletionsResponse) -> Self {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                role: match choice.message.role.as_deref() {
                    Some("system") => ChatRole::System,
                    Some("user") => ChatRole::User,
                    _ => ChatRole::Assistant,
                },
                content: choice.message.content,
                finish_reason: choice.finish_reason,
            })
            .collect();

        ChatResponse {
            id: response.id,
            model: response.model,
            choices,
            usage: response.usage.map(|usage| Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        }
    }
}
