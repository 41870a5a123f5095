//! The one fixed question this crate asks.

use std::env::VarError;
use std::io::Write;

use tracing::{debug, info};

use crate::core::{ChatProvider, ChatRequest, ChatResponse, Config, LlmError, Message};
use crate::provider::Provider;

pub const PROMPT: &str = "is origin of morality prudential?";
/// The request goes to this provider's default model.
pub const PROVIDER: Provider = Provider::Groq;
/// Above the range most chat APIs document as typical.
pub const TEMPERATURE: f32 = 1.5;

/// Sends one fixed chat completion request and surfaces the first answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompletionRequester;

impl CompletionRequester {
    pub fn new() -> Self {
        Self
    }

    /// The request sent on every run.
    pub fn request(&self) -> ChatRequest {
        ChatRequest {
            model: PROVIDER.default_model().to_string(),
            messages: vec![Message::user(PROMPT)],
            stream: false,
            temperature: TEMPERATURE,
        }
    }

    /// Send the request and return the first choice's text.
    pub async fn complete<P>(&self, provider: &P) -> Result<String, LlmError>
    where
        P: ChatProvider + ?Sized,
    {
        let request = self.request();
        info!(model = %request.model, "Requesting chat completion");

        let response = provider.chat_completion(&request).await?;
        debug!(
            id = %response.id,
            model = %response.model,
            choices = response.choices.len(),
            total_tokens = response.usage.map(|u| u.total_tokens),
            "Received chat completion"
        );

        first_choice_text(response)
    }

    /// Complete and write the answer as a single line. Nothing is written on error.
    pub async fn run<P, W>(&self, provider: &P, out: &mut W) -> Result<(), LlmError>
    where
        P: ChatProvider + ?Sized,
        W: Write,
    {
        let text = self.complete(provider).await?;
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }

    /// Load the credential through `lookup`, build a provider from it and [`run`](Self::run).
    ///
    /// A credential error returns before `make_provider` is called.
    pub async fn run_with<L, M, P, W>(
        &self,
        lookup: L,
        make_provider: M,
        out: &mut W,
    ) -> Result<(), LlmError>
    where
        L: Fn(&str) -> Result<String, VarError>,
        M: FnOnce(&Config) -> Result<P, LlmError>,
        P: ChatProvider,
        W: Write,
    {
        let config = Config::from_lookup(PROVIDER, lookup)?;
        let provider = make_provider(&config)?;
        self.run(&provider, out).await
    }
}

pub fn first_choice_text(response: ChatResponse) -> Result<String, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    choice.content.ok_or(LlmError::MissingContent)
}
