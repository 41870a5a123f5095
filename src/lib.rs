//! # groq-ask
//!
//! Ask a hosted chat-completion model one fixed question and print the answer.
//!
//! The library half exposes the pieces the binary wires together: credential
//! loading ([`Config`]), the provider seam ([`ChatProvider`]), a Groq client
//! ([`GroqClient`]) and the [`CompletionRequester`] that builds the fixed
//! request and extracts the first choice.
//!
//! ```rust,no_run
//! use groq_ask::{CompletionRequester, Config, GroqClient, Provider};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env(Provider::Groq)?;
//!     let client = GroqClient::from_config(&config)?;
//!     CompletionRequester::new()
//!         .run(&client, &mut std::io::stdout())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod provider;
pub mod requester;

pub use crate::core::{
    ApiKey, ChatProvider, ChatRequest, ChatResponse, ChatRole, Choice, Config, LlmError,
    Message, Usage,
};
pub use provider::{GroqClient, GroqConfig, Provider};
pub use requester::{CompletionRequester, first_choice_text};
