pub mod config;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use config::{ApiKey, Config};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::ChatProvider;
pub use types::{ChatRequest, ChatResponse, ChatRole, Choice, Message, Usage};
