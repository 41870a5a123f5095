mod constants;
pub mod groq;

pub use groq::{GroqClient, GroqConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
        }
    }
}

impl Provider {
    /// Environment variables consulted for this provider's API key, in order.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Groq => &[
                constants::groq::API_KEY_ENV_VAR,
                constants::groq::LEGACY_API_KEY_ENV_VAR,
            ],
        }
    }

    pub fn default_api_key_env_var(&self) -> &'static str {
        self.api_key_env_vars()[0]
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Groq => constants::groq::DEFAULT_MODEL,
        }
    }
}
