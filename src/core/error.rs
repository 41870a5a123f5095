use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("Invalid credential ({origin}): {reason}")]
    InvalidCredential { origin: String, reason: String },

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Authentication rejected (status {status_code}): {message}")]
    Authentication { message: String, status_code: u16 },

    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("The response contained no choices")]
    EmptyResponse,

    #[error("The first choice carried no message content")]
    MissingContent,

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl LlmError {
    /// True for errors raised before any request leaves the process.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LlmError::MissingCredential { .. }
                | LlmError::InvalidCredential { .. }
                | LlmError::ProviderConfiguration(_)
        )
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Authentication { status_code, .. } => Some(*status_code),
            LlmError::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
