//! Shared HTTP client for provider calls.
//!
//! Every call is a single attempt. Failures are classified and returned to the
//! caller unchanged; nothing is retried.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::LlmError;

pub const USER_AGENT: &str = concat!("groq-ask/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// POST `body` as JSON and decode the JSON reply.
    ///
    /// 401 and 403 become [`LlmError::Authentication`], any other non-2xx
    /// status becomes [`LlmError::Api`].
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::Network {
            message: "Request failed".to_string(),
            source: Box::new(e),
        })?;

        let status = res.status();
        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            return Err(classify_status(status, response_text));
        }

        debug!(status = %status, bytes = response_text.len(), "HTTP request successful");

        serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}

fn classify_status(status: StatusCode, body: String) -> LlmError {
    let message = error_message(&body).unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication {
            message,
            status_code: status.as_u16(),
        },
        _ => LlmError::Api {
            message: format!("{status}: {message}"),
            status_code: Some(status.as_u16()),
        },
    }
}

/// Pull `error.message` out of an OpenAI-style error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
