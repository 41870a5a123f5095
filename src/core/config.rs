//! Credential loading.
//!
//! The credential is resolved through an explicit lookup function with the
//! same shape as [`std::env::var`], so the failure path can be exercised
//! without touching the process environment.

use std::env::VarError;
use std::fmt;

use tracing::{debug, warn};

use crate::provider::Provider;

use super::error::LlmError;

const CUSTOM_ORIGIN: &str = "explicitly supplied key";

/// Where the API key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read from the provider's environment variable(s).
    Default,
    /// Use the given value as-is.
    Custom(String),
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKey::Default => write!(f, "ApiKey::Default"),
            ApiKey::Custom(_) => write!(f, "ApiKey::Custom(<redacted>)"),
        }
    }
}

/// Validated client configuration: a provider and its credential.
#[derive(Clone)]
pub struct Config {
    provider: Provider,
    api_key: String,
}

impl Config {
    /// Resolve the default credential for `provider` from the process environment.
    pub fn from_env(provider: Provider) -> Result<Self, LlmError> {
        Self::from_lookup(provider, |name| std::env::var(name))
    }

    /// Resolve the default credential for `provider` with a custom lookup.
    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        Self::resolve(provider, ApiKey::Default, lookup)
    }

    /// Resolve `api_key` for `provider`.
    ///
    /// Provider variables are tried in order. A variable that is set but
    /// blank, malformed or not valid UTF-8 is skipped in favour of the next
    /// one; if none is usable, the first rejection is returned.
    pub fn resolve<F>(provider: Provider, api_key: ApiKey, lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let api_key = match api_key {
            ApiKey::Custom(value) => validate_api_key(CUSTOM_ORIGIN, &value)?,
            ApiKey::Default => key_from_vars(provider, &lookup)?,
        };

        Ok(Self { provider, api_key })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn key_from_vars<F>(provider: Provider, lookup: &F) -> Result<String, LlmError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut rejected = None;

    for name in provider.api_key_env_vars() {
        let origin = format!("environment variable {name}");
        let outcome = match lookup(name) {
            Ok(raw) => validate_api_key(&origin, &raw),
            Err(VarError::NotPresent) => continue,
            Err(VarError::NotUnicode(_)) => Err(LlmError::InvalidCredential {
                origin,
                reason: "value is not valid UTF-8".to_string(),
            }),
        };

        match outcome {
            Ok(key) => {
                debug!(%provider, source = %name, "Resolved API key");
                return Ok(key);
            }
            Err(err) => {
                warn!(error = %err, "Skipping unusable API key");
                if rejected.is_none() {
                    rejected = Some(err);
                }
            }
        }
    }

    Err(rejected.unwrap_or_else(|| LlmError::MissingCredential {
        var: provider.default_api_key_env_var().to_string(),
    }))
}

fn validate_api_key(origin: &str, raw: &str) -> Result<String, LlmError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(LlmError::InvalidCredential {
            origin: origin.to_string(),
            reason: "value is empty".to_string(),
        });
    }

    // Has to survive as an HTTP header value.
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LlmError::InvalidCredential {
            origin: origin.to_string(),
            reason: "value contains whitespace or control characters".to_string(),
        });
    }

    Ok(value.to_string())
}
