#![forbid(unsafe_code)]

//! Transport adapter: one timed-out synchronous GET per case.
//!
//! Every call folds into a tri-state [`Outcome`]; no transport condition is
//! allowed to escape as a panic or error. A slow, unreachable, or misbehaving
//! server becomes a failed case, never a crashed run.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Rejected base-URL shapes, caught before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    #[error("base URL must start with http:// or https://: `{url}`")]
    UnsupportedScheme { url: String },
    #[error("base URL must not end with `/`: `{url}`")]
    TrailingSlash { url: String },
}

/// Result of a single endpoint fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx status with a JSON-decodable body.
    Success { status: u16, payload: Value },
    /// Non-2xx status, or a 2xx body that failed to decode as JSON.
    Failure { status: u16 },
    /// Timeout, connection refusal, DNS failure, or a malformed response at
    /// the transport level. Carries no HTTP status.
    Transport { reason: String },
}

impl Outcome {
    /// Observed HTTP status, if one was received. `None` is the sentinel for
    /// transport-level failure, distinct from every real status code.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } | Self::Failure { status } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Seam between the run controller and the network. The controller only ever
/// sees [`Outcome`]s, so suites are testable against an in-memory stub.
pub trait Transport {
    fn fetch(&self, endpoint: &str, timeout: Duration) -> Outcome;
}

/// Blocking HTTP transport over a shared [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is prepended verbatim to every endpoint path, so it must
    /// name a scheme and must not carry a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme { url: base_url });
        }
        if base_url.ends_with('/') {
            return Err(ConfigError::TrailingSlash { url: base_url });
        }
        Ok(Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, endpoint: &str, timeout: Duration) -> Outcome {
        let url = format!("{}{endpoint}", self.base_url);
        match self.agent.get(&url).timeout(timeout).call() {
            Ok(response) => {
                let status = response.status();
                if !(200..300).contains(&status) {
                    return Outcome::Failure { status };
                }
                match response.into_json::<Value>() {
                    Ok(payload) => Outcome::Success { status, payload },
                    Err(_) => Outcome::Failure { status },
                }
            }
            Err(ureq::Error::Status(status, _)) => Outcome::Failure { status },
            Err(ureq::Error::Transport(transport)) => Outcome::Transport {
                reason: transport.to_string(),
            },
        }
    }
}
