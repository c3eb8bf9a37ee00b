//! Client configuration
//!
//! Connection settings, the bearer credential and the polling policy. The
//! struct is built once (usually from the environment) and handed to the
//! client constructor; nothing here is global.

use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Production endpoint of the search service
pub const DEFAULT_BASE_URL: &str = "https://data.gopher-ai.com/api/v1";

/// Result cap used by the inbound `search` operation
pub const DEFAULT_MAX_RESULTS: u32 = 15;

/// Timeout applied to every individual HTTP request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub const ENV_API_KEY: &str = "GOPHER_API";
pub const ENV_MAX_RESULTS: &str = "MAX_RESULTS";
pub const ENV_BASE_URL: &str = "GOPHER_BASE_URL";

/// Bearer credential sent with every request
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for the `Authorization` header
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// How the poller waits on a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Number of result requests before giving up
    pub max_attempts: u32,

    /// Fixed delay between two result requests
    pub interval: Duration,

    /// Consecutive unrecognized 2xx bodies tolerated before failing
    ///
    /// `None` keeps retrying on unrecognized bodies until the attempt budget
    /// runs out.
    pub unrecognized_limit: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            unrecognized_limit: None,
        }
    }
}

/// Gopher client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://data.gopher-ai.com/api/v1")
    pub base_url: String,

    /// Bearer credential
    pub credential: Credential,

    /// Result cap for the inbound `search` operation
    pub max_results: u32,

    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,

    /// Poll budget and pacing
    pub poll: PollPolicy,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the credential
    pub fn new(credential: Credential) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credential,
            max_results: DEFAULT_MAX_RESULTS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll: PollPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - GOPHER_API (required)
    /// - MAX_RESULTS (optional, default: 15)
    /// - GOPHER_BASE_URL (optional, default: production endpoint)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup
    ///
    /// A `MAX_RESULTS` that is not a positive integer falls back to the
    /// default rather than failing.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .map(Credential::new)
            .ok_or_else(|| {
                ClientError::InvalidConfig(format!("{ENV_API_KEY} environment variable not set"))
            })?;

        let mut config = Self::new(credential);

        config.max_results = lookup(ENV_MAX_RESULTS)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credential.is_empty() {
            return Err(ClientError::InvalidConfig(
                "credential cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.max_results == 0 {
            return Err(ClientError::InvalidConfig(
                "max_results must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.poll.max_attempts == 0 {
            return Err(ClientError::InvalidConfig(
                "poll.max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.poll.unrecognized_limit == Some(0) {
            return Err(ClientError::InvalidConfig(
                "poll.unrecognized_limit must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}
