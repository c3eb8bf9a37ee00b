//! Gopher HTTP Client
//!
//! Submits live-search jobs to the Gopher data service and waits for their
//! results.
//!
//! A search runs in two steps. The submitter posts the job and receives an
//! opaque handle; the poller then fetches the job result until the service
//! returns items, rejects the job, or the attempt budget runs out.
//!
//! # Example
//!
//! ```no_run
//! use gopher_client::{ClientConfig, GopherClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GopherClient::new(ClientConfig::from_env()?)?;
//!
//!     let output = client.search("rust lang").await;
//!     match output.error {
//!         Some(error) => eprintln!("search failed: {}", error),
//!         None => println!("found {} item(s)", output.items.len()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
mod poll;
mod search;
mod submit;

// Re-export commonly used types
pub use config::{ClientConfig, Credential, PollPolicy};
pub use error::{ClientError, Result};
pub use gopher_core::domain::job::{JobHandle, JobKind, JobRequest};
pub use gopher_core::domain::outcome::{Outcome, SearchOutput};
pub use gopher_core::domain::result::ResultItem;
pub use poll::PollState;
pub use search::into_items;
pub use tokio_util::sync::CancellationToken;

use reqwest::{Client, Response, StatusCode};

/// HTTP client for the Gopher live-search API
///
/// Cloning is cheap and clones share one connection pool, so a single client
/// can serve any number of concurrent searches. The client itself holds no
/// mutable state; every poll owns its attempt counter.
#[derive(Debug, Clone)]
pub struct GopherClient {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Configuration the client was built with
    config: ClientConfig,
}

impl GopherClient {
    /// Create a new client from a validated configuration
    ///
    /// The underlying HTTP client applies `config.request_timeout` to every
    /// request.
    ///
    /// # Example
    /// ```
    /// use gopher_client::{ClientConfig, Credential, GopherClient};
    ///
    /// let client = GopherClient::new(ClientConfig::new(Credential::new("api-key"))).unwrap();
    /// assert_eq!(client.base_url(), "https://data.gopher-ai.com/api/v1");
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self::from_parts(config, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The request
    /// timeout from `config` is not applied to `client`. `config` is
    /// validated the same way as in [`GopherClient::new`].
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, client))
    }

    fn from_parts(config: ClientConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            config,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read status and full body of a response
    ///
    /// Classification needs the raw text because the same endpoint answers
    /// with several JSON shapes.
    async fn read_response(response: Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use crate::{ClientConfig, Credential, GopherClient, PollPolicy};

    pub const TEST_KEY: &str = "test-key";

    /// Configuration pointed at a mock server with a fast poll policy
    pub fn config_for(base_url: &str, max_attempts: u32) -> ClientConfig {
        let mut config = ClientConfig::new(Credential::new(TEST_KEY));
        config.base_url = base_url.to_string();
        config.request_timeout = Duration::from_secs(5);
        config.poll = PollPolicy {
            max_attempts,
            interval: Duration::from_millis(1),
            unrecognized_limit: None,
        };
        config
    }

    pub fn client_for(base_url: &str, max_attempts: u32) -> GopherClient {
        GopherClient::new(config_for(base_url, max_attempts)).unwrap()
    }
}
