//! Configuration module
//!
//! Loads the client configuration from the environment and applies
//! command-line overrides on top.

use std::time::Duration;

use anyhow::{Context, Result};
use gopher_client::ClientConfig;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Command-line values that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub max_results: Option<u32>,
    pub max_attempts: Option<u32>,
    pub poll_interval: Option<u64>,
    pub deadline: Option<u64>,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings handed to the client constructor
    pub client: ClientConfig,
    /// Wall-clock limit for one command
    pub deadline: Option<Duration>,
}

impl Config {
    /// Load from the environment, then apply overrides
    pub fn load(overrides: Overrides) -> Result<Self> {
        let client = ClientConfig::from_env().context("Failed to load configuration")?;
        Self::from_parts(client, overrides)
    }

    fn from_parts(mut client: ClientConfig, overrides: Overrides) -> Result<Self> {
        if let Some(base_url) = overrides.base_url {
            client.base_url = base_url;
        }
        if let Some(max_results) = overrides.max_results {
            client.max_results = max_results;
        }
        if let Some(max_attempts) = overrides.max_attempts {
            client.poll.max_attempts = max_attempts;
        }
        if let Some(secs) = overrides.poll_interval {
            client.poll.interval = Duration::from_secs(secs);
        }

        client.validate().context("Invalid configuration")?;

        Ok(Self {
            client,
            deadline: overrides.deadline.map(Duration::from_secs),
        })
    }

    /// Token cancelled on Ctrl-C or when the deadline passes
    pub fn cancellation(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let deadline = self.deadline;

        tokio::spawn(async move {
            let expired = async {
                match deadline {
                    Some(limit) => tokio::time::sleep(limit).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("Interrupted, cancelling"),
                _ = expired => info!("Deadline reached, cancelling"),
                _ = trigger.cancelled() => debug!("Cancellation watcher stopped"),
            }
            trigger.cancel();
        });

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_client::Credential;

    #[test]
    fn test_overrides_take_precedence() {
        let base = ClientConfig::new(Credential::new("k"));
        let config = Config::from_parts(
            base,
            Overrides {
                base_url: Some("http://localhost:9000".to_string()),
                max_results: Some(50),
                max_attempts: Some(5),
                poll_interval: Some(1),
                deadline: Some(20),
            },
        )
        .unwrap();

        assert_eq!(config.client.base_url, "http://localhost:9000");
        assert_eq!(config.client.max_results, 50);
        assert_eq!(config.client.poll.max_attempts, 5);
        assert_eq!(config.client.poll.interval, Duration::from_secs(1));
        assert_eq!(config.deadline, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = Config::from_parts(ClientConfig::new(Credential::new("k")), Overrides::default())
            .unwrap();
        assert_eq!(config.client.max_results, 15);
        assert_eq!(config.client.poll.max_attempts, 30);
        assert_eq!(config.deadline, None);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = Config::from_parts(
            ClientConfig::new(Credential::new("k")),
            Overrides {
                max_results: Some(0),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_deadline_cancels_token() {
        let mut config = Config::from_parts(
            ClientConfig::new(Credential::new("k")),
            Overrides::default(),
        )
        .unwrap();
        config.deadline = Some(Duration::from_millis(20));

        let token = config.cancellation();
        tokio::time::timeout(Duration::from_secs(5), token.cancelled())
            .await
            .expect("deadline should cancel the token");
    }
}
