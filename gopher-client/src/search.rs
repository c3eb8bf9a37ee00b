//! Inbound `search` operation
//!
//! Composes submission and polling for a twitter query and flattens every
//! failure into the `error` field of [`SearchOutput`].

use gopher_core::domain::job::JobRequest;
use gopher_core::domain::outcome::{Outcome, SearchOutput};
use gopher_core::domain::result::ResultItem;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::GopherClient;
use crate::error::{ClientError, Result};

impl GopherClient {
    /// Search twitter for `query`
    ///
    /// Uses the configured credential and `max_results`. Never fails: errors
    /// are reported as `SearchOutput::error` with no items.
    pub async fn search(&self, query: &str) -> SearchOutput {
        self.search_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Search twitter for `query`, aborting when `cancel` fires
    pub async fn search_with_cancel(&self, query: &str, cancel: &CancellationToken) -> SearchOutput {
        match self.run_search(query, cancel).await {
            Ok(items) => {
                info!(count = items.len(), "Search completed");
                SearchOutput::success(items)
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                SearchOutput::failure(e.to_string())
            }
        }
    }

    async fn run_search(&self, query: &str, cancel: &CancellationToken) -> Result<Vec<ResultItem>> {
        let credential = &self.config.credential;
        let request = JobRequest::twitter_search(query, self.config.max_results);
        let endpoint = request.endpoint_path();

        let handle = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled { attempts: 0 }),
            handle = self.submit(&endpoint, &request, credential) => handle?,
        };

        let outcome = self.poll_with_cancel(&handle, credential, cancel).await?;
        into_items(outcome)
    }
}

/// Turn a terminal outcome into items or the matching error
pub fn into_items(outcome: Outcome) -> Result<Vec<ResultItem>> {
    match outcome {
        Outcome::Success(items) => Ok(items),
        Outcome::ServiceError { message, code } => Err(ClientError::Service { message, code }),
        Outcome::Timeout { attempts } => Err(ClientError::Timeout { attempts }),
    }
}
