//! Job result polling
//!
//! Fetches a job's result until the service returns a terminal answer or the
//! attempt budget runs out. Each call owns its attempt counter; nothing is
//! shared between concurrent polls apart from the HTTP connection pool.

use gopher_core::domain::job::JobHandle;
use gopher_core::domain::outcome::Outcome;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::GopherClient;
use crate::classify::{PendingReason, PollStep, classify_poll_response};
use crate::config::Credential;
use crate::error::{ClientError, Result};

/// State of a single poll
///
/// `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Succeeded,
    Failed,
}

impl PollState {
    /// State reached after observing `step` while polling
    pub fn after(self, step: &PollStep) -> Self {
        match (self, step) {
            (PollState::Polling, PollStep::Pending(_)) => PollState::Polling,
            (PollState::Polling, PollStep::Done(Outcome::Success(_))) => PollState::Succeeded,
            (PollState::Polling, _) => PollState::Failed,
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != PollState::Polling
    }
}

impl GopherClient {
    /// Wait for a job to finish
    ///
    /// Returns the terminal [`Outcome`]: the items, the service's rejection,
    /// or a timeout once `poll.max_attempts` requests have been spent.
    /// Transport failures are returned as errors and stop polling at once.
    ///
    /// # Arguments
    /// * `handle` - The job returned by [`GopherClient::submit`]
    /// * `credential` - Bearer credential for this call
    pub async fn poll(&self, handle: &JobHandle, credential: &Credential) -> Result<Outcome> {
        self.poll_with_cancel(handle, credential, &CancellationToken::new())
            .await
    }

    /// Wait for a job to finish, aborting when `cancel` fires
    ///
    /// Cancellation is observed both while a request is in flight and while
    /// waiting between attempts, and yields [`ClientError::Cancelled`] with
    /// the number of attempts that completed.
    pub async fn poll_with_cancel(
        &self,
        handle: &JobHandle,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<Outcome> {
        let policy = &self.config.poll;
        let url = self.url(&handle.result_path());

        let mut state = PollState::Polling;
        let mut unrecognized_streak = 0u32;

        for attempt in 1..=policy.max_attempts {
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(job_id = %handle.id, attempt, "Poll cancelled");
                    return Err(ClientError::Cancelled { attempts: attempt - 1 });
                }
                step = self.fetch_result(&url, credential) => step?,
            };

            state = state.after(&step);

            match step {
                PollStep::Done(outcome) => {
                    info!(job_id = %handle.id, attempt, ?state, "Job finished");
                    return Ok(outcome);
                }
                PollStep::Failed(err) => {
                    warn!(job_id = %handle.id, attempt, error = %err, "Poll failed");
                    return Err(err);
                }
                PollStep::Pending(reason) => {
                    debug!(
                        job_id = %handle.id,
                        attempt,
                        max_attempts = policy.max_attempts,
                        ?reason,
                        "Job not ready"
                    );

                    if reason == PendingReason::Unrecognized {
                        unrecognized_streak += 1;
                        warn!(
                            job_id = %handle.id,
                            attempt,
                            streak = unrecognized_streak,
                            "Unrecognized result body, treating as not ready"
                        );
                        if policy
                            .unrecognized_limit
                            .is_some_and(|limit| unrecognized_streak >= limit)
                        {
                            return Err(ClientError::ParseError(format!(
                                "{} consecutive unrecognized result bodies",
                                unrecognized_streak
                            )));
                        }
                    } else {
                        unrecognized_streak = 0;
                    }
                }
            }

            if attempt < policy.max_attempts {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!(job_id = %handle.id, attempt, "Poll cancelled");
                        return Err(ClientError::Cancelled { attempts: attempt });
                    }
                    _ = time::sleep(policy.interval) => {}
                }
            }
        }

        warn!(
            job_id = %handle.id,
            attempts = policy.max_attempts,
            "Gave up waiting for job"
        );
        Ok(Outcome::Timeout {
            attempts: policy.max_attempts,
        })
    }

    /// Issue one result request and classify the answer
    async fn fetch_result(&self, url: &str, credential: &Credential) -> Result<PollStep> {
        let response = self
            .client
            .get(url)
            .bearer_auth(credential.expose())
            .send()
            .await?;

        let (status, body) = Self::read_response(response).await?;
        Ok(classify_poll_response(status, &body))
    }
}
