//! Job submission

use gopher_core::domain::job::{JobHandle, JobRequest, operation};
use gopher_core::dto::job::CreateJob;
use tracing::{debug, info};

use crate::GopherClient;
use crate::classify::classify_submit_response;
use crate::config::Credential;
use crate::error::{ClientError, Result};

impl GopherClient {
    /// Submit a job and return its handle
    ///
    /// Sends the request to `base_url + endpoint_path` with the credential as
    /// a bearer token. Failures are returned immediately; submission is never
    /// retried.
    ///
    /// # Arguments
    /// * `endpoint_path` - Submission path, usually `request.endpoint_path()`
    /// * `request` - The job to create
    /// * `credential` - Bearer credential for this call
    ///
    /// # Returns
    /// The handle of the created job
    ///
    /// # Example
    /// ```no_run
    /// # use gopher_client::{ClientConfig, Credential, GopherClient, JobRequest};
    /// # async fn example() -> anyhow::Result<()> {
    /// let credential = Credential::new("api-key");
    /// let client = GopherClient::new(ClientConfig::new(credential.clone()))?;
    ///
    /// let request = JobRequest::twitter_search("rust lang", 15);
    /// let handle = client
    ///     .submit(&request.endpoint_path(), &request, &credential)
    ///     .await?;
    /// println!("submitted job {}", handle.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(
        &self,
        endpoint_path: &str,
        request: &JobRequest,
        credential: &Credential,
    ) -> Result<JobHandle> {
        validate_request(request)?;

        let url = self.url(endpoint_path);
        debug!(
            url = %url,
            operation = request.operation(),
            max_results = ?request.max_results(),
            "Submitting job"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&CreateJob::from(request))
            .send()
            .await?;

        let (status, body) = Self::read_response(response).await?;
        let handle = classify_submit_response(status, &body, request.kind())?;

        info!(job_id = %handle.id, kind = %handle.kind, "Submitted job");
        Ok(handle)
    }
}

/// Check a request before anything goes on the wire
fn validate_request(request: &JobRequest) -> Result<()> {
    if request.operation().trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "operation cannot be empty".to_string(),
        ));
    }

    if request.max_results() == Some(0) {
        return Err(ClientError::InvalidRequest(
            "max_results must be a positive integer".to_string(),
        ));
    }

    if operation::requires_query(request.operation()) && request.query().trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!(
            "query is required for operation '{}'",
            request.operation()
        )));
    }

    if let (Some(start), Some(end)) = (request.start_time(), request.end_time()) {
        if start > end {
            return Err(ClientError::InvalidRequest(
                "start_time must not be after end_time".to_string(),
            ));
        }
    }

    Ok(())
}
