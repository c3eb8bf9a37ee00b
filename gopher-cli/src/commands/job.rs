//! Job command handlers
//!
//! Exposes the two halves of a search separately: `submit` creates a job and
//! prints its id, `poll` waits on an id obtained earlier.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::*;
use gopher_client::{GopherClient, JobHandle, JobKind, JobRequest, Outcome, SearchOutput};
use gopher_core::domain::job::operation;

use crate::config::Config;
use crate::output::{print_items, print_json};

/// Arguments of `gopher submit`
#[derive(Args)]
pub struct SubmitArgs {
    /// Query, username or ID, depending on the operation
    query: Option<String>,

    /// Job kind
    #[arg(long, default_value = "twitter")]
    kind: String,

    /// Operation to run
    #[arg(long, default_value = operation::SEARCH_BY_QUERY)]
    operation: String,

    /// Results per request
    #[arg(long)]
    count: Option<u32>,

    /// Pagination cursor from a previous page
    #[arg(long)]
    cursor: Option<String>,

    /// Start of the time range (RFC 3339)
    #[arg(long, requires = "until")]
    since: Option<DateTime<Utc>>,

    /// End of the time range (RFC 3339)
    #[arg(long, requires = "since")]
    until: Option<DateTime<Utc>>,
}

/// Arguments of `gopher poll`
#[derive(Args)]
pub struct PollArgs {
    /// Job id returned by `gopher submit`
    id: String,

    /// Job kind the id was submitted under
    #[arg(long, default_value = "twitter")]
    kind: String,

    /// Print the raw JSON output
    #[arg(long)]
    json: bool,
}

impl SubmitArgs {
    fn into_request(self, max_results: u32) -> JobRequest {
        let kind = JobKind::from(self.kind.as_str());

        let mut request = JobRequest::new(kind, self.operation).with_max_results(max_results);
        if let Some(query) = self.query {
            request = request.with_query(query);
        }
        if let Some(count) = self.count {
            request = request.with_count(count);
        }
        if let Some(cursor) = self.cursor {
            request = request.with_cursor(cursor);
        }
        if let (Some(since), Some(until)) = (self.since, self.until) {
            request = request.with_time_range(since, until);
        }
        request
    }
}

/// Submit a job and print its id
pub async fn submit_job(args: SubmitArgs, config: &Config) -> Result<()> {
    let client = GopherClient::new(config.client.clone()).context("Failed to create client")?;
    let request = args.into_request(config.client.max_results);

    let handle = client
        .submit(&request.endpoint_path(), &request, &config.client.credential)
        .await
        .context("Failed to submit job")?;

    println!("{} {}", "Submitted job".green(), handle.id.bold());
    println!(
        "{}",
        format!("Poll with: gopher poll {} --kind {}", handle.id, handle.kind).dimmed()
    );
    Ok(())
}

/// Poll a job until it finishes and print the outcome
pub async fn poll_job(args: PollArgs, config: &Config) -> Result<()> {
    let client = GopherClient::new(config.client.clone()).context("Failed to create client")?;
    let cancel = config.cancellation();

    let handle = JobHandle::new(args.id, JobKind::from(args.kind.as_str()));

    let outcome = client
        .poll_with_cancel(&handle, &config.client.credential, &cancel)
        .await;

    if args.json {
        let output = match outcome.and_then(gopher_client::into_items) {
            Ok(items) => SearchOutput::success(items),
            Err(e) => SearchOutput::failure(e.to_string()),
        };
        return print_json(&output);
    }

    match outcome.context("Failed to poll job")? {
        Outcome::Success(items) => {
            print_items(&items);
            Ok(())
        }
        Outcome::ServiceError { message, code } => match code {
            Some(code) => bail!("Job rejected ({}): {}", code, message),
            None => bail!("Job rejected: {}", message),
        },
        Outcome::Timeout { attempts } => {
            bail!("Job still pending after {} attempt(s)", attempts)
        }
    }
}
