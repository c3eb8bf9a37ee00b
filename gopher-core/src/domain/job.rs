//! Job domain types

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Operations understood by the `twitter` job kind
pub mod operation {
    pub const SEARCH_BY_QUERY: &str = "searchbyquery";
    pub const SEARCH_BY_FULL_ARCHIVE: &str = "searchbyfullarchive";
    pub const SEARCH_BY_PROFILE: &str = "searchbyprofile";
    pub const GET_BY_ID: &str = "getbyid";
    pub const GET_REPLIES: &str = "getreplies";
    pub const GET_RETWEETERS: &str = "getretweeters";
    pub const GET_TWEETS: &str = "gettweets";
    pub const GET_MEDIA: &str = "getmedia";
    pub const GET_PROFILE_BY_ID: &str = "getprofilebyid";
    pub const GET_FOLLOWERS: &str = "getfollowers";
    pub const GET_FOLLOWING: &str = "getfollowing";
    pub const GET_TRENDS: &str = "gettrends";
    pub const GET_SPACE: &str = "getspace";

    /// Whether an operation needs a non-empty `query` argument
    ///
    /// Everything except trend listing is keyed by a search term, a username
    /// or an ID carried in `query`.
    pub fn requires_query(operation: &str) -> bool {
        operation != GET_TRENDS
    }
}

/// Kind of job the service should run
///
/// The kind selects the service endpoint (`/search/live/<kind>`) and is echoed
/// as the top-level `type` of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKind {
    Twitter,
    Other(String),
}

impl JobKind {
    pub fn as_str(&self) -> &str {
        match self {
            JobKind::Twitter => "twitter",
            JobKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JobKind {
    fn from(s: &str) -> Self {
        match s {
            "twitter" => JobKind::Twitter,
            other => JobKind::Other(other.to_string()),
        }
    }
}

impl FromStr for JobKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JobKind::from(s))
    }
}

/// A search job to submit
///
/// Built once per invocation and never mutated after it is handed to the
/// submitter. The `with_*` methods consume and return the request so that a
/// request is fully assembled before anything can borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    kind: JobKind,
    operation: String,
    query: String,
    max_results: Option<u32>,
    count: Option<u32>,
    next_cursor: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl JobRequest {
    /// Creates a request for `operation` on the given job kind
    pub fn new(kind: JobKind, operation: impl Into<String>) -> Self {
        Self {
            kind,
            operation: operation.into(),
            query: String::new(),
            max_results: None,
            count: None,
            next_cursor: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Creates the query-driven twitter search the inbound `search` operation uses
    pub fn twitter_search(query: impl Into<String>, max_results: u32) -> Self {
        Self::new(JobKind::Twitter, operation::SEARCH_BY_QUERY)
            .with_query(query)
            .with_max_results(max_results)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the pagination cursor returned by a previous page
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(cursor.into());
        self
    }

    /// Restricts results to the `[start, end]` window
    pub fn with_time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Requested result cap; `None` lets the service apply its default (1000)
    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Conventional submission path for this request's kind
    pub fn endpoint_path(&self) -> String {
        format!("/search/live/{}", self.kind)
    }
}

/// Opaque identifier of a submitted job
///
/// Produced by a successful submission and consumed by the poller. The kind is
/// kept alongside the id because the result endpoint is scoped by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
    pub kind: JobKind,
}

impl JobHandle {
    pub fn new(id: impl Into<String>, kind: JobKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Path of the result endpoint for this job
    pub fn result_path(&self) -> String {
        format!("/search/live/{}/result/{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_kind_round_trips_through_str() {
        assert_eq!("twitter".parse::<JobKind>().unwrap(), JobKind::Twitter);
        assert_eq!(
            "web".parse::<JobKind>().unwrap(),
            JobKind::Other("web".to_string())
        );
        assert_eq!(JobKind::from("twitter"), JobKind::Twitter);
        assert_eq!(JobKind::Other("web".to_string()).to_string(), "web");
    }

    #[test]
    fn test_twitter_search_defaults() {
        let req = JobRequest::twitter_search("rust lang", 15);
        assert_eq!(req.kind(), &JobKind::Twitter);
        assert_eq!(req.operation(), operation::SEARCH_BY_QUERY);
        assert_eq!(req.query(), "rust lang");
        assert_eq!(req.max_results(), Some(15));
        assert_eq!(req.next_cursor(), None);
        assert_eq!(req.endpoint_path(), "/search/live/twitter");
    }

    #[test]
    fn test_handle_result_path() {
        let handle = JobHandle::new("abc123", JobKind::Twitter);
        assert_eq!(handle.result_path(), "/search/live/twitter/result/abc123");
    }

    #[test]
    fn test_requires_query() {
        assert!(operation::requires_query(operation::SEARCH_BY_QUERY));
        assert!(operation::requires_query(operation::GET_FOLLOWERS));
        assert!(!operation::requires_query(operation::GET_TRENDS));
    }
}
