//! Job DTOs exchanged with the search service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::job::JobRequest;

/// Body of `POST /search/live/<kind>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJob {
    #[serde(rename = "type")]
    pub kind: String,
    pub arguments: JobArguments,
}

/// Operation arguments nested under `arguments`
///
/// Unset options and an empty query are left out of the body so that the
/// service applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobArguments {
    #[serde(rename = "type")]
    pub operation: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl From<&JobRequest> for CreateJob {
    fn from(req: &JobRequest) -> Self {
        Self {
            kind: req.kind().to_string(),
            arguments: JobArguments {
                operation: req.operation().to_string(),
                query: req.query().to_string(),
                max_results: req.max_results(),
                count: req.count(),
                next_cursor: req.next_cursor().map(str::to_string),
                start_time: req.start_time(),
                end_time: req.end_time(),
            },
        }
    }
}

/// Response to a job submission
///
/// A successful submission carries the job `uuid`; a rejected one carries a
/// non-empty `error` even with a 2xx status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateJobResponse {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub error: String,
}
