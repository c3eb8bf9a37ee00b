//! Poll outcome and search output types

use serde::{Deserialize, Serialize};

use crate::domain::result::ResultItem;

/// Terminal result of waiting on a job
///
/// Exactly one variant holds once polling stops. `Success` always carries a
/// vector, which may be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The job finished and returned its items
    Success(Vec<ResultItem>),
    /// The service rejected the job with a message
    ServiceError {
        message: String,
        code: Option<i64>,
    },
    /// The attempt budget ran out while the job was still pending
    Timeout { attempts: u32 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns the items of a successful outcome
    pub fn items(&self) -> Option<&[ResultItem]> {
        match self {
            Outcome::Success(items) => Some(items),
            _ => None,
        }
    }
}

/// Result of the inbound `search` operation
///
/// Failures never escape as errors; they are reported through `error` with an
/// empty item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub items: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutput {
    pub fn success(items: Vec<ResultItem>) -> Self {
        Self { items, error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
