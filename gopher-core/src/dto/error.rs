//! Error body returned by the search service

use serde::{Deserialize, Serialize};

/// Error object the service sends with non-2xx statuses
///
/// Every field is optional on the wire. Only a non-empty `message` makes the
/// body usable as a service-level rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
}

impl ApiErrorBody {
    /// Returns the message when it can be reported as-is
    pub fn usable_message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }
}
