//! Response classification
//!
//! Pure functions that turn an HTTP status and raw body into a client
//! decision. The submitter and the poller share the error-body rules; the
//! poller adds the three shapes a result request can return.

use gopher_core::domain::job::{JobHandle, JobKind};
use gopher_core::domain::outcome::Outcome;
use gopher_core::domain::result::ResultItem;
use gopher_core::dto::error::ApiErrorBody;
use gopher_core::dto::job::CreateJobResponse;
use reqwest::StatusCode;
use serde_json::{Map, Value as JsonValue};

use crate::error::{ClientError, Result};

/// Status value the service reports while a job is still running
pub const PROCESSING_STATUS: &str = "processing";

/// Why a result request did not finish the poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingReason {
    /// 404: the result does not exist yet
    NotFound,
    /// `{"status": "processing"}`
    Processing,
    /// 2xx body of no known shape
    Unrecognized,
}

/// Decision taken after one result request
#[derive(Debug)]
pub enum PollStep {
    /// Not finished; spend an attempt and try again
    Pending(PendingReason),
    /// Terminal service answer
    Done(Outcome),
    /// Terminal transport failure
    Failed(ClientError),
}

/// Classify a non-2xx response body
///
/// Returns `Service` when the body is an error object with a non-empty
/// `message`, otherwise an `Http` transport error carrying the raw body.
pub fn classify_error_body(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => match err.usable_message() {
            Some(message) => ClientError::service(message, err.code),
            None => http_error(status, body),
        },
        Err(_) => http_error(status, body),
    }
}

fn http_error(status: StatusCode, body: &str) -> ClientError {
    ClientError::Http {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Classify the response to a job submission
pub fn classify_submit_response(status: StatusCode, body: &str, kind: &JobKind) -> Result<JobHandle> {
    if !status.is_success() {
        return Err(classify_error_body(status, body));
    }

    let response: CreateJobResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse submit response: {}", e)))?;

    if !response.error.is_empty() {
        return Err(ClientError::service(response.error, None));
    }

    if response.uuid.is_empty() {
        return Err(ClientError::ParseError(
            "submit response carried no job uuid".to_string(),
        ));
    }

    Ok(JobHandle::new(response.uuid, kind.clone()))
}

/// Classify the response to one result request
///
/// Rules are applied in priority order: 404, other non-2xx, result array,
/// processing object, anything else. A `null` body counts as an empty result
/// array.
pub fn classify_poll_response(status: StatusCode, body: &str) -> PollStep {
    if status == StatusCode::NOT_FOUND {
        return PollStep::Pending(PendingReason::NotFound);
    }

    if !status.is_success() {
        return match classify_error_body(status, body) {
            ClientError::Service { message, code } => {
                PollStep::Done(Outcome::ServiceError { message, code })
            }
            other => PollStep::Failed(other),
        };
    }

    // A nil slice from the service arrives as `null`, and so do nil elements.
    if let Ok(items) = serde_json::from_str::<Option<Vec<Option<ResultItem>>>>(body) {
        let items = items
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        return PollStep::Done(Outcome::Success(items));
    }

    if let Ok(object) = serde_json::from_str::<Map<String, JsonValue>>(body) {
        if object.get("status").and_then(JsonValue::as_str) == Some(PROCESSING_STATUS) {
            return PollStep::Pending(PendingReason::Processing);
        }
    }

    PollStep::Pending(PendingReason::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(step: &PollStep) -> Option<PendingReason> {
        match step {
            PollStep::Pending(reason) => Some(*reason),
            _ => None,
        }
    }

    #[test]
    fn test_error_body_with_message_is_service_error() {
        let err = classify_error_body(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"invalid token","code":401}"#,
        );
        match err {
            ClientError::Service { message, code } => {
                assert_eq!(message, "invalid token");
                assert_eq!(code, Some(401));
            }
            other => panic!("Expected Service error, got: {other:?}"),
        }
    }

    #[test]
    fn test_error_body_without_message_is_transport() {
        for body in [r#"{"error":"forbidden"}"#, "<html>502</html>", ""] {
            let err = classify_error_body(StatusCode::BAD_GATEWAY, body);
            match err {
                ClientError::Http { status, body: raw } => {
                    assert_eq!(status, 502);
                    assert_eq!(raw, body);
                }
                other => panic!("Expected Http error for {body:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_submit_returns_exact_uuid() {
        let handle = classify_submit_response(
            StatusCode::OK,
            r#"{"uuid":"abc123","error":""}"#,
            &JobKind::Twitter,
        )
        .unwrap();
        assert_eq!(handle.id, "abc123");
        assert_eq!(handle.kind, JobKind::Twitter);
    }

    #[test]
    fn test_submit_error_field_is_service_error() {
        let err = classify_submit_response(
            StatusCode::OK,
            r#"{"uuid":"","error":"quota exceeded"}"#,
            &JobKind::Twitter,
        )
        .unwrap_err();
        assert!(err.is_service());
        assert_eq!(err.to_string(), "API error: quota exceeded");
    }

    #[test]
    fn test_submit_malformed_body_is_transport() {
        let err = classify_submit_response(StatusCode::OK, "not json", &JobKind::Twitter)
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));

        let err = classify_submit_response(StatusCode::OK, r#"{"uuid":""}"#, &JobKind::Twitter)
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[test]
    fn test_poll_not_found_is_pending() {
        let step = classify_poll_response(StatusCode::NOT_FOUND, r#"{"message":"no such job"}"#);
        assert_eq!(pending(&step), Some(PendingReason::NotFound));
    }

    #[test]
    fn test_poll_array_is_success() {
        let step = classify_poll_response(
            StatusCode::OK,
            r#"[{"ID":"1","Content":"hi","Metadata":null,"Score":0.9}]"#,
        );
        match step {
            PollStep::Done(Outcome::Success(items)) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "1");
                assert_eq!(items[0].content, "hi");
                assert_eq!(items[0].score, 0.9);
            }
            other => panic!("Expected success, got: {other:?}"),
        }
    }

    #[test]
    fn test_poll_empty_array_is_success() {
        let step = classify_poll_response(StatusCode::OK, "[]");
        assert!(matches!(step, PollStep::Done(Outcome::Success(items)) if items.is_empty()));
    }

    #[test]
    fn test_poll_null_is_empty_success() {
        let step = classify_poll_response(StatusCode::OK, "null");
        assert!(matches!(step, PollStep::Done(Outcome::Success(items)) if items.is_empty()));

        let step = classify_poll_response(StatusCode::OK, r#"[null, {"ID":"2"}]"#);
        match step {
            PollStep::Done(Outcome::Success(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0], ResultItem::default());
                assert_eq!(items[1].id, "2");
            }
            other => panic!("Expected success, got: {other:?}"),
        }
    }

    #[test]
    fn test_poll_processing_is_pending() {
        let step = classify_poll_response(StatusCode::OK, r#"{"status":"processing","progress":40}"#);
        assert_eq!(pending(&step), Some(PendingReason::Processing));
    }

    #[test]
    fn test_poll_unknown_shapes_are_pending() {
        for body in [
            r#"{"status":"queued"}"#,
            r#"{"status":1}"#,
            "[1, 2, 3]",
            "garbled{",
            "",
        ] {
            let step = classify_poll_response(StatusCode::OK, body);
            assert_eq!(
                pending(&step),
                Some(PendingReason::Unrecognized),
                "body {body:?}"
            );
        }
    }

    #[test]
    fn test_poll_error_status_with_message_is_service_outcome() {
        let step = classify_poll_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"internal","message":"job crashed","code":500}"#,
        );
        match step {
            PollStep::Done(Outcome::ServiceError { message, code }) => {
                assert_eq!(message, "job crashed");
                assert_eq!(code, Some(500));
            }
            other => panic!("Expected service error outcome, got: {other:?}"),
        }
    }

    #[test]
    fn test_poll_error_status_without_message_fails() {
        let step = classify_poll_response(StatusCode::SERVICE_UNAVAILABLE, "upstream down");
        assert!(matches!(
            step,
            PollStep::Failed(ClientError::Http { status: 503, .. })
        ));
    }
}
