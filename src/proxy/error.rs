//! Error Normalization
//!
//! Maps an HTTP status code plus a JSON error body into a structured,
//! user-facing error description. `normalize` is a pure function: no
//! logging, no side effects. The caller decides what to do with the result.

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::dto::{BackendErrorBody, ValidationRecord};

/// Status-code sentinel for transport failures that never got a response
pub const NETWORK_SENTINEL: u16 = 0;

/// Failure taxonomy for normalized errors
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad client-side or server-side input
    Validation,
    /// Transport failure, no HTTP response
    Network,
    /// 5xx from the backend
    Server,
    /// Other 400s
    BadRequest,
    /// 413
    PayloadTooLarge,
    /// Anything else with a status code
    Unknown,
    /// Failure while applying an otherwise-successful response
    Unexpected,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::BadRequest => "bad_request",
            ErrorCategory::PayloadTooLarge => "payload_too_large",
            ErrorCategory::Unknown => "unknown",
            ErrorCategory::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of a failed call, for display and logging
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ApiInfo {
    pub path: Option<String>,
    pub method: Option<String>,
    pub status: u16,
}

/// A backend failure normalized for display.
///
/// Produced once per failed call, consumed for display and logging, then
/// discarded. Nothing here is fatal.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("[{category}] {user_message}")]
pub struct NormalizedError {
    /// Human-readable description, possibly multi-line
    pub user_message: String,
    pub category: ErrorCategory,
    /// HTTP status, or [`NETWORK_SENTINEL`] when no response arrived
    pub status_code: u16,
    pub api_info: ApiInfo,
    /// Opaque technical detail for logs
    pub technical: Value,
}

impl NormalizedError {
    /// Transport-level failure: no HTTP response was received.
    ///
    /// This path never touches the body-parsing logic in [`normalize`].
    pub fn network(path: &str, detail: String) -> Self {
        Self {
            user_message: "Network connection failed.\nCheck the connection and try again."
                .to_string(),
            category: ErrorCategory::Network,
            status_code: NETWORK_SENTINEL,
            api_info: ApiInfo {
                path: Some(path.to_string()),
                method: Some("GET".to_string()),
                status: NETWORK_SENTINEL,
            },
            technical: json!({ "transport_error": detail }),
        }
    }

    /// Client-side validation failure that blocked a call before it was made
    pub fn client_validation(message: String) -> Self {
        Self {
            user_message: message,
            category: ErrorCategory::Validation,
            status_code: NETWORK_SENTINEL,
            api_info: ApiInfo {
                path: Some("client-validation".to_string()),
                method: Some("CLIENT".to_string()),
                status: NETWORK_SENTINEL,
            },
            technical: Value::Null,
        }
    }

    /// Failure while processing a successful response (bad payload shape,
    /// handler error). Reported as a named partial failure, never fatal.
    pub fn unexpected(path: &str, detail: String) -> Self {
        Self {
            user_message: format!("Unexpected error while handling the response:\n{}", detail),
            category: ErrorCategory::Unexpected,
            status_code: NETWORK_SENTINEL,
            api_info: ApiInfo {
                path: Some(path.to_string()),
                method: Some("GET".to_string()),
                status: NETWORK_SENTINEL,
            },
            technical: json!({ "detail": detail }),
        }
    }
}

/// Normalize an HTTP failure into a [`NormalizedError`].
///
/// The body is the JSON the endpoint returned alongside the non-2xx status;
/// an unreadable or non-object body degrades to the generic message for the
/// status code. Never panics.
pub fn normalize(status_code: u16, body: &Value) -> NormalizedError {
    let parsed: BackendErrorBody =
        serde_json::from_value(body.clone()).unwrap_or_default();

    let api_info = ApiInfo {
        path: parsed.path.clone(),
        method: parsed.method.clone(),
        status: parsed.status.unwrap_or(status_code),
    };

    let (user_message, category, technical) = match status_code {
        400 if parsed.error.as_deref() == Some("invalid_request") => {
            match validation_records(parsed.detail.as_ref()) {
                Some(records) if !records.is_empty() => {
                    let message = validation_message(&records);
                    let technical = json!({
                        "api_path": parsed.path,
                        "method": parsed.method,
                        "validation_errors": parsed.detail,
                    });
                    (message, ErrorCategory::Validation, technical)
                }
                // detail missing, empty, or not a sequence: unparseable
                _ => (
                    "Bad request. Check the submitted values and try again.".to_string(),
                    ErrorCategory::BadRequest,
                    body.clone(),
                ),
            }
        }
        400 => (
            "Required parameters are missing.\nProvide start and end dates in YYYY-MM-DD format."
                .to_string(),
            ErrorCategory::BadRequest,
            body.clone(),
        ),
        413 => (
            "The requested payload is too large.\nNarrow the date range and try again."
                .to_string(),
            ErrorCategory::PayloadTooLarge,
            body.clone(),
        ),
        500 => (
            "The server hit an internal error.\nTry again in a moment.".to_string(),
            ErrorCategory::Server,
            body.clone(),
        ),
        other => (
            format!(
                "The server returned an error (code: {}).\nContact the administrator if it persists.",
                other
            ),
            ErrorCategory::Unknown,
            body.clone(),
        ),
    };

    NormalizedError {
        user_message,
        category,
        status_code,
        api_info,
        technical,
    }
}

/// Interpret `detail` as a sequence of validation records, if it is one
fn validation_records(detail: Option<&Value>) -> Option<Vec<ValidationRecord>> {
    let items = detail?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect(),
    )
}

/// Build the newline-joined validation message with a header line and the
/// first rejected input value, when present
fn validation_message(records: &[ValidationRecord]) -> String {
    let mut lines = vec!["Invalid input:".to_string()];
    for record in records {
        lines.push(format!("\u{2022} {}", record_message(record)));
    }
    let mut message = lines.join("\n");

    if let Some(input) = records.first().and_then(|r| r.input.as_ref()) {
        let shown = match input {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        message.push_str(&format!("\n\nRejected value: {}", shown));
    }

    message
}

/// Map one validation record's location path to a fixed message
fn record_message(record: &ValidationRecord) -> String {
    let ordering_violation = record
        .ctx_error()
        .map_or(false, |e| e.contains(">="));

    if record.loc_contains("end") && ordering_violation {
        "End date must not precede the start date".to_string()
    } else if record.loc_contains("start") {
        "Start date format is invalid (YYYY-MM-DD required)".to_string()
    } else if record.loc_contains("end") {
        "End date format is invalid (YYYY-MM-DD required)".to_string()
    } else if record.loc_contains("severity") {
        "Severity value is invalid (choose one of all, critical, warn, info)".to_string()
    } else {
        record
            .msg
            .clone()
            .unwrap_or_else(|| "Invalid input value".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_request_body(detail: Value) -> Value {
        json!({
            "error": "invalid_request",
            "path": "/api/proxy/events/summary",
            "method": "GET",
            "status": 400,
            "detail": detail,
        })
    }

    #[test]
    fn test_end_before_start_record() {
        let body = invalid_request_body(json!([{
            "type": "value_error",
            "loc": ["query", "end"],
            "msg": "Value error, end must be >= start",
            "input": "2025-07-01",
            "ctx": {"error": "end must be >= start"}
        }]));

        let err = normalize(400, &body);
        assert_eq!(err.category, ErrorCategory::Validation);
        assert!(err.user_message.contains("End date must not precede the start date"));
        assert!(err.user_message.contains("Rejected value: 2025-07-01"));
        assert_eq!(err.api_info.path.as_deref(), Some("/api/proxy/events/summary"));
    }

    #[test]
    fn test_malformed_start_record() {
        let body = invalid_request_body(json!([{
            "loc": ["query", "start"],
            "msg": "invalid date format",
            "input": "07-2025"
        }]));

        let err = normalize(400, &body);
        assert_eq!(err.category, ErrorCategory::Validation);
        assert!(err.user_message.contains("Start date format is invalid"));
    }

    #[test]
    fn test_malformed_end_record() {
        let body = invalid_request_body(json!([{
            "loc": ["query", "end"],
            "msg": "invalid date format"
        }]));

        let err = normalize(400, &body);
        assert!(err.user_message.contains("End date format is invalid"));
    }

    #[test]
    fn test_invalid_severity_record() {
        let body = invalid_request_body(json!([{
            "loc": ["query", "severity"],
            "input": "catastrophic"
        }]));

        let err = normalize(400, &body);
        assert!(err
            .user_message
            .contains("Severity value is invalid (choose one of all, critical, warn, info)"));
        assert!(err.user_message.contains("Rejected value: catastrophic"));
    }

    #[test]
    fn test_unmatched_record_falls_back_to_raw_message() {
        let body = invalid_request_body(json!([{
            "loc": ["query", "channel_id"],
            "msg": "value is not a valid integer"
        }]));

        let err = normalize(400, &body);
        assert_eq!(err.category, ErrorCategory::Validation);
        assert!(err.user_message.contains("value is not a valid integer"));
    }

    #[test]
    fn test_multiple_records_newline_joined() {
        let body = invalid_request_body(json!([
            {"loc": ["query", "start"]},
            {"loc": ["query", "severity"]}
        ]));

        let err = normalize(400, &body);
        let bullet_lines = err
            .user_message
            .lines()
            .filter(|l| l.starts_with('\u{2022}'))
            .count();
        assert_eq!(bullet_lines, 2);
        assert!(err.user_message.starts_with("Invalid input:"));
    }

    #[test]
    fn test_non_sequence_detail_degrades_to_bad_request() {
        let body = invalid_request_body(json!("end must be >= start"));

        let err = normalize(400, &body);
        assert_eq!(err.category, ErrorCategory::BadRequest);
        assert!(err.user_message.contains("Bad request"));
    }

    #[test]
    fn test_plain_400_reports_missing_parameters() {
        let body = json!({"error": "start and end parameters required"});
        let err = normalize(400, &body);
        assert_eq!(err.category, ErrorCategory::BadRequest);
        assert!(err.user_message.contains("Required parameters are missing"));
    }

    #[test]
    fn test_payload_too_large() {
        let err = normalize(413, &json!({}));
        assert_eq!(err.category, ErrorCategory::PayloadTooLarge);
    }

    #[test]
    fn test_server_error_fixed_message() {
        let err = normalize(500, &json!({"error": "boom", "detail": "stack"}));
        assert_eq!(err.category, ErrorCategory::Server);
        assert_eq!(
            err.user_message,
            "The server hit an internal error.\nTry again in a moment."
        );
    }

    #[test]
    fn test_unknown_status_embeds_code() {
        let err = normalize(503, &json!({}));
        assert_eq!(err.category, ErrorCategory::Unknown);
        assert!(err.user_message.contains("503"));
        assert_eq!(err.status_code, 503);
    }

    #[test]
    fn test_network_error_uses_sentinel() {
        let err = NormalizedError::network("/api/proxy/channels", "connection refused".into());
        assert_eq!(err.category, ErrorCategory::Network);
        assert_eq!(err.status_code, NETWORK_SENTINEL);
        assert_eq!(err.api_info.status, NETWORK_SENTINEL);
    }

    #[test]
    fn test_non_object_body_never_panics() {
        let err = normalize(400, &json!([1, 2, 3]));
        assert_eq!(err.category, ErrorCategory::BadRequest);

        let err = normalize(500, &Value::Null);
        assert_eq!(err.category, ErrorCategory::Server);
    }

    #[test]
    fn test_body_status_preferred_in_api_info() {
        let body = json!({"error": "x", "status": 418, "path": "/p", "method": "GET"});
        let err = normalize(400, &body);
        assert_eq!(err.api_info.status, 418);
        assert_eq!(err.status_code, 400);
    }
}
