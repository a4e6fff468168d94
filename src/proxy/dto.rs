//! Proxy Data Transfer Objects
//!
//! Response and error-body types for the backend proxy endpoints.
//! These types are deserialized from JSON; unknown fields are ignored and
//! missing fields default, since the backend is an opaque collaborator.

use serde::Deserialize;

use crate::model::{ChannelSummary, EventCounts, HourlyCount, ReportRange, TypeSlice};

// ============================================
// Success payloads
// ============================================

/// `GET /api/date-range` payload
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeBody {
    pub start: String,
    pub end: String,
}

/// `GET /api/proxy/events/summary` payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryBody {
    #[serde(default)]
    pub counts: EventCounts,
    #[serde(default)]
    pub range: Option<ReportRange>,
}

/// `GET /api/proxy/events/analytics` payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsBody {
    #[serde(default)]
    pub type_pie: Vec<TypeSlice>,
    #[serde(default)]
    pub hourly_bar: Vec<HourlyCount>,
}

/// `GET /api/proxy/channels` payload (the `all` selector shape)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListBody {
    #[serde(default)]
    pub items: Vec<ChannelSummary>,
}

// ============================================
// Failure payloads
// ============================================

/// Error body shape shared by all endpoints on failure.
///
/// `detail` is either a list of validation records or a plain string; it is
/// kept opaque here and interpreted by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// One field-validation record inside a 400 `invalid_request` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationRecord {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Location path, e.g. `["query", "end"]`. Entries can be non-strings
    /// (array indices), so they stay opaque values.
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub input: Option<serde_json::Value>,
    #[serde(default)]
    pub ctx: Option<ValidationContext>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Context attached to a validation record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationContext {
    #[serde(default)]
    pub error: Option<String>,
}

impl ValidationRecord {
    /// Whether the location path names the given field
    pub fn loc_contains(&self, field: &str) -> bool {
        self.loc.iter().any(|v| v.as_str() == Some(field))
    }

    /// Context error string, if any
    pub fn ctx_error(&self) -> Option<&str> {
        self.ctx.as_ref().and_then(|c| c.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_record_loc_contains() {
        let record: ValidationRecord = serde_json::from_value(json!({
            "type": "value_error",
            "loc": ["query", "end"],
            "msg": "end must be >= start",
            "ctx": {"error": "end must be >= start"}
        }))
        .unwrap();

        assert!(record.loc_contains("end"));
        assert!(!record.loc_contains("start"));
        assert_eq!(record.ctx_error(), Some("end must be >= start"));
    }

    #[test]
    fn test_validation_record_mixed_loc_entries() {
        let record: ValidationRecord =
            serde_json::from_value(json!({"loc": ["body", 0, "severity"]})).unwrap();
        assert!(record.loc_contains("severity"));
    }

    #[test]
    fn test_error_body_tolerates_missing_fields() {
        let body: BackendErrorBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.error.is_none());
        assert!(body.detail.is_none());
    }

    #[test]
    fn test_summary_body_defaults() {
        let body: SummaryBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.counts.total, 0);
        assert!(body.range.is_none());
    }
}
