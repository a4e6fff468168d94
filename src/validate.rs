//! Date Range Validation
//!
//! Maintains the server-supplied allowed interval and enforces that
//! user-entered start/end dates parse, are ordered, and lie inside the
//! interval. Validation is pure: it consumes inputs and returns data, and a
//! failure is always locally recoverable: it blocks a fetch or auto-corrects
//! a field, never escalates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How long the transient shake status lasts before settling, in ms
pub const SHAKE_DURATION_MS: u64 = 500;

/// Errors constructing an allowed range
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Malformed(String),

    #[error("range start {start} is after end {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// Server-declared bounds beyond which date inputs are rejected or clamped.
///
/// Immutable once fetched for the session; replaced wholesale if re-fetched.
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowedDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AllowedDateRange {
    /// Create a range, refusing a reversed pair
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start = parse_date(start).ok_or_else(|| DateRangeError::Malformed(start.into()))?;
        let end = parse_date(end).ok_or_else(|| DateRangeError::Malformed(end.into()))?;
        Self::new(start, end)
    }

    /// Whether the date lies inside the bounds (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Nearest in-range date
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.end)
    }

    /// Bounds citation used in user-facing messages: `start ~ end`
    pub fn bounds_label(&self) -> String {
        format!(
            "{} ~ {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }

    /// Validate a submitted start/end pair ahead of a fetch.
    ///
    /// Checks run in stages (presence, parseability, ordering, bounds) and
    /// every problem found within a stage is accumulated before reporting, so
    /// the user sees all input problems from that stage in one pass. A stage
    /// with errors gates the later stages (an unordered pair reports the
    /// ordering violation, not a bounds violation).
    pub fn validate_submission(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ValidationResult {
        let mut errors = Vec::new();

        if start.map_or(true, str::is_empty) {
            errors.push("Select a start date".to_string());
        }
        if end.map_or(true, str::is_empty) {
            errors.push("Select an end date".to_string());
        }
        if !errors.is_empty() {
            return ValidationResult::failed(errors);
        }

        let start_raw = start.unwrap_or_default();
        let end_raw = end.unwrap_or_default();
        let parsed_start = parse_date(start_raw);
        let parsed_end = parse_date(end_raw);

        if parsed_start.is_none() {
            errors.push("Start date is not a valid date (YYYY-MM-DD required)".to_string());
        }
        if parsed_end.is_none() {
            errors.push("End date is not a valid date (YYYY-MM-DD required)".to_string());
        }
        let (Some(parsed_start), Some(parsed_end)) = (parsed_start, parsed_end) else {
            return ValidationResult::failed(errors);
        };

        if parsed_end < parsed_start {
            return ValidationResult::failed(vec![
                "End date must not precede the start date".to_string(),
            ]);
        }

        if !self.contains(parsed_start) || !self.contains(parsed_end) {
            return ValidationResult::failed(vec![format!(
                "Allowed date range: {}\nPick dates inside the range",
                self.bounds_label()
            )]);
        }

        ValidationResult::ok()
    }

    /// Clamp a live-edited input to the nearest bound.
    ///
    /// `in_range == false` signals that a user-visible notice should be
    /// shown. Unparseable input passes through unchanged; submission
    /// validation still reports it.
    pub fn clamp_and_style(&self, input: &str) -> ClampOutcome {
        let Some(date) = parse_date(input) else {
            return ClampOutcome {
                adjusted_value: input.to_string(),
                in_range: false,
            };
        };

        if self.contains(date) {
            ClampOutcome {
                adjusted_value: input.to_string(),
                in_range: true,
            }
        } else {
            ClampOutcome {
                adjusted_value: self.clamp(date).format(DATE_FORMAT).to_string(),
                in_range: false,
            }
        }
    }

    /// Visual status of a single date input against the bounds
    pub fn input_status(&self, input: &str) -> InputStatus {
        let Some(date) = parse_date(input) else {
            return InputStatus::Unvalidated;
        };
        if self.contains(date) {
            InputStatus::Valid
        } else {
            InputStatus::ShakeTransient
        }
    }
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

/// Outcome of a pre-submission validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Newline-joined errors, ready for display
    pub message: String,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            message: String::new(),
        }
    }

    fn failed(errors: Vec<String>) -> Self {
        let message = errors.join("\n");
        Self {
            valid: false,
            errors,
            message,
        }
    }
}

/// Result of clamping a live-edited date input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampOutcome {
    pub adjusted_value: String,
    pub in_range: bool,
}

/// Which of the two linked date inputs was edited last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// A start/end pair after ordering reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledPair {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The field that was pulled along, if any
    pub adjusted: Option<DateField>,
}

/// Keep a linked start/end pair ordered after an edit.
///
/// The edited field wins: when the pair inverts, the *other* field is moved
/// to match it.
pub fn reconcile_pair(edited: DateField, start: NaiveDate, end: NaiveDate) -> ReconciledPair {
    if start <= end {
        return ReconciledPair {
            start,
            end,
            adjusted: None,
        };
    }

    match edited {
        DateField::Start => ReconciledPair {
            start,
            end: start,
            adjusted: Some(DateField::End),
        },
        DateField::End => ReconciledPair {
            start: end,
            end,
            adjusted: Some(DateField::Start),
        },
    }
}

/// Visual status of a date input.
///
/// `ShakeTransient` is cosmetic: it settles to `OutOfRange` after
/// [`SHAKE_DURATION_MS`]. The renderer owns the timing; this type only
/// carries the transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputStatus {
    #[default]
    Unvalidated,
    Valid,
    OutOfRange,
    ShakeTransient,
}

impl InputStatus {
    /// Resolve the transient shake state
    pub fn settle(self) -> InputStatus {
        match self {
            InputStatus::ShakeTransient => InputStatus::OutOfRange,
            other => other,
        }
    }
}
