//! Dashboard Controller
//!
//! Owns the application state (active severity filter, allowed date range,
//! selected period, channel selection) and orchestrates the refresh cycle:
//! client-side validation gates the fetch, the three analytics endpoints are
//! called in sequence, every failure is normalized, and partial success is
//! reported rather than rolled back.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::view::{
    report_title, ChannelDetailView, ChannelGridView, DashboardSnapshot, HourlyChart, StatCards,
    StatusMessage, TypeChart,
};
use crate::model::Severity;
use crate::proxy::{ChannelSelector, EventBackend, EventQuery, NormalizedError};
use crate::validate::{
    parse_date, reconcile_pair, AllowedDateRange, DateField, ValidationResult, DATE_FORMAT,
};

/// Dismiss timers for the status line, in ms
const DISMISS_SUCCESS_MS: u64 = 3_000;
const DISMISS_NOTICE_MS: u64 = 3_000;
const DISMISS_PARTIAL_MS: u64 = 5_000;
const DISMISS_ERROR_MS: u64 = 7_000;
const DISMISS_TOTAL_FAILURE_MS: u64 = 10_000;

/// Names of the endpoints a refresh cycle walks, in call order
const ENDPOINT_NAMES: [&str; 3] = ["event summary", "event analytics", "channel statistics"];

/// Controller settings carried from configuration
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Range used when `/api/date-range` cannot be fetched
    pub fallback_range: AllowedDateRange,
}

/// Mutable application state, owned by the controller.
///
/// All shared mutable state lives here and is written only through the
/// controller's methods; the validator and normalizer take their inputs by
/// parameter instead of reading ambient scope.
#[derive(Debug, Default)]
struct AppState {
    severity: Severity,
    channel: ChannelSelector,
    start_input: Option<String>,
    end_input: Option<String>,
    allowed_range: Option<AllowedDateRange>,
    snapshot: DashboardSnapshot,
    /// Bumped whenever a new cycle starts or the selection changes; a cycle
    /// whose generation is stale must not commit results
    generation: u64,
    /// In-flight latch: at most one refresh cycle runs at a time
    in_flight: bool,
}

/// One endpoint's failure within a refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointFailure {
    pub endpoint: &'static str,
    pub error: NormalizedError,
}

/// Result of a completed refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub cycle_id: Uuid,
    pub succeeded: usize,
    pub total: usize,
    pub failures: Vec<EndpointFailure>,
    pub status: StatusMessage,
    /// True when a newer cycle or selection change overtook this one and its
    /// remaining results were discarded
    pub stale: bool,
}

/// Outcome of a refresh request
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The cycle ran (possibly partially) and produced a report
    Completed(RefreshReport),
    /// Client-side validation blocked the fetch
    Blocked(StatusMessage),
    /// A cycle is already in flight; nothing was started
    AlreadyRunning,
}

/// Top-level dashboard controller
pub struct DashboardController {
    backend: Arc<dyn EventBackend>,
    state: RwLock<AppState>,
    settings: DashboardSettings,
}

impl DashboardController {
    /// Create a controller over the given backend
    pub fn new(backend: Arc<dyn EventBackend>, settings: DashboardSettings) -> Self {
        let mut state = AppState::default();
        state.snapshot.report_title = report_title(None, None, state.severity);
        Self {
            backend,
            state: RwLock::new(state),
            settings,
        }
    }

    /// Fetch the allowed date range and seed the date inputs.
    ///
    /// On failure the configured fallback range takes over and the failure is
    /// surfaced as a status message; the dashboard stays usable either way.
    /// Inputs already set but out of the fetched range are clamped, each with
    /// its own notice.
    pub async fn bootstrap(&self) -> Vec<StatusMessage> {
        let mut notices = Vec::new();

        let range = match self.backend.date_range().await {
            Ok(range) => {
                tracing::info!(
                    start = %range.start.format(DATE_FORMAT),
                    end = %range.end.format(DATE_FORMAT),
                    "allowed date range loaded"
                );
                range
            }
            Err(e) => {
                tracing::warn!(error = %e, "date range fetch failed, using fallback");
                notices.push(StatusMessage::error(
                    "Could not load the allowed date range. Using defaults.",
                    DISMISS_NOTICE_MS,
                ));
                self.settings.fallback_range
            }
        };

        let mut state = self.state.write().await;
        let state = &mut *state;
        state.allowed_range = Some(range);

        for (input, default_bound, field_name) in [
            (&mut state.start_input, range.start, "start"),
            (&mut state.end_input, range.end, "end"),
        ] {
            match input {
                Some(value) => {
                    let outcome = range.clamp_and_style(value);
                    if !outcome.in_range && outcome.adjusted_value != *value {
                        notices.push(StatusMessage::error(
                            format!(
                                "The {} date was outside the allowed range and was adjusted to {}",
                                field_name, outcome.adjusted_value
                            ),
                            DISMISS_NOTICE_MS,
                        ));
                        *value = outcome.adjusted_value;
                    }
                }
                // Unset inputs default to the full allowed period
                None => {
                    *input = Some(default_bound.format(DATE_FORMAT).to_string());
                }
            }
        }

        state.snapshot.report_title = report_title(
            state.start_input.as_deref(),
            state.end_input.as_deref(),
            state.severity,
        );

        notices
    }

    /// Currently allowed date range, if known
    pub async fn allowed_range(&self) -> Option<AllowedDateRange> {
        self.state.read().await.allowed_range
    }

    /// Current snapshot for rendering
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Select the severity filter. Invalidates any in-flight cycle.
    pub async fn set_severity(&self, severity: Severity) {
        let mut state = self.state.write().await;
        state.severity = severity;
        state.generation += 1;
    }

    /// Select which channels to query. Invalidates any in-flight cycle.
    pub async fn set_channel(&self, channel: ChannelSelector) {
        let mut state = self.state.write().await;
        state.channel = channel;
        state.generation += 1;
    }

    /// Apply a live edit to one of the linked date inputs.
    ///
    /// Out-of-range values are clamped to the nearest bound, and when the
    /// pair inverts, the other field is pulled along (the edited field wins).
    /// Returns the notices to show. Invalidates any in-flight cycle.
    pub async fn edit_date(&self, field: DateField, value: &str) -> Vec<StatusMessage> {
        let mut notices = Vec::new();
        let mut state = self.state.write().await;
        state.generation += 1;

        let mut accepted = value.to_string();
        if let Some(range) = state.allowed_range {
            let outcome = range.clamp_and_style(value);
            if !outcome.in_range && outcome.adjusted_value != accepted {
                notices.push(StatusMessage::error(
                    format!(
                        "Allowed dates are {}. Adjusted to {}.",
                        range.bounds_label(),
                        outcome.adjusted_value
                    ),
                    DISMISS_NOTICE_MS,
                ));
                accepted = outcome.adjusted_value;
            }
        }

        match field {
            DateField::Start => state.start_input = Some(accepted),
            DateField::End => state.end_input = Some(accepted),
        }

        // Keep the pair ordered; the field just edited wins.
        if let (Some(start), Some(end)) = (
            state.start_input.as_deref().and_then(parse_date),
            state.end_input.as_deref().and_then(parse_date),
        ) {
            let pair = reconcile_pair(field, start, end);
            if let Some(adjusted) = pair.adjusted {
                let (message, target, new_value) = match adjusted {
                    DateField::Start => (
                        "Start date cannot be after the end date. Matched it to the end date.",
                        &mut state.start_input,
                        pair.start,
                    ),
                    DateField::End => (
                        "End date cannot be before the start date. Matched it to the start date.",
                        &mut state.end_input,
                        pair.end,
                    ),
                };
                *target = Some(new_value.format(DATE_FORMAT).to_string());
                if notices.is_empty() {
                    notices.push(StatusMessage::error(message, DISMISS_NOTICE_MS));
                }
            }
        }

        state.snapshot.report_title = report_title(
            state.start_input.as_deref(),
            state.end_input.as_deref(),
            state.severity,
        );

        notices
    }

    /// Validate the current inputs without fetching
    pub async fn validate_current(&self) -> ValidationResult {
        let state = self.state.read().await;
        let range = state.allowed_range.unwrap_or(self.settings.fallback_range);
        range.validate_submission(state.start_input.as_deref(), state.end_input.as_deref())
    }

    /// Run one refresh cycle: summary, then analytics, then channels.
    ///
    /// Endpoints are awaited in sequence and each successful payload is
    /// applied before the next call, so earlier sections are never rolled
    /// back by a later failure. A failure while applying a payload is caught
    /// and reported as that endpoint's failure instead of aborting the cycle.
    pub async fn refresh(&self) -> RefreshOutcome {
        let cycle_id = Uuid::new_v4();

        // Gate + guard under one lock acquisition.
        let (query, cycle_gen) = {
            let mut state = self.state.write().await;
            if state.in_flight {
                tracing::debug!(%cycle_id, "refresh skipped, cycle already in flight");
                return RefreshOutcome::AlreadyRunning;
            }

            let range = state.allowed_range.unwrap_or(self.settings.fallback_range);
            let validation =
                range.validate_submission(state.start_input.as_deref(), state.end_input.as_deref());
            if !validation.valid {
                tracing::debug!(%cycle_id, errors = validation.errors.len(), "refresh blocked by validation");
                let status = StatusMessage::error(validation.message, DISMISS_ERROR_MS);
                state.snapshot.status = Some(status.clone());
                return RefreshOutcome::Blocked(status);
            }

            state.in_flight = true;
            state.generation += 1;
            state.snapshot.report_title = report_title(
                state.start_input.as_deref(),
                state.end_input.as_deref(),
                state.severity,
            );
            state.snapshot.status = Some(StatusMessage::loading("Loading data..."));

            let query = EventQuery {
                start: state.start_input.clone().unwrap_or_default(),
                end: state.end_input.clone().unwrap_or_default(),
                severity: state.severity,
                channel: state.channel.clone(),
            };
            (query, state.generation)
        };

        tracing::info!(%cycle_id, start = %query.start, end = %query.end, severity = %query.severity, "refresh cycle started");

        let severity = query.severity;
        let mut succeeded = 0usize;
        let mut failures: Vec<EndpointFailure> = Vec::new();
        let mut stale = false;

        // 1. Event summary
        let step = self.backend.events_summary(&query).await.map(|body| {
            move |snapshot: &mut DashboardSnapshot| {
                snapshot.stats = Some(StatCards::from_counts(&body.counts, severity));
            }
        });
        self.apply_step(cycle_id, cycle_gen, ENDPOINT_NAMES[0], step, &mut succeeded, &mut failures, &mut stale)
            .await;

        // 2. Event analytics
        if !stale {
            let step = self.backend.events_analytics(&query).await.map(|body| {
                move |snapshot: &mut DashboardSnapshot| {
                    snapshot.type_chart = Some(TypeChart::build(&body.type_pie, severity));
                    snapshot.hourly_chart = Some(HourlyChart::build(&body.hourly_bar, severity));
                }
            });
            self.apply_step(cycle_id, cycle_gen, ENDPOINT_NAMES[1], step, &mut succeeded, &mut failures, &mut stale)
                .await;
        }

        // 3. Channel statistics
        if !stale {
            let step = self.backend.channels(&query).await.map(|channels| {
                move |snapshot: &mut DashboardSnapshot| {
                    snapshot.channel_grid = Some(ChannelGridView::build(&channels, severity));
                }
            });
            self.apply_step(cycle_id, cycle_gen, ENDPOINT_NAMES[2], step, &mut succeeded, &mut failures, &mut stale)
                .await;
        }

        let total = ENDPOINT_NAMES.len();
        let status = if stale {
            StatusMessage::warning("Refresh superseded by a newer request", DISMISS_NOTICE_MS)
        } else if succeeded == total {
            StatusMessage::success(
                format!("{} data loaded", severity.label()),
                DISMISS_SUCCESS_MS,
            )
        } else if succeeded > 0 {
            StatusMessage::warning(
                format!("Partial data load: {} of {} succeeded", succeeded, total),
                DISMISS_PARTIAL_MS,
            )
        } else {
            let details: Vec<String> = failures
                .iter()
                .map(|f| format!("{}: {}", f.endpoint, f.error.user_message))
                .collect();
            StatusMessage::error(
                format!("All data loads failed:\n{}", details.join("\n")),
                DISMISS_TOTAL_FAILURE_MS,
            )
        };

        {
            let mut state = self.state.write().await;
            state.in_flight = false;
            // A stale cycle must not clobber the status either.
            if !stale || state.generation == cycle_gen {
                state.snapshot.status = Some(status.clone());
            }
        }

        tracing::info!(%cycle_id, succeeded, total, stale, "refresh cycle finished");

        RefreshOutcome::Completed(RefreshReport {
            cycle_id,
            succeeded,
            total,
            failures,
            status,
            stale,
        })
    }

    /// Commit one endpoint's outcome into the snapshot, unless the cycle has
    /// gone stale in the meantime
    async fn apply_step<F>(
        &self,
        cycle_id: Uuid,
        cycle_gen: u64,
        endpoint: &'static str,
        step: Result<F, NormalizedError>,
        succeeded: &mut usize,
        failures: &mut Vec<EndpointFailure>,
        stale: &mut bool,
    ) where
        F: FnOnce(&mut DashboardSnapshot),
    {
        let mut state = self.state.write().await;
        if state.generation != cycle_gen {
            tracing::debug!(%cycle_id, endpoint, "discarding stale result");
            *stale = true;
            return;
        }

        match step {
            Ok(apply) => {
                apply(&mut state.snapshot);
                *succeeded += 1;
            }
            Err(error) => {
                tracing::warn!(%cycle_id, endpoint, category = %error.category, error = %error, "endpoint failed");
                failures.push(EndpointFailure { endpoint, error });
            }
        }
    }

    /// Fetch and shape the detail view for one channel.
    ///
    /// The same client-side validation that gates a refresh gates the detail
    /// fetch; the caller gets a normalized error either way.
    pub async fn channel_detail(
        &self,
        channel_id: &str,
    ) -> Result<ChannelDetailView, NormalizedError> {
        let (query, severity) = {
            let state = self.state.read().await;
            let range = state.allowed_range.unwrap_or(self.settings.fallback_range);
            let validation = range
                .validate_submission(state.start_input.as_deref(), state.end_input.as_deref());
            if !validation.valid {
                return Err(NormalizedError::client_validation(validation.message));
            }

            let query = EventQuery {
                start: state.start_input.clone().unwrap_or_default(),
                end: state.end_input.clone().unwrap_or_default(),
                severity: state.severity,
                channel: ChannelSelector::One(channel_id.to_string()),
            };
            (query, state.severity)
        };

        let detail = self.backend.channel_detail(channel_id, &query).await?;
        Ok(ChannelDetailView::build(&detail, severity))
    }

    /// Drop the current status message (auto-dismiss timer fired)
    pub async fn clear_status(&self) {
        self.state.write().await.snapshot.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChannelDetail, ChannelSummary, EventCounts};
    use crate::proxy::{
        AnalyticsBody, ErrorCategory, SummaryBody, NETWORK_SENTINEL,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scriptable backend stub: per-endpoint failure switches and a settable
    /// response delay for overlap tests
    #[derive(Default)]
    struct StubBackend {
        fail_date_range: bool,
        fail_summary: bool,
        fail_analytics: bool,
        fail_channels: bool,
        delay_ms: u64,
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn server_error() -> NormalizedError {
            crate::proxy::normalize(500, &json!({"error": "boom"}))
        }

        async fn pause(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
        }
    }

    #[async_trait]
    impl EventBackend for StubBackend {
        async fn date_range(&self) -> Result<AllowedDateRange, NormalizedError> {
            self.pause().await;
            if self.fail_date_range {
                return Err(NormalizedError::network("/api/date-range", "refused".into()));
            }
            Ok(AllowedDateRange::parse("2025-07-26", "2025-09-24").unwrap())
        }

        async fn events_summary(
            &self,
            _query: &EventQuery,
        ) -> Result<SummaryBody, NormalizedError> {
            self.pause().await;
            if self.fail_summary {
                return Err(Self::server_error());
            }
            Ok(SummaryBody {
                counts: EventCounts {
                    total: 10,
                    critical: 1,
                    warn: 4,
                    info: 5,
                },
                range: None,
            })
        }

        async fn events_analytics(
            &self,
            _query: &EventQuery,
        ) -> Result<AnalyticsBody, NormalizedError> {
            self.pause().await;
            if self.fail_analytics {
                return Err(Self::server_error());
            }
            Ok(AnalyticsBody::default())
        }

        async fn channels(
            &self,
            _query: &EventQuery,
        ) -> Result<Vec<ChannelSummary>, NormalizedError> {
            self.pause().await;
            if self.fail_channels {
                return Err(Self::server_error());
            }
            Ok(vec![ChannelSummary {
                channel_id: "1".to_string(),
                count: 10,
                ..Default::default()
            }])
        }

        async fn channel_detail(
            &self,
            channel_id: &str,
            _query: &EventQuery,
        ) -> Result<ChannelDetail, NormalizedError> {
            self.pause().await;
            Ok(ChannelDetail {
                channel_id: channel_id.to_string(),
                ..Default::default()
            })
        }
    }

    fn settings() -> DashboardSettings {
        DashboardSettings {
            fallback_range: AllowedDateRange::parse("2025-07-26", "2025-09-24").unwrap(),
        }
    }

    fn controller(stub: StubBackend) -> DashboardController {
        DashboardController::new(Arc::new(stub), settings())
    }

    fn controller_with(stub: Arc<StubBackend>) -> DashboardController {
        DashboardController::new(stub, settings())
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_inputs_from_range() {
        let ctl = controller(StubBackend::default());
        let notices = ctl.bootstrap().await;
        assert!(notices.is_empty());

        let validation = ctl.validate_current().await;
        assert!(validation.valid);
    }

    #[tokio::test]
    async fn test_bootstrap_falls_back_on_failure() {
        let ctl = controller(StubBackend {
            fail_date_range: true,
            ..Default::default()
        });
        let notices = ctl.bootstrap().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, super::super::view::StatusKind::Error);
        assert_eq!(
            ctl.allowed_range().await,
            Some(settings().fallback_range)
        );
    }

    #[tokio::test]
    async fn test_refresh_full_success() {
        let ctl = controller(StubBackend::default());
        ctl.bootstrap().await;

        let RefreshOutcome::Completed(report) = ctl.refresh().await else {
            panic!("expected a completed cycle");
        };
        assert_eq!(report.succeeded, 3);
        assert_eq!(report.total, 3);
        assert!(report.failures.is_empty());
        assert!(!report.stale);

        let snapshot = ctl.snapshot().await;
        assert_eq!(snapshot.stats.unwrap().headline, 10);
        assert!(snapshot.type_chart.is_some());
        assert!(snapshot.channel_grid.is_some());
    }

    #[tokio::test]
    async fn test_refresh_partial_failure_keeps_later_sections() {
        let ctl = controller(StubBackend {
            fail_summary: true,
            ..Default::default()
        });
        ctl.bootstrap().await;

        let RefreshOutcome::Completed(report) = ctl.refresh().await else {
            panic!("expected a completed cycle");
        };
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].endpoint, "event summary");
        assert!(report.status.text.contains("2 of 3"));

        // The failed endpoint left its section empty; later ones still landed.
        let snapshot = ctl.snapshot().await;
        assert!(snapshot.stats.is_none());
        assert!(snapshot.type_chart.is_some());
        assert!(snapshot.channel_grid.is_some());
    }

    #[tokio::test]
    async fn test_refresh_earlier_success_survives_later_failure() {
        let ctl = controller(StubBackend {
            fail_channels: true,
            ..Default::default()
        });
        ctl.bootstrap().await;

        ctl.refresh().await;
        let snapshot = ctl.snapshot().await;
        assert!(snapshot.stats.is_some());
        assert!(snapshot.channel_grid.is_none());
    }

    #[tokio::test]
    async fn test_refresh_total_failure_reports_every_endpoint() {
        let ctl = controller(StubBackend {
            fail_summary: true,
            fail_analytics: true,
            fail_channels: true,
            ..Default::default()
        });
        ctl.bootstrap().await;

        let RefreshOutcome::Completed(report) = ctl.refresh().await else {
            panic!("expected a completed cycle");
        };
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failures.len(), 3);
        assert!(report.status.text.contains("All data loads failed"));
        assert_eq!(report.failures[0].error.category, ErrorCategory::Server);
    }

    #[tokio::test]
    async fn test_refresh_blocked_by_validation() {
        let stub = Arc::new(StubBackend::default());
        let ctl = controller_with(stub.clone());
        ctl.bootstrap().await;
        // Force an inverted pair without going through edit_date's
        // reconciliation: end before start must block the fetch.
        {
            let mut state = ctl.state.write().await;
            state.start_input = Some("2025-08-10".to_string());
            state.end_input = Some("2025-08-01".to_string());
        }

        let outcome = ctl.refresh().await;
        let RefreshOutcome::Blocked(status) = outcome else {
            panic!("expected validation to block the cycle");
        };
        assert!(status.text.contains("must not precede"));
        // Only the bootstrap date-range call reached the backend.
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_in_flight_guard() {
        let ctl = Arc::new(controller(StubBackend {
            delay_ms: 50,
            ..Default::default()
        }));
        ctl.bootstrap().await;

        let first = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.refresh().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(ctl.refresh().await, RefreshOutcome::AlreadyRunning);

        let RefreshOutcome::Completed(report) = first.await.unwrap() else {
            panic!("expected the first cycle to complete");
        };
        assert_eq!(report.succeeded, 3);
    }

    #[tokio::test]
    async fn test_stale_cycle_discards_results() {
        let ctl = Arc::new(controller(StubBackend {
            delay_ms: 30,
            ..Default::default()
        }));
        ctl.bootstrap().await;

        let cycle = {
            let ctl = ctl.clone();
            tokio::spawn(async move { ctl.refresh().await })
        };
        // Change the filter while the summary call is still sleeping.
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        ctl.set_severity(Severity::Critical).await;

        let RefreshOutcome::Completed(report) = cycle.await.unwrap() else {
            panic!("expected a completed cycle");
        };
        assert!(report.stale);
        assert_eq!(report.succeeded, 0);

        let snapshot = ctl.snapshot().await;
        assert!(snapshot.stats.is_none(), "stale results must not commit");
    }

    #[tokio::test]
    async fn test_edit_date_clamps_and_notifies() {
        let ctl = controller(StubBackend::default());
        ctl.bootstrap().await;

        let notices = ctl.edit_date(DateField::Start, "2025-01-01").await;
        assert_eq!(notices.len(), 1);
        assert!(notices[0].text.contains("2025-07-26 ~ 2025-09-24"));

        let validation = ctl.validate_current().await;
        assert!(validation.valid);
    }

    #[tokio::test]
    async fn test_edit_date_edited_field_wins() {
        let ctl = controller(StubBackend::default());
        ctl.bootstrap().await;

        ctl.edit_date(DateField::Start, "2025-08-10").await;
        ctl.edit_date(DateField::End, "2025-08-20").await;
        // Pull start past end: end must follow.
        let notices = ctl.edit_date(DateField::Start, "2025-09-01").await;
        assert_eq!(notices.len(), 1);

        let state = ctl.state.read().await;
        assert_eq!(state.start_input.as_deref(), Some("2025-09-01"));
        assert_eq!(state.end_input.as_deref(), Some("2025-09-01"));
    }

    #[tokio::test]
    async fn test_channel_detail_view() {
        let ctl = controller(StubBackend::default());
        ctl.bootstrap().await;

        let view = ctl.channel_detail("7").await.unwrap();
        assert_eq!(view.code, "CH07");
    }

    #[tokio::test]
    async fn test_channel_detail_blocked_by_validation() {
        let ctl = controller(StubBackend::default());
        // No bootstrap: inputs are unset, so validation fails client-side.
        let err = ctl.channel_detail("7").await.unwrap_err();
        assert_eq!(err.category, ErrorCategory::Validation);
        assert_eq!(err.status_code, NETWORK_SENTINEL);
    }
}
