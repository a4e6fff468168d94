//! Auto Refresh
//!
//! Repeating timer that re-runs the refresh cycle. The controller's
//! in-flight latch means a slow cycle is skipped rather than overlapped,
//! and its generation token discards stale completions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use super::controller::{DashboardController, RefreshOutcome};
use super::view::{DashboardView, StatusMessage};

/// Dismiss timer for start/stop notices, in ms
const DISMISS_NOTICE_MS: u64 = 2_000;

/// Configuration for the auto-refresh loop
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

/// Drives periodic refresh cycles against a controller
pub struct AutoRefresh {
    controller: Arc<DashboardController>,
    config: RefreshConfig,
    running: Arc<RwLock<bool>>,
}

impl AutoRefresh {
    /// Create an auto-refresh driver
    pub fn new(controller: Arc<DashboardController>, config: RefreshConfig) -> Self {
        Self {
            controller,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the background task. Each tick runs one refresh cycle and hands
    /// the updated snapshot to the view.
    ///
    /// Returns the status message to show alongside the spawned task handle.
    pub fn start(
        self: Arc<Self>,
        view: Arc<dyn DashboardView>,
    ) -> (StatusMessage, tokio::task::JoinHandle<()>) {
        let interval_secs = self.config.interval_secs;
        let status = StatusMessage::success(
            format!("Auto-refresh started (every {}s)", interval_secs),
            DISMISS_NOTICE_MS,
        );

        let handle = tokio::spawn(async move {
            *self.running.write().await = true;

            let mut ticker =
                tokio::time::interval(Duration::from_secs(interval_secs));
            // The first tick fires immediately; the caller already rendered
            // an initial refresh, so skip it.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if !*self.running.read().await {
                    break;
                }

                match self.controller.refresh().await {
                    RefreshOutcome::Completed(report) => {
                        tracing::info!(
                            cycle_id = %report.cycle_id,
                            succeeded = report.succeeded,
                            total = report.total,
                            stale = report.stale,
                            "scheduled refresh finished"
                        );
                        if !report.stale {
                            view.render(&self.controller.snapshot().await);
                        }
                    }
                    RefreshOutcome::AlreadyRunning => {
                        tracing::warn!("scheduled refresh skipped, previous cycle still running");
                    }
                    RefreshOutcome::Blocked(status) => {
                        tracing::warn!("scheduled refresh blocked by validation");
                        view.render_status(&status);
                    }
                }
            }

            tracing::info!("auto-refresh stopped");
        });

        (status, handle)
    }

    /// Stop the loop after the current tick. Idempotent.
    pub async fn stop(&self) -> Option<StatusMessage> {
        let mut running = self.running.write().await;
        if *running {
            *running = false;
            Some(StatusMessage::success(
                "Auto-refresh stopped",
                DISMISS_NOTICE_MS,
            ))
        } else {
            None
        }
    }

    /// Whether the loop is currently active
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::super::controller::DashboardSettings;
    use super::*;
    use crate::model::{ChannelDetail, ChannelSummary};
    use crate::proxy::{
        AnalyticsBody, EventBackend, EventQuery, NormalizedError, SummaryBody,
    };
    use crate::validate::AllowedDateRange;
    use async_trait::async_trait;

    struct NullBackend;

    #[async_trait]
    impl EventBackend for NullBackend {
        async fn date_range(&self) -> Result<AllowedDateRange, NormalizedError> {
            Ok(AllowedDateRange::parse("2025-07-26", "2025-09-24").unwrap())
        }

        async fn events_summary(
            &self,
            _query: &EventQuery,
        ) -> Result<SummaryBody, NormalizedError> {
            Ok(SummaryBody::default())
        }

        async fn events_analytics(
            &self,
            _query: &EventQuery,
        ) -> Result<AnalyticsBody, NormalizedError> {
            Ok(AnalyticsBody::default())
        }

        async fn channels(
            &self,
            _query: &EventQuery,
        ) -> Result<Vec<ChannelSummary>, NormalizedError> {
            Ok(Vec::new())
        }

        async fn channel_detail(
            &self,
            channel_id: &str,
            _query: &EventQuery,
        ) -> Result<ChannelDetail, NormalizedError> {
            Ok(ChannelDetail {
                channel_id: channel_id.to_string(),
                ..Default::default()
            })
        }
    }

    fn controller() -> Arc<DashboardController> {
        Arc::new(DashboardController::new(
            Arc::new(NullBackend),
            DashboardSettings {
                fallback_range: AllowedDateRange::parse("2025-07-26", "2025-09-24").unwrap(),
            },
        ))
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(RefreshConfig::default().interval_secs, 30);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let auto = AutoRefresh::new(controller(), RefreshConfig::default());

        assert!(!auto.is_running().await);
        assert!(auto.stop().await.is_none());

        *auto.running.write().await = true;
        assert!(auto.stop().await.is_some());
        assert!(auto.stop().await.is_none());
    }
}
