//! # Vigil
//!
//! Event Monitoring Dashboard Controller - a client-side controller that
//! fetches event and channel analytics from a backend proxy, validates date
//! ranges, and builds summary, chart, and channel views.
//!
//! ## Features
//!
//! - **Uniform failures**: every backend error is normalized into one shape
//!   at the HTTP boundary before any view is touched
//! - **Client-side validation**: submitted date ranges are checked against
//!   the server-declared bounds before a single request goes out
//! - **Sequential refresh**: summary, analytics, and channel data load in
//!   order, and a later failure never rolls back earlier sections
//! - **Overlap-safe polling**: an in-flight latch and generation token keep
//!   auto-refresh cycles from racing each other
//! - **Replaceable rendering**: the controller produces pure view-model
//!   data; a terminal renderer ships in-tree
//!
//! ## Modules
//!
//! - [`model`]: severity filters, event counts, channel types
//! - [`proxy`]: HTTP client, DTOs, and the error normalizer
//! - [`validate`]: allowed-range and date-pair validation
//! - [`dashboard`]: controller, auto-refresh, and view models
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vigil::{Config, DashboardController, ProxyClient, TextView};
//! use vigil::dashboard::DashboardView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(ProxyClient::new(config.proxy_config()));
//!     let controller = DashboardController::new(backend, config.dashboard_settings()?);
//!
//!     for notice in controller.bootstrap().await {
//!         println!("{}", notice.text);
//!     }
//!
//!     controller.refresh().await;
//!     TextView::new().render(&controller.snapshot().await);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod model;
pub mod proxy;
pub mod validate;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, LoggingConfig};

pub use model::{
    channel_code, ChannelDetail, ChannelFleetStats, ChannelStatus, ChannelSummary, EventCounts,
    EventTrend, Severity, SeverityStyle,
};

pub use proxy::{
    normalize, ApiInfo, ChannelSelector, ErrorCategory, EventBackend, EventQuery,
    NormalizedError, ProxyClient, ProxyConfig, NETWORK_SENTINEL,
};

pub use validate::{
    parse_date, reconcile_pair, AllowedDateRange, ClampOutcome, DateField, DateRangeError,
    InputStatus, ValidationResult, DATE_FORMAT,
};

pub use dashboard::{
    AutoRefresh, DashboardController, DashboardSettings, DashboardSnapshot, RefreshConfig,
    RefreshOutcome, RefreshReport, StatusKind, StatusMessage, TextView,
};
