//! Dashboard Orchestration
//!
//! The controller that owns application state and runs refresh cycles, the
//! auto-refresh timer, and the view-model layer with its replaceable
//! rendering seam.

mod controller;
mod refresh;
mod text;
mod view;

pub use controller::{
    DashboardController, DashboardSettings, EndpointFailure, RefreshOutcome, RefreshReport,
};
pub use refresh::{AutoRefresh, RefreshConfig};
pub use text::TextView;
pub use view::{
    report_title, ChannelCard, ChannelDetailView, ChannelGridView, DashboardSnapshot,
    DashboardView, DetailRow, HourlyChart, ImagePanel, StatCards, StatusKind, StatusMessage,
    TypeChart, TypeShare, DEFAULT_REPORT_TITLE,
};
