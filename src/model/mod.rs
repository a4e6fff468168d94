//! Domain Model
//!
//! Core types shared across the dashboard: severity filters, event counts,
//! and channel summaries. These are plain data types with no I/O.

mod channel;
mod severity;

pub use channel::{
    channel_code, sort_by_channel_id, top_active, ChannelDetail, ChannelFleetStats,
    ChannelStatus, ChannelSummary, EventTrend, ReportRange, TypeCount,
};
pub use severity::{EventCounts, Severity, SeverityStyle};

use serde::{Deserialize, Serialize};

/// One slice of the event-type distribution chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeSlice {
    pub label: String,
    pub count: u64,
}

/// One bucket of the hourly event histogram
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: u64,
}
