//! Channel Model
//!
//! A channel is a monitored camera/sensor feed identified by a numeric id,
//! carrying aggregate event counts and optional image attachments.

use serde::{Deserialize, Serialize};

use super::severity::EventCounts;

/// Operational status of a channel feed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelStatus {
    #[serde(rename = "ON")]
    On,
    #[default]
    #[serde(rename = "OFF")]
    Off,
}

impl ChannelStatus {
    pub fn is_on(&self) -> bool {
        matches!(self, ChannelStatus::On)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelStatus::On => "ON",
            ChannelStatus::Off => "OFF",
        }
    }
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-event-type count within a channel or period
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl TypeCount {
    /// Best available display label: label, then type name, then type code
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.type_name.as_deref())
            .or(self.type_code.as_deref())
            .unwrap_or("unknown")
    }
}

/// Channel entry in the grid listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelSummary {
    pub channel_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub status: ChannelStatus,
    #[serde(default)]
    pub by_type: Vec<TypeCount>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// Reported period bounds inside a channel detail payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRange {
    pub start: String,
    pub end: String,
}

/// Full channel detail for the modal view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelDetail {
    pub channel_id: String,
    #[serde(default)]
    pub counts: EventCounts,
    #[serde(default)]
    pub by_type: Vec<TypeCount>,
    #[serde(default)]
    pub status: ChannelStatus,
    #[serde(default)]
    pub fov_location_name: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub emap_image_url: Option<String>,
    #[serde(default)]
    pub fov_thumbnail_url: Option<String>,
    #[serde(default)]
    pub range: Option<ReportRange>,
}

/// Display code for a channel id, zero-padded to two digits (`CH07`)
pub fn channel_code(channel_id: &str) -> String {
    match channel_id.parse::<u32>() {
        Ok(n) => format!("CH{:02}", n),
        Err(_) => format!("CH{}", channel_id),
    }
}

/// Sort channels in place by numeric channel id
pub fn sort_by_channel_id(channels: &mut [ChannelSummary]) {
    channels.sort_by_key(|c| c.channel_id.parse::<i64>().unwrap_or(0));
}

/// Fleet-wide status rollup across all listed channels
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ChannelFleetStats {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    /// Share of channels reporting ON, rounded to one decimal
    pub online_rate: f64,
}

impl ChannelFleetStats {
    pub fn from_channels(channels: &[ChannelSummary]) -> Self {
        let total = channels.len();
        let online = channels.iter().filter(|c| c.status.is_on()).count();
        let online_rate = if total > 0 {
            (online as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };
        Self {
            total,
            online,
            offline: total - online,
            online_rate,
        }
    }
}

/// Most active channels by event count, descending
pub fn top_active(channels: &[ChannelSummary], limit: usize) -> Vec<ChannelSummary> {
    let mut sorted: Vec<ChannelSummary> = channels.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted.truncate(limit);
    sorted
}

/// Period-over-period change in total event volume
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct EventTrend {
    pub delta: i64,
    /// Change relative to the previous period, rounded to two decimals
    pub percentage: f64,
}

impl EventTrend {
    pub fn between(current: &EventCounts, previous: &EventCounts) -> Self {
        let current_total = current.total as i64;
        let previous_total = previous.total as i64;

        if previous_total == 0 {
            return Self {
                delta: current_total,
                percentage: if current_total > 0 { 100.0 } else { 0.0 },
            };
        }

        let delta = current_total - previous_total;
        let percentage =
            ((delta as f64 / previous_total as f64) * 100.0 * 100.0).round() / 100.0;
        Self { delta, percentage }
    }
}
