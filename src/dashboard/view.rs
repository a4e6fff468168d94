//! View Models
//!
//! Pure data derived from fetched payloads, ready for a renderer. Chart
//! drawing stays with the consumer: these types carry the series, titles,
//! and shares, nothing about presentation.

use serde::Serialize;

use crate::model::{
    channel_code, sort_by_channel_id, ChannelDetail, ChannelFleetStats, ChannelStatus,
    ChannelSummary, EventCounts, HourlyCount, Severity, TypeSlice,
};
use crate::validate::parse_date;

/// Title shown when no period is selected
pub const DEFAULT_REPORT_TITLE: &str = "Real-time event monitoring and channel management";

/// Kind of a transient status message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Warning,
    Error,
}

/// A user-visible status line with a bounded auto-dismiss timer.
///
/// Every failure in the system terminates in one of these; nothing is fatal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    /// How long the message stays up, `None` for sticky loading states
    pub dismiss_after_ms: Option<u64>,
}

impl StatusMessage {
    pub fn loading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Loading,
            dismiss_after_ms: None,
        }
    }

    pub fn success(text: impl Into<String>, dismiss_after_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
            dismiss_after_ms: Some(dismiss_after_ms),
        }
    }

    pub fn warning(text: impl Into<String>, dismiss_after_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Warning,
            dismiss_after_ms: Some(dismiss_after_ms),
        }
    }

    pub fn error(text: impl Into<String>, dismiss_after_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
            dismiss_after_ms: Some(dismiss_after_ms),
        }
    }
}

/// Summary counter cards with the active filter applied
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatCards {
    /// Headline figure: the selected bucket under a non-`All` filter
    pub headline: u64,
    pub critical: u64,
    pub warn: u64,
    pub info: u64,
    pub active_filter: Severity,
}

impl StatCards {
    pub fn from_counts(counts: &EventCounts, severity: Severity) -> Self {
        Self {
            headline: counts.headline(severity),
            critical: counts.critical,
            warn: counts.warn,
            info: counts.info,
            active_filter: severity,
        }
    }
}

/// One share of the event-type distribution
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeShare {
    pub label: String,
    pub count: u64,
    /// Share of the total, rounded to one decimal
    pub percentage: f64,
}

/// Event-type distribution chart data
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeChart {
    pub title: String,
    pub shares: Vec<TypeShare>,
}

impl TypeChart {
    pub fn build(slices: &[TypeSlice], severity: Severity) -> Self {
        let total: u64 = slices.iter().map(|s| s.count).sum();
        let shares = slices
            .iter()
            .map(|s| TypeShare {
                label: s.label.clone(),
                count: s.count,
                percentage: if total > 0 {
                    (s.count as f64 * 1000.0 / total as f64).round() / 10.0
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            title: format!("Event type analysis - {}", severity.label()),
            shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Hourly event histogram, densified to all 24 hours
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyChart {
    pub title: String,
    /// Count per hour of day, index 0..24; missing hours are zero
    pub counts: Vec<u64>,
    /// Whether the source series had any buckets at all
    pub has_data: bool,
}

impl HourlyChart {
    pub fn build(buckets: &[HourlyCount], severity: Severity) -> Self {
        let mut counts = vec![0u64; 24];
        for bucket in buckets {
            if let Some(slot) = counts.get_mut(bucket.hour as usize) {
                *slot = bucket.count;
            }
        }

        Self {
            title: format!("Hourly event analysis - {}", severity.label()),
            counts,
            has_data: !buckets.is_empty(),
        }
    }
}

/// One card in the channel grid
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChannelCard {
    pub channel_id: String,
    /// Display code, `CH##`
    pub code: String,
    pub count: u64,
    pub status: ChannelStatus,
}

/// Channel grid data, sorted by numeric channel id
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChannelGridView {
    pub title: String,
    pub cards: Vec<ChannelCard>,
    pub fleet: ChannelFleetStats,
}

impl ChannelGridView {
    pub fn build(channels: &[ChannelSummary], severity: Severity) -> Self {
        let mut sorted = channels.to_vec();
        sort_by_channel_id(&mut sorted);

        let cards = sorted
            .iter()
            .map(|c| ChannelCard {
                channel_id: c.channel_id.clone(),
                code: channel_code(&c.channel_id),
                count: c.count,
                status: c.status,
            })
            .collect();

        Self {
            title: format!("Channel event statistics - {}", severity.label()),
            cards,
            fleet: ChannelFleetStats::from_channels(&sorted),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Image panel in the channel detail view
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum ImagePanel {
    /// Resolved static asset path
    Image { url: String },
    /// Nothing to show; caption explains what is missing
    Placeholder { caption: String },
}

/// One row in the detail or archive listing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

/// Full channel detail, modal-shaped
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChannelDetailView {
    pub title: String,
    pub code: String,
    pub counts: EventCounts,
    /// Per-type breakdown rows
    pub by_type: Vec<DetailRow>,
    pub location: Vec<DetailRow>,
    pub emap: ImagePanel,
    pub fov: ImagePanel,
    pub archive_title: String,
    pub archive: Vec<DetailRow>,
}

impl ChannelDetailView {
    pub fn build(detail: &ChannelDetail, severity: Severity) -> Self {
        let code = channel_code(&detail.channel_id);
        let label = severity.label();

        let by_type = detail
            .by_type
            .iter()
            .map(|t| DetailRow {
                label: t.display_label().to_string(),
                value: format!("{} events", t.count),
            })
            .collect();

        let location = vec![
            DetailRow {
                label: "Channel".to_string(),
                value: code.clone(),
            },
            DetailRow {
                label: "Facility".to_string(),
                value: detail
                    .fov_location_name
                    .clone()
                    .unwrap_or_else(|| "No information".to_string()),
            },
            DetailRow {
                label: "Area".to_string(),
                value: detail
                    .area_name
                    .clone()
                    .unwrap_or_else(|| "No information".to_string()),
            },
            DetailRow {
                label: "Status".to_string(),
                value: detail.status.to_string(),
            },
        ];

        let emap = match &detail.emap_image_url {
            Some(url) => ImagePanel::Image {
                url: format!("/static/emap/{}", url),
            },
            None => ImagePanel::Placeholder {
                caption: format!("No E-MAP image ({})", code),
            },
        };

        let fov = match &detail.fov_thumbnail_url {
            Some(url) => ImagePanel::Image {
                url: format!("/static/fov_thumbnails/{}", url),
            },
            None => ImagePanel::Placeholder {
                caption: format!(
                    "No FOV thumbnail ({})",
                    detail.fov_location_name.as_deref().unwrap_or(&code)
                ),
            },
        };

        let archive = if detail.by_type.is_empty() {
            let (start, end) = detail
                .range
                .as_ref()
                .map(|r| (r.start.clone(), r.end.clone()))
                .unwrap_or_else(|| ("N/A".to_string(), "N/A".to_string()));
            vec![
                DetailRow {
                    label: "Period".to_string(),
                    value: format!("{} ~ {}", start, end),
                },
                DetailRow {
                    label: "Total events".to_string(),
                    value: format!("{} events", detail.counts.total),
                },
            ]
        } else {
            detail
                .by_type
                .iter()
                .map(|t| DetailRow {
                    label: format!("{} ({} events)", t.display_label(), t.count),
                    value: t.type_code.clone().unwrap_or_else(|| "N/A".to_string()),
                })
                .collect()
        };

        Self {
            title: format!("{} channel detail - {}", code, label),
            code: code.clone(),
            counts: detail.counts,
            by_type,
            location,
            emap,
            fov,
            archive_title: format!("{} event log archive - {}", code, label),
            archive,
        }
    }
}

/// Dynamic report title for the selected period and filter
pub fn report_title(start: Option<&str>, end: Option<&str>, severity: Severity) -> String {
    let (Some(start), Some(end)) = (
        start.and_then(parse_date),
        end.and_then(parse_date),
    ) else {
        return DEFAULT_REPORT_TITLE.to_string();
    };

    let mut title = format!(
        "{} ~ {} analytics report",
        start.format("%b %-d"),
        end.format("%b %-d")
    );
    if severity != Severity::All {
        title.push_str(&format!(" - {} events only", severity.label()));
    }
    title
}

/// Everything a renderer needs to draw the dashboard.
///
/// Sections are `None` until their endpoint has delivered at least once; a
/// later failure never clears an earlier section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub report_title: String,
    pub stats: Option<StatCards>,
    pub type_chart: Option<TypeChart>,
    pub hourly_chart: Option<HourlyChart>,
    pub channel_grid: Option<ChannelGridView>,
    pub status: Option<StatusMessage>,
}

/// Replaceable rendering seam.
///
/// The controller produces data; implementations decide how it looks. The
/// crate ships a terminal renderer, anything else plugs in here.
pub trait DashboardView: Send + Sync {
    /// Draw a full snapshot
    fn render(&self, snapshot: &DashboardSnapshot);

    /// Show a transient status line
    fn render_status(&self, status: &StatusMessage);

    /// Draw the single-channel detail view
    fn render_channel_detail(&self, detail: &ChannelDetailView);
}
