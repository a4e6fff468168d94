//! Terminal Renderer
//!
//! A plain-text [`DashboardView`] implementation. This is deliberately the
//! least interesting consumer of the view models: everything it prints is
//! already shaped by `view`, so any richer frontend can replace it without
//! touching the controller.

use super::view::{
    ChannelDetailView, DashboardSnapshot, DashboardView, ImagePanel, StatusKind, StatusMessage,
};

/// Maximum bar width for the hourly histogram, in characters
const BAR_WIDTH: usize = 40;

/// Plain-text renderer writing to stdout
#[derive(Debug, Default)]
pub struct TextView;

impl TextView {
    pub fn new() -> Self {
        Self
    }

    /// Render a snapshot to a string
    pub fn format_snapshot(snapshot: &DashboardSnapshot) -> String {
        let mut out = String::new();

        out.push_str(&format!("== {} ==\n", snapshot.report_title));

        if let Some(status) = &snapshot.status {
            out.push_str(&Self::format_status(status));
        }

        if let Some(stats) = &snapshot.stats {
            out.push_str(&format!(
                "\n[{}] total: {}  critical: {}  warn: {}  info: {}\n",
                stats.active_filter.label(),
                stats.headline,
                stats.critical,
                stats.warn,
                stats.info
            ));
        }

        if let Some(chart) = &snapshot.type_chart {
            out.push_str(&format!("\n{}\n", chart.title));
            if chart.is_empty() {
                out.push_str("  no event type data for this selection\n");
            }
            for share in &chart.shares {
                out.push_str(&format!(
                    "  {:<24} {:>6}  ({}%)\n",
                    share.label, share.count, share.percentage
                ));
            }
        }

        if let Some(chart) = &snapshot.hourly_chart {
            out.push_str(&format!("\n{}\n", chart.title));
            if !chart.has_data {
                out.push_str("  no hourly data for this selection\n");
            } else {
                let max = chart.counts.iter().copied().max().unwrap_or(0).max(1);
                for (hour, count) in chart.counts.iter().enumerate() {
                    let width = (*count as usize * BAR_WIDTH) / max as usize;
                    out.push_str(&format!(
                        "  {:02}h {:>6} {}\n",
                        hour,
                        count,
                        "#".repeat(width)
                    ));
                }
            }
        }

        if let Some(grid) = &snapshot.channel_grid {
            out.push_str(&format!("\n{}\n", grid.title));
            if grid.is_empty() {
                out.push_str("  no channel data for this selection\n");
            }
            for card in &grid.cards {
                out.push_str(&format!(
                    "  {}  {:>6} events  [{}]\n",
                    card.code, card.count, card.status
                ));
            }
            out.push_str(&format!(
                "  -- {} channels, {} online / {} offline ({}%)\n",
                grid.fleet.total, grid.fleet.online, grid.fleet.offline, grid.fleet.online_rate
            ));
        }

        out
    }

    /// Render a status message to a string
    pub fn format_status(status: &StatusMessage) -> String {
        let prefix = match status.kind {
            StatusKind::Loading => "...",
            StatusKind::Success => "ok:",
            StatusKind::Warning => "warn:",
            StatusKind::Error => "error:",
        };
        // Multi-line messages stay aligned under the prefix.
        let body = status.text.replace('\n', "\n    ");
        format!("{} {}\n", prefix, body)
    }

    /// Render a channel detail view to a string
    pub fn format_channel_detail(detail: &ChannelDetailView) -> String {
        let mut out = String::new();
        out.push_str(&format!("== {} ==\n", detail.title));

        out.push_str(&format!(
            "counts: total {}  critical {}  warn {}  info {}\n",
            detail.counts.total, detail.counts.critical, detail.counts.warn, detail.counts.info
        ));

        for row in &detail.by_type {
            out.push_str(&format!("  {:<24} {}\n", row.label, row.value));
        }

        out.push_str("location:\n");
        for row in &detail.location {
            out.push_str(&format!("  {:<10} {}\n", row.label, row.value));
        }

        for (name, panel) in [("E-MAP", &detail.emap), ("FOV", &detail.fov)] {
            match panel {
                ImagePanel::Image { url } => {
                    out.push_str(&format!("{}: {}\n", name, url));
                }
                ImagePanel::Placeholder { caption } => {
                    out.push_str(&format!("{}: {}\n", name, caption));
                }
            }
        }

        out.push_str(&format!("{}\n", detail.archive_title));
        for row in &detail.archive {
            out.push_str(&format!("  {:<32} {}\n", row.label, row.value));
        }

        out
    }
}

impl DashboardView for TextView {
    fn render(&self, snapshot: &DashboardSnapshot) {
        print!("{}", Self::format_snapshot(snapshot));
    }

    fn render_status(&self, status: &StatusMessage) {
        print!("{}", Self::format_status(status));
    }

    fn render_channel_detail(&self, detail: &ChannelDetailView) {
        print!("{}", Self::format_channel_detail(detail));
    }
}

#[cfg(test)]
mod tests {
    use super::super::view::{HourlyChart, StatCards, TypeChart};
    use super::*;
    use crate::model::{EventCounts, HourlyCount, Severity, TypeSlice};

    #[test]
    fn test_format_status_aligns_multiline() {
        let status = StatusMessage::error("first\nsecond", 5_000);
        let text = TextView::format_status(&status);
        assert!(text.starts_with("error: first\n    second"));
    }

    #[test]
    fn test_format_snapshot_sections() {
        let snapshot = DashboardSnapshot {
            report_title: "Jul 26 ~ Sep 24 analytics report".to_string(),
            stats: Some(StatCards::from_counts(
                &EventCounts {
                    total: 12,
                    critical: 2,
                    warn: 4,
                    info: 6,
                },
                Severity::All,
            )),
            type_chart: Some(TypeChart::build(
                &[TypeSlice {
                    label: "Intrusion".to_string(),
                    count: 12,
                }],
                Severity::All,
            )),
            hourly_chart: Some(HourlyChart::build(
                &[HourlyCount { hour: 9, count: 12 }],
                Severity::All,
            )),
            channel_grid: None,
            status: None,
        };

        let text = TextView::format_snapshot(&snapshot);
        assert!(text.contains("== Jul 26 ~ Sep 24 analytics report =="));
        assert!(text.contains("total: 12"));
        assert!(text.contains("Intrusion"));
        assert!(text.contains("(100%)"));
        assert!(text.contains("09h"));
    }

    #[test]
    fn test_empty_sections_render_nothing() {
        let snapshot = DashboardSnapshot {
            report_title: "t".to_string(),
            ..Default::default()
        };
        let text = TextView::format_snapshot(&snapshot);
        assert_eq!(text, "== t ==\n");
    }
}
