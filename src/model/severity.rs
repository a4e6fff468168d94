//! Severity Filter
//!
//! The process-wide event subset selector and its presentation mapping.
//! A single `SeverityStyle` record replaces per-call-site branching on the
//! severity value for labels and chart colors.

use serde::{Deserialize, Serialize};

/// Active event subset selector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// All severities combined
    #[default]
    All,
    /// Critical events only
    Critical,
    /// Warning events only
    Warn,
    /// Informational events only
    Info,
}

impl Severity {
    /// Get all severities for iteration
    pub fn all_values() -> &'static [Severity] {
        &[
            Severity::All,
            Severity::Critical,
            Severity::Warn,
            Severity::Info,
        ]
    }

    /// Query-parameter value (`all|critical|warn|info`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::All => "all",
            Severity::Critical => "critical",
            Severity::Warn => "warn",
            Severity::Info => "info",
        }
    }

    /// Presentation record for this severity
    pub fn style(&self) -> SeverityStyle {
        match self {
            Severity::All => SeverityStyle {
                label: "All",
                base_rgb: (169, 143, 123),
                palette: &["#FF6384", "#6EC6FF", "#FFCE56", "#4BC0C0", "#9966FF"],
            },
            Severity::Critical => SeverityStyle {
                label: "Critical",
                base_rgb: (221, 46, 68),
                palette: &["#DD2E44", "#E74C3C", "#C0392B", "#A93226", "#922B21"],
            },
            Severity::Warn => SeverityStyle {
                label: "Warning",
                base_rgb: (244, 144, 12),
                palette: &["#F4900C", "#E67E22", "#D68910", "#B7950B", "#9A7D0A"],
            },
            Severity::Info => SeverityStyle {
                label: "Info",
                base_rgb: (119, 178, 86),
                palette: &["#77B256", "#58D68D", "#52C41A", "#389E0D", "#237804"],
            },
        }
    }

    /// Label shown in titles and status messages
    pub fn label(&self) -> &'static str {
        self.style().label
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Severity::All),
            "critical" => Ok(Severity::Critical),
            "warn" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            other => Err(format!(
                "invalid severity '{}' (expected all, critical, warn, or info)",
                other
            )),
        }
    }
}

/// Presentation attributes for a severity value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    /// Human-readable label
    pub label: &'static str,
    /// Base chart color as an RGB triple
    pub base_rgb: (u8, u8, u8),
    /// Hex palette for multi-series charts
    pub palette: &'static [&'static str],
}

impl SeverityStyle {
    /// CSS rgba() string at the given opacity
    pub fn color(&self, alpha: f32) -> String {
        let (r, g, b) = self.base_rgb;
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }
}

/// Event counts broken down by severity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub warn: u64,
    #[serde(default)]
    pub info: u64,
}

impl EventCounts {
    /// Count for a single severity bucket
    pub fn bucket(&self, severity: Severity) -> u64 {
        match severity {
            Severity::All => self.total,
            Severity::Critical => self.critical,
            Severity::Warn => self.warn,
            Severity::Info => self.info,
        }
    }

    /// Headline figure under the given filter.
    ///
    /// With a non-`All` filter the selected bucket replaces the total, so the
    /// big number always reflects what the user asked for.
    pub fn headline(&self, severity: Severity) -> u64 {
        self.bucket(severity)
    }
}
