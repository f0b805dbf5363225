//! Water-level threshold classification.
//!
//! Every station carries two ascending thresholds, `warning_level` and
//! `alarm_level`. A reading is classified against them with strict
//! greater-than at both boundaries: a reading exactly equal to a threshold
//! stays in the lower tier. The dashboard maps the three tiers directly to
//! marker and cell colors (green / yellow / red).

use serde::{Deserialize, Serialize};

/// Severity tiers, in ascending order of severity.
///
/// Serialized lowercase (`"normal"`, `"warning"`, `"alarm"`) for the
/// dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Alarm,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Normal => write!(f, "normal"),
            Severity::Warning => write!(f, "warning"),
            Severity::Alarm => write!(f, "alarm"),
        }
    }
}

/// Classifies a water level against a station's thresholds.
///
/// Both comparisons are strictly greater-than:
///   water_level > alarm_level   → Alarm
///   water_level > warning_level → Warning
///   otherwise                   → Normal
///
/// A reading exactly equal to a threshold is NOT elevated to that tier.
/// `alarm_level >= warning_level` is assumed, not checked here.
pub fn classify(water_level: f64, warning_level: f64, alarm_level: f64) -> Severity {
    if water_level > alarm_level {
        Severity::Alarm
    } else if water_level > warning_level {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
