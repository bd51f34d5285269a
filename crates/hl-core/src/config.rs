//! Tunables for layout and prediction.

use serde::{Deserialize, Serialize};

/// Geometry heuristics used by the layout passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum footprint of any item on the minute axis.
    /// Default: 15.
    pub min_span_minutes: u32,

    /// Fraction of an item's duration that may overlap a column's previous
    /// occupant without forcing a new column.
    /// Default: 0.25.
    pub pack_tolerance_ratio: f64,

    /// Minutes blocked above and below each foreground item when placing a
    /// sleep label.
    /// Default: 24.
    pub label_exclusion_radius: u32,

    /// Dots closer than this in narrow mode go to different lanes.
    /// Default: 60.
    pub lane_proximity_minutes: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_span_minutes: 15,
            pack_tolerance_ratio: 0.25,
            label_exclusion_radius: 24,
            lane_proximity_minutes: 60,
        }
    }
}

/// Which forecast the ghost generator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GhostMode {
    /// Last feed plus a fixed interval.
    #[default]
    #[serde(alias = "yesterday")]
    NextOccurrence,
    /// Ordinal-aligned average of the previous days' feeds.
    #[serde(alias = "average")]
    HistoricalAverage,
}

/// Longest look-back used by historical-average mode, in days.
pub const MAX_HISTORY_DAYS: u32 = 366;

/// Settings for predicted ("ghost") feed markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Master switch. Default: true.
    pub show_ghost: bool,
    /// Default: next-occurrence.
    pub mode: GhostMode,
    /// Expected hours between feeds in next-occurrence mode. Default: 3.0.
    pub fixed_interval_hours: f64,
    /// Days looked back in historical-average mode, capped at
    /// [`MAX_HISTORY_DAYS`]. Default: 3.
    pub history_days: u32,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            show_ghost: true,
            mode: GhostMode::default(),
            fixed_interval_hours: 3.0,
            history_days: 3,
        }
    }
}

/// Everything the engine is parameterized by besides its inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub layout: LayoutConfig,
    pub ghost: GhostConfig,
}
