//! Timeline layout and prediction engine for the caregiver log.
//!
//! This crate turns a subject's feed, sleep and diaper events into
//! renderer-agnostic geometry for 24-hour day columns:
//! - Normalization: clipping events onto a day's minute axis
//! - Packing: side-by-side columns for overlapping foreground items
//! - Labels: keeping sleep labels clear of foreground dots
//! - Lanes: horizontal jitter for compressed day columns
//! - Ghosts: predicted next feeds
//!
//! Every entry point takes the reference instant (`now`) as a parameter and
//! is a pure function of its inputs.

pub mod activity;
pub mod config;
pub mod event;
pub mod ghost;
pub mod item;
pub mod label;
pub mod lanes;
pub mod normalize;
pub mod pack;
pub mod summary;
pub mod timeline;
pub mod types;
pub mod window;

#[cfg(test)]
mod fixtures;

pub use activity::ActivityKind;
pub use config::{GhostConfig, GhostMode, LayoutConfig, MAX_HISTORY_DAYS, TimelineConfig};
pub use event::{DiaperDetail, Event, EventKind};
pub use ghost::{Ghost, generate_ghosts};
pub use item::{ItemTag, LayoutItem};
pub use summary::{DailySummary, summarize_day};
pub use timeline::{
    ColumnMode, DayColumn, WeekView, layout_column, layout_day, layout_narrow, layout_week,
    week_start,
};
pub use types::{EventId, SubjectId, ValidationError};
pub use window::{DayWindow, MINUTES_PER_DAY};
