//! Caregiver timeline CLI library.
//!
//! This crate provides the command-line interface over `hl-core`: loading
//! event files, resolving configuration and rendering day, week, ghost and
//! summary views.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod view;

pub use cli::{Cli, Commands, GhostModeArg, ViewArgs};
pub use config::Config;
pub use view::ViewContext;
