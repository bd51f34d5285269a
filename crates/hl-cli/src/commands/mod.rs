//! CLI subcommand implementations.

pub mod day;
pub mod ghosts;
pub mod summary;
pub mod util;
pub mod week;
