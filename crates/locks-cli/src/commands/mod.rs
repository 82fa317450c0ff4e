//! CLI subcommand implementations.

pub mod events;
pub mod report;
pub mod sessions;
pub mod util;
