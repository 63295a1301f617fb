//! CLI subcommand implementations.

pub mod chart;
pub mod layout;
pub mod tracks;
mod util;
