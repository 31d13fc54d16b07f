//! CLI subcommand implementations

pub mod trace;
pub mod trip;
