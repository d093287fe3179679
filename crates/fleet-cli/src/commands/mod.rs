//! CLI subcommand implementations.

pub mod intervals;
pub mod metrics;
pub mod pairs;
pub mod resolve_date;
pub mod util;
