//! CLI subcommand implementations.

pub mod daily;
pub mod department;
pub mod employee;
pub mod report;
pub mod stats;
pub mod status;
pub mod summary;
pub mod sync;
pub mod util;
pub mod watch;
